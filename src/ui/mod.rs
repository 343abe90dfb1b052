//! Terminal dashboard: layout, formatting, view state, input and the loop
//! tying them together.

mod dashboard;
mod draw;
mod format;
mod input;
mod layout;
mod views;

pub use dashboard::Dashboard;
pub use input::Action;
pub use layout::{DashboardLayout, Rect};
pub use views::{ScrollList, ViewState};
