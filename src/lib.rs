//! # Dumpdeck
//!
//! A live terminal dashboard for debug dumps.
//!
//! Client programs (in any language) POST dump events — a payload plus
//! source location and call stack — to a local HTTP endpoint; dumpdeck
//! stores the session's events and renders them in a scrollable terminal
//! dashboard.
//!
//! ## Pipeline
//!
//! - **Store**: one shared, mutex-guarded event log for the session
//! - **Handoff**: a capacity-0 rendezvous channel; each accepted request is
//!   held open until the dashboard drains its snapshot (backpressure)
//! - **Dashboard**: a single thread that selects over user input and a
//!   1-second tick, polling the handoff without ever blocking

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod event;
pub mod handoff;
pub mod server;
pub mod store;
pub mod ui;

// Re-exports for convenience
pub use config::Config;
pub use error::Error;
pub use event::{CallstackFrame, DumpEvent, EventLog};
pub use handoff::{rendezvous, SnapshotReceiver, SnapshotSender};
pub use store::EventStore;
pub use ui::Dashboard;
