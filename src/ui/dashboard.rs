//! The dashboard loop: one thread owning the terminal and all view state.
//!
//! Each iteration handles exactly one of two sources: a user [`Action`] from
//! the input actor, or a tick. A tick does one non-blocking poll of the
//! rendezvous channel; when nothing is pending it is a no-op and no frame is
//! drawn. The loop never blocks on ingestion and ingestion never observes
//! the terminal.

use crate::error::Error;
use crate::handoff::SnapshotReceiver;
use crate::store::EventStore;
use crate::ui::draw::Screen;
use crate::ui::input::{Action, InputActor};
use crate::ui::layout::DashboardLayout;
use crate::ui::views::ViewState;
use crossbeam_channel::{bounded, select, Receiver};
use crossterm::{cursor, execute, terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;

/// How often a pending snapshot is drained.
const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// How long the input thread waits before re-checking shutdown.
const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(10);

/// Puts the terminal into dashboard mode and restores it on drop, so a
/// panic or quit always hands the user their shell back.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide
        )?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(
            io::stdout(),
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

/// The terminal dashboard.
pub struct Dashboard {
    _guard: TerminalGuard,
    layout: DashboardLayout,
    state: ViewState,
    screen: Screen,
    status: String,
    actions: Receiver<Action>,
    input: Option<InputActor>,
    updates: SnapshotReceiver,
    store: Arc<EventStore>,
}

impl Dashboard {
    /// Initialize the terminal and spawn the input actor.
    ///
    /// Fails when the terminal cannot be queried or switched into raw mode,
    /// which is fatal at startup.
    pub fn new(
        store: Arc<EventStore>,
        updates: SnapshotReceiver,
        status: String,
    ) -> Result<Self, Error> {
        let (width, height) = terminal::size()?;
        let guard = TerminalGuard::enter()?;

        let (action_tx, actions) = bounded::<Action>(64);
        let input = InputActor::spawn(action_tx, INPUT_POLL_TIMEOUT)?;

        Ok(Self {
            _guard: guard,
            layout: DashboardLayout::compute(width, height),
            state: ViewState::new(),
            screen: Screen::new(),
            status,
            actions,
            input: Some(input),
            updates,
            store,
        })
    }

    /// Run until the user quits.
    pub fn run(mut self) -> Result<(), Error> {
        self.redraw()?;

        let ticker = crossbeam_channel::tick(TICK_INTERVAL);
        let actions = self.actions.clone();
        loop {
            select! {
                recv(actions) -> msg => {
                    let Ok(action) = msg else { break };
                    if !self.handle_action(action)? {
                        break;
                    }
                }
                recv(ticker) -> _ => {
                    // Non-blocking: an idle tick draws nothing.
                    if let Ok(snapshot) = self.updates.try_recv() {
                        tracing::debug!(events = snapshot.len(), "snapshot delivered");
                        self.state.apply_snapshot(snapshot);
                        self.redraw()?;
                    }
                }
            }
        }

        if let Some(input) = self.input.take() {
            input.join();
        }
        Ok(())
    }

    /// Apply one user action and redraw. Returns `false` on quit.
    fn handle_action(&mut self, action: Action) -> Result<bool, Error> {
        if apply_action(&mut self.state, &mut self.layout, &self.store, action) == Flow::Quit {
            return Ok(false);
        }
        self.redraw()?;
        Ok(true)
    }

    fn redraw(&mut self) -> Result<(), Error> {
        self.screen
            .render(&self.layout, &mut self.state, &self.status)?;
        Ok(())
    }
}

/// Outcome of one user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// The user-input transition table, separated from the terminal so it can
/// be exercised directly.
fn apply_action(
    state: &mut ViewState,
    layout: &mut DashboardLayout,
    store: &EventStore,
    action: Action,
) -> Flow {
    match action {
        Action::Quit => return Flow::Quit,
        Action::Reset => {
            state.reset();
            store.clear();
        }
        Action::MoveDown => state.move_down(),
        Action::MoveUp => state.move_up(),
        Action::ScrollCallstackDown => state.scroll_callstack_down(),
        Action::ScrollCallstackUp => state.scroll_callstack_up(),
        Action::Resize { width, height } => {
            *layout = DashboardLayout::compute(width, height);
        }
    }
    Flow::Continue
}
