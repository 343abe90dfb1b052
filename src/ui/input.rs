//! Input actor: dedicated thread polling terminal events.
//!
//! Raw crossterm events are translated into dashboard [`Action`]s here, so
//! the main loop only ever sees domain inputs it has a transition for.

use crossbeam_channel::Sender;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// A dashboard input, one per key binding plus resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Leave the dashboard (`q`, `Ctrl-c`).
    Quit,
    /// Clear the session (`Ctrl-r`).
    Reset,
    /// Select the next event (`j`, Down).
    MoveDown,
    /// Select the previous event (`k`, Up).
    MoveUp,
    /// Scroll the call-stack pane down (`J`).
    ScrollCallstackDown,
    /// Scroll the call-stack pane up (`K`).
    ScrollCallstackUp,
    /// Terminal geometry changed.
    Resize {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },
}

/// Map a key press to its dashboard action, if it has one.
pub fn action_for(code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);
    match code {
        KeyCode::Char('q') if !ctrl => Some(Action::Quit),
        KeyCode::Char('c') if ctrl => Some(Action::Quit),
        KeyCode::Char('r') if ctrl => Some(Action::Reset),
        KeyCode::Char('j') if !ctrl => Some(Action::MoveDown),
        KeyCode::Down => Some(Action::MoveDown),
        KeyCode::Char('k') if !ctrl => Some(Action::MoveUp),
        KeyCode::Up => Some(Action::MoveUp),
        KeyCode::Char('J') => Some(Action::ScrollCallstackDown),
        KeyCode::Char('K') => Some(Action::ScrollCallstackUp),
        _ => None,
    }
}

/// Input actor that polls terminal events.
pub struct InputActor {
    /// Handle to the input thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
}

impl InputActor {
    /// Spawn the input actor thread.
    ///
    /// `poll_timeout` bounds how long the thread waits for an event before
    /// re-checking the shutdown flag.
    pub fn spawn(sender: Sender<Action>, poll_timeout: Duration) -> std::io::Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let handle = thread::Builder::new()
            .name("dumpdeck-input".to_string())
            .spawn(move || {
                Self::run_loop(&sender, &shutdown_clone, poll_timeout);
            })?;

        Ok(Self {
            handle: Some(handle),
            shutdown,
        })
    }

    /// Signal the input thread to shut down.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the input thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    fn run_loop(sender: &Sender<Action>, shutdown: &Arc<AtomicBool>, poll_timeout: Duration) {
        loop {
            if shutdown.load(Ordering::Relaxed) {
                break;
            }

            match event::poll(poll_timeout) {
                Ok(true) => match event::read() {
                    Ok(ev) => {
                        if let Some(action) = Self::convert_event(&ev) {
                            if sender.send(action).is_err() {
                                // Receiver dropped, dashboard is gone.
                                break;
                            }
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "failed to read terminal event");
                    }
                },
                Ok(false) => {
                    // No event, loop again to check shutdown.
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to poll terminal events");
                }
            }
        }
    }

    fn convert_event(ev: &Event) -> Option<Action> {
        match ev {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                action_for(key.code, key.modifiers)
            }
            Event::Resize(width, height) => Some(Action::Resize {
                width: *width,
                height: *height,
            }),
            _ => None,
        }
    }
}

impl Drop for InputActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}
