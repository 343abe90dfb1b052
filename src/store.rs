//! Event store: the session's single shared slot of dump events.
//!
//! Ingestion appends, the dashboard clears on reset. One mutex spans the
//! whole read+push+snapshot of `append`, so concurrent requests can never
//! lose an event to a read-modify-write race.

use crate::event::{DumpEvent, EventLog};
use parking_lot::Mutex;

/// Thread-safe holder of the current [`EventLog`].
///
/// Created empty at process start, grows by one event per accepted dump,
/// truncated by the user's reset action, dropped at exit. Nothing expires.
#[derive(Debug, Default)]
pub struct EventStore {
    log: Mutex<EventLog>,
}

impl EventStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current log (empty when nothing was stored yet).
    pub fn get(&self) -> EventLog {
        self.log.lock().clone()
    }

    /// Replace the whole log.
    pub fn set(&self, log: EventLog) {
        *self.log.lock() = log;
    }

    /// Drop all events.
    pub fn clear(&self) {
        self.log.lock().clear();
    }

    /// Append one event and return the post-append snapshot.
    ///
    /// The lock is held across push and clone, so the returned snapshot is
    /// exactly the log as it stands after this append.
    pub fn append(&self, event: DumpEvent) -> EventLog {
        let mut log = self.log.lock();
        log.push(event);
        log.clone()
    }

    /// Number of stored events.
    pub fn len(&self) -> usize {
        self.log.lock().len()
    }

    /// Whether the store holds no events.
    pub fn is_empty(&self) -> bool {
        self.log.lock().is_empty()
    }
}
