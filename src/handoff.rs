//! Handoff: the rendezvous channel between ingestion and the dashboard.
//!
//! A capacity-0 crossbeam channel. A producer's `send` blocks until the
//! dashboard's next tick drains it, which is the system's only backpressure
//! mechanism: bursts of requests serialize here, each held open until its
//! snapshot is consumed. The consumer side is only ever polled with
//! `try_recv`, so the dashboard never blocks.

use crate::event::EventLog;
use crossbeam_channel::{bounded, Receiver, Sender};

/// Sending half, cloned into every ingestion handler.
pub type SnapshotSender = Sender<EventLog>;

/// Receiving half, owned by the dashboard loop.
pub type SnapshotReceiver = Receiver<EventLog>;

/// Create the rendezvous pair. At most one snapshot is ever in flight.
pub fn rendezvous() -> (SnapshotSender, SnapshotReceiver) {
    bounded(0)
}
