//! Event model: the wire shape of one debug dump.
//!
//! Clients POST these as JSON; the dashboard renders them. The payload is
//! opaque text (often JSON, pretty-printed at display time only).

use serde::Deserialize;

/// One frame of a reported call stack, outermost first.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CallstackFrame {
    /// Source file of the frame.
    pub file: String,
    /// Line number, kept as text exactly as the client sent it.
    pub line: String,
    /// Function name.
    pub function: String,
}

/// One debug dump reported by a client.
///
/// `payload`, `file` and `type` are required; everything else may be absent
/// and defaults to empty.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DumpEvent {
    /// The dumped data, stored as opaque text.
    pub payload: String,
    /// Call stack at the dump site; may be empty.
    #[serde(default)]
    pub callstack: Vec<CallstackFrame>,
    /// Source file of the dump call.
    pub file: String,
    /// Line number of the dump call, as text.
    #[serde(default)]
    pub line: String,
    /// Origin tag (PHP, JS, Go, ...).
    #[serde(rename = "type")]
    pub dump_type: String,
    /// Unix epoch seconds as decimal text; parsed lazily at render time.
    #[serde(default)]
    pub timestamp: String,
}

/// The ordered history of events for the current session, arrival order.
pub type EventLog = Vec<DumpEvent>;

impl DumpEvent {
    /// Whether this event may enter the store.
    ///
    /// Only `payload`, `file` and `type` are checked; `line`, `timestamp`
    /// and `callstack` are accepted as-is.
    pub fn is_valid(&self) -> bool {
        !self.payload.is_empty() && !self.file.is_empty() && !self.dump_type.is_empty()
    }
}
