//! View state: the dashboard's selection, scroll and rendered text.
//!
//! Owned and mutated exclusively by the dashboard loop thread. The cached
//! snapshot is replaced wholesale whenever the rendezvous channel delivers a
//! new event log; every mutation keeps the selection inside the snapshot.

use crate::event::EventLog;
use crate::ui::format;

/// A scrollable list of pre-rendered rows.
#[derive(Debug, Default)]
pub struct ScrollList {
    rows: Vec<String>,
    offset: usize,
}

impl ScrollList {
    /// Replace all rows and jump back to the top.
    pub fn set_rows(&mut self, rows: Vec<String>) {
        self.rows = rows;
        self.offset = 0;
    }

    /// All rows, unscrolled.
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// First visible row index.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Rows visible in a viewport of `height`, with their absolute indices.
    pub fn visible(&self, height: usize) -> impl Iterator<Item = (usize, &str)> {
        self.rows
            .iter()
            .enumerate()
            .skip(self.offset)
            .take(height)
            .map(|(i, row)| (i, row.as_str()))
    }

    /// Scroll one row toward the top.
    pub const fn scroll_up(&mut self) {
        self.offset = self.offset.saturating_sub(1);
    }

    /// Scroll one row toward the bottom, clamped to the last row.
    pub fn scroll_down(&mut self) {
        let max = self.rows.len().saturating_sub(1);
        self.offset = (self.offset + 1).min(max);
    }

    /// Adjust the offset so that `index` is inside a viewport of `height`.
    pub fn ensure_visible(&mut self, index: usize, height: usize) {
        if height == 0 {
            return;
        }
        if index < self.offset {
            self.offset = index;
        } else if index >= self.offset + height {
            self.offset = index + 1 - height;
        }
    }

    /// Drop all rows.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.offset = 0;
    }
}

/// Everything the dashboard draws, plus the selection driving it.
#[derive(Debug, Default)]
pub struct ViewState {
    /// The most recently delivered event log.
    snapshot: EventLog,
    /// Index of the selected event; 0 when the snapshot is empty.
    selected: usize,
    /// Rendered event rows.
    pub list: ScrollList,
    /// Rendered call-stack rows for the selected event.
    pub callstack: ScrollList,
    /// Rendered payload for the selected event.
    pub payload: String,
}

impl ViewState {
    /// Fresh, empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently selected index.
    pub const fn selected(&self) -> usize {
        self.selected
    }

    /// Number of events in the cached snapshot.
    pub fn len(&self) -> usize {
        self.snapshot.len()
    }

    /// Whether the cached snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }

    /// Replace the cached snapshot with a freshly delivered one.
    ///
    /// Rebuilds the list rows and, for the (possibly clamped) selection,
    /// the call-stack and payload views. A snapshot shorter than the old
    /// selection clamps it to the last valid index.
    pub fn apply_snapshot(&mut self, snapshot: EventLog) {
        self.snapshot = snapshot;
        self.selected = match self.snapshot.len() {
            0 => 0,
            len => self.selected.min(len - 1),
        };
        self.list
            .set_rows(self.snapshot.iter().map(format::event_row).collect());
        self.rebuild_detail();
    }

    /// Move the selection one event down.
    pub fn move_down(&mut self) {
        if self.selected + 1 < self.snapshot.len() {
            self.selected += 1;
            self.rebuild_detail();
        }
    }

    /// Move the selection one event up; at the top, only nudge the list
    /// scroll so earlier rows come back into view.
    pub fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.rebuild_detail();
        } else {
            self.list.scroll_up();
        }
    }

    /// Scroll the call-stack pane down one row. Selection is untouched.
    pub fn scroll_callstack_down(&mut self) {
        self.callstack.scroll_down();
    }

    /// Scroll the call-stack pane up one row. Selection is untouched.
    pub fn scroll_callstack_up(&mut self) {
        self.callstack.scroll_up();
    }

    /// Wipe all local buffers back to the empty-session state.
    ///
    /// The caller is responsible for clearing the event store; this only
    /// touches view-local state and never the rendezvous channel.
    pub fn reset(&mut self) {
        self.snapshot.clear();
        self.selected = 0;
        self.list.clear();
        self.callstack.clear();
        self.payload.clear();
    }

    fn rebuild_detail(&mut self) {
        match self.snapshot.get(self.selected) {
            Some(event) => {
                self.callstack.set_rows(format::callstack_rows(event));
                self.payload = format::payload(&event.payload);
            }
            None => {
                self.callstack.clear();
                self.payload.clear();
            }
        }
    }
}
