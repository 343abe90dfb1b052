//! Text formatting for the dashboard panes.
//!
//! Everything here is display-only and must never fail: a timestamp that
//! does not parse or a payload that is not JSON degrades to the raw text.

use crate::event::DumpEvent;
use chrono::{Local, TimeZone};

/// One event-list row: `[type] [time] line:[file]`.
pub fn event_row(event: &DumpEvent) -> String {
    format!(
        "[{}] [{}] {}:[{}]",
        event.dump_type,
        timestamp(&event.timestamp),
        event.line,
        event.file,
    )
}

/// Call-stack rows for one event: `line:file:function`, outermost first.
pub fn callstack_rows(event: &DumpEvent) -> Vec<String> {
    event
        .callstack
        .iter()
        .map(|frame| format!("{}:{}:{}", frame.line, frame.file, frame.function))
        .collect()
}

/// Render decimal epoch seconds as local time.
///
/// Unparsable input is shown verbatim; clients are free to send garbage
/// timestamps and the viewer must keep running.
pub fn timestamp(raw: &str) -> String {
    let parsed = raw
        .parse::<i64>()
        .ok()
        .and_then(|secs| Local.timestamp_opt(secs, 0).single());
    match parsed {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => {
            tracing::warn!(raw, "unparsable dump timestamp");
            raw.to_owned()
        }
    }
}

/// Pretty-print a payload when it parses as JSON, otherwise return it raw.
pub fn payload(raw: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(value) => serde_json::to_string_pretty(&value).unwrap_or_else(|_| raw.to_owned()),
        Err(_) => raw.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::CallstackFrame;

    fn sample() -> DumpEvent {
        DumpEvent {
            payload: "42".into(),
            callstack: vec![CallstackFrame {
                file: "b.go".into(),
                line: "3".into(),
                function: "main".into(),
            }],
            file: "a.go".into(),
            line: "7".into(),
            dump_type: "go".into(),
            timestamp: "1700000000".into(),
        }
    }

    #[test]
    fn row_has_type_time_and_location() {
        let row = event_row(&sample());
        assert!(row.starts_with("[go] ["));
        assert!(row.ends_with("] 7:[a.go]"));
        // The epoch string itself must have been replaced by a rendering.
        assert!(!row.contains("1700000000"));
    }

    #[test]
    fn row_with_bad_timestamp_falls_back_to_raw() {
        let mut ev = sample();
        ev.timestamp = "not-a-number".into();
        let row = event_row(&ev);
        assert!(row.contains("[not-a-number]"));
    }

    #[test]
    fn callstack_rows_keep_frame_order() {
        let mut ev = sample();
        ev.callstack.push(CallstackFrame {
            file: "c.go".into(),
            line: "9".into(),
            function: "inner".into(),
        });
        let rows = callstack_rows(&ev);
        assert_eq!(rows, ["3:b.go:main", "9:c.go:inner"]);
    }

    #[test]
    fn timestamp_parses_epoch_seconds() {
        // Exact local rendering depends on the host timezone; shape only.
        let out = timestamp("1700000000");
        assert_eq!(out.len(), 19);
        assert!(out.contains('-') && out.contains(':'));
    }

    #[test]
    fn timestamp_keeps_garbage_verbatim() {
        assert_eq!(timestamp(""), "");
        assert_eq!(timestamp("soon"), "soon");
    }

    #[test]
    fn payload_pretty_prints_json() {
        let out = payload(r#"{"a":1,"b":[2,3]}"#);
        assert!(out.contains("\n"));
        assert!(out.contains("\"a\": 1"));
    }

    #[test]
    fn payload_keeps_non_json_raw() {
        assert_eq!(payload("plain text dump"), "plain text dump");
    }
}
