//! Trace export as JSON Lines, one event per line.

use std::io::Write;

use crate::domain::trace::TraceEvent;

use super::scenario::ScenarioError;

/// Write `events` to `writer`, one JSON object per line
///
/// Each line is the event's `time` plus its flattened kind, e.g.
/// `{"time":3,"kind":"aged_up","process":"P2","level":1}`.
///
/// # Errors
///
/// Serialization or I/O failures of `writer`.
pub fn write_trace_jsonl<W: Write>(
    mut writer: W,
    events: &[TraceEvent],
) -> Result<(), ScenarioError> {
    for event in events {
        serde_json::to_writer(&mut writer, event)?;
        writer.write_all(b"\n").map_err(serde_json::Error::io)?;
    }
    writer.flush().map_err(serde_json::Error::io)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::trace::TraceEventKind;

    #[test]
    fn test_one_line_per_event() {
        let events = vec![
            TraceEvent::new(0, TraceEventKind::Arrived { process: "P1".into(), level: 1 }),
            TraceEvent::new(1, TraceEventKind::Idle),
        ];
        let mut out = Vec::new();
        write_trace_jsonl(&mut out, &events).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], r#"{"time":1,"kind":"idle"}"#);

        let parsed: TraceEvent = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed, events[0]);
    }

    #[test]
    fn test_empty_trace_writes_nothing() {
        let mut out = Vec::new();
        write_trace_jsonl(&mut out, &[]).unwrap();
        assert!(out.is_empty());
    }
}
