//! Append-only trace log

use super::event::{TraceEvent, TraceEventKind};
use crate::domain::process::ProcessId;

/// Ordered sequence of trace events
///
/// Events can only be appended. Readers get slices or iterators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceLog {
    events: Vec<TraceEvent>,
}

impl TraceLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event
    ///
    /// Tags must be non-decreasing.
    pub(crate) fn push(&mut self, event: TraceEvent) {
        debug_assert!(
            self.events.last().map_or(true, |last| last.time <= event.time),
            "trace time went backwards"
        );
        self.events.push(event);
    }

    /// All events in recording order
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Number of recorded events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Iterate in recording order
    pub fn iter(&self) -> impl Iterator<Item = &TraceEvent> {
        self.events.iter()
    }

    /// Number of idle units recorded
    pub fn idle_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e.kind, TraceEventKind::Idle))
            .count()
    }

    /// Events concerning one process
    pub fn for_process<'a>(&'a self, id: &'a ProcessId) -> impl Iterator<Item = &'a TraceEvent> {
        self.events.iter().filter(move |e| e.process() == Some(id))
    }

    /// Collapse per-unit `Ran` events into `(process, units)` runs
    ///
    /// Consecutive units of the same process within one dispatch form one
    /// entry. This is the execution order as a human would read it.
    pub fn execution_runs(&self) -> Vec<(ProcessId, u64)> {
        let mut runs: Vec<(ProcessId, u64)> = Vec::new();
        let mut open = false;
        for event in &self.events {
            match &event.kind {
                TraceEventKind::Dispatched { .. } => open = false,
                TraceEventKind::Ran { process, .. } => match runs.last_mut() {
                    Some((last, units)) if open && last == process => *units += 1,
                    _ => {
                        runs.push((process.clone(), 1));
                        open = true;
                    }
                },
                _ => {}
            }
        }
        runs
    }

    /// Human-readable rendering, one event per line
    pub fn render(&self) -> String {
        self.events
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ran(time: u64, process: &str) -> TraceEvent {
        TraceEvent::new(
            time,
            TraceEventKind::Ran {
                process: process.into(),
                level: 1,
                arrival: 0,
                remaining: 0,
                time_to_age: None,
                time_to_de_age: None,
            },
        )
    }

    fn dispatched(time: u64, process: &str) -> TraceEvent {
        TraceEvent::new(
            time,
            TraceEventKind::Dispatched { process: process.into(), level: 1, slice: 2 },
        )
    }

    #[test]
    fn test_execution_runs_split_on_dispatch() {
        let mut log = TraceLog::new();
        log.push(dispatched(0, "P1"));
        log.push(ran(1, "P1"));
        log.push(ran(2, "P1"));
        log.push(dispatched(2, "P1"));
        log.push(ran(3, "P1"));
        log.push(dispatched(3, "P2"));
        log.push(ran(4, "P2"));

        let runs = log.execution_runs();
        assert_eq!(
            runs,
            vec![("P1".into(), 2), ("P1".into(), 1), ("P2".into(), 1)]
        );
    }

    #[test]
    fn test_idle_count_and_render() {
        let mut log = TraceLog::new();
        log.push(TraceEvent::new(1, TraceEventKind::Idle));
        log.push(TraceEvent::new(2, TraceEventKind::Idle));
        assert_eq!(log.idle_count(), 2);
        assert_eq!(log.render(), "t=1: CPU idle\nt=2: CPU idle");
    }
}
