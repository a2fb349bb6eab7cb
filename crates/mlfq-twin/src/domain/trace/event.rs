//! Trace event definitions

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::clock::TimeUnit;
use crate::domain::process::ProcessId;

/// What happened
///
/// Levels are reported 1-based, the same numbering as `priority`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraceEventKind {
    /// Released from the pending list into a level
    Arrived {
        /// Process
        process: ProcessId,
        /// Level entered
        level: usize,
    },
    /// Selected as CPU occupant for a slice
    Dispatched {
        /// Process
        process: ProcessId,
        /// Level it was taken from
        level: usize,
        /// Units granted for this turn
        slice: TimeUnit,
    },
    /// Executed one unit
    Ran {
        /// Process
        process: ProcessId,
        /// Level it runs at
        level: usize,
        /// Arrival time of the process
        arrival: TimeUnit,
        /// CPU time still required after this unit
        remaining: TimeUnit,
        /// Waiting units left before promotion, `None` when aging is disabled
        time_to_age: Option<TimeUnit>,
        /// CPU units left before demotion, `None` when de-aging is disabled
        time_to_de_age: Option<TimeUnit>,
    },
    /// Quantum expired with work left; back to the tail of its level
    Requeued {
        /// Process
        process: ProcessId,
        /// Level re-entered
        level: usize,
    },
    /// Demoted after sustained CPU use; the rest of the slice is forfeited
    DeAged {
        /// Process
        process: ProcessId,
        /// New level
        level: usize,
    },
    /// Promoted after waiting long enough
    AgedUp {
        /// Process
        process: ProcessId,
        /// New level
        level: usize,
    },
    /// Remaining time reached zero
    Finished {
        /// Process
        process: ProcessId,
    },
    /// No resident process; one unit passed waiting for an arrival
    Idle,
    /// The run was cancelled
    Cancelled,
}

/// One time-tagged trace entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEvent {
    /// Global time at which the event was recorded
    pub time: TimeUnit,
    /// Event payload
    #[serde(flatten)]
    pub kind: TraceEventKind,
}

impl TraceEvent {
    /// Create an event
    pub fn new(time: TimeUnit, kind: TraceEventKind) -> Self {
        Self { time, kind }
    }

    /// Process the event refers to, if any
    pub fn process(&self) -> Option<&ProcessId> {
        match &self.kind {
            TraceEventKind::Arrived { process, .. }
            | TraceEventKind::Dispatched { process, .. }
            | TraceEventKind::Ran { process, .. }
            | TraceEventKind::Requeued { process, .. }
            | TraceEventKind::DeAged { process, .. }
            | TraceEventKind::AgedUp { process, .. }
            | TraceEventKind::Finished { process } => Some(process),
            TraceEventKind::Idle | TraceEventKind::Cancelled => None,
        }
    }
}

fn or_na(value: Option<TimeUnit>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| v.to_string())
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = self.time;
        match &self.kind {
            TraceEventKind::Arrived { process, level } => {
                write!(f, "t={t}: {process} arrived in queue {level}")
            }
            TraceEventKind::Dispatched { process, level, slice } => {
                write!(f, "t={t}: {process} dispatched from queue {level} for up to {slice} TU")
            }
            TraceEventKind::Ran {
                process,
                level,
                arrival,
                remaining,
                time_to_age,
                time_to_de_age,
            } => write!(
                f,
                "t={t}: {process} running in queue {level} (1 TU) | Arrival={arrival} \
                 | Remaining={remaining} | TimeToAge={} | TimeToDeAge={}",
                or_na(*time_to_age),
                or_na(*time_to_de_age),
            ),
            TraceEventKind::Requeued { process, level } => {
                write!(f, "t={t}: {process} quantum expired, requeued in queue {level}")
            }
            TraceEventKind::DeAged { process, level } => {
                write!(f, "t={t}: {process} de-aged to queue {level}")
            }
            TraceEventKind::AgedUp { process, level } => {
                write!(f, "t={t}: {process} aged up to queue {level}")
            }
            TraceEventKind::Finished { process } => write!(f, "t={t}: {process} finished"),
            TraceEventKind::Idle => write!(f, "t={t}: CPU idle"),
            TraceEventKind::Cancelled => write!(f, "t={t}: run cancelled"),
        }
    }
}
