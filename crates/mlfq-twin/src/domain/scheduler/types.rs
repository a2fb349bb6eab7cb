//! Scheduler Types
//!
//! Error taxonomy and lifecycle states of the scheduling engine.
//!
//! - **Configuration errors** are returned synchronously from construction,
//!   submission and pre-run edits. Values are never silently clamped.
//! - **Invariant violations** are programming errors and fatal to the run.
//!   `InvariantViolation` exists so the invariant checker can describe what
//!   broke; the run loop panics on it.
//! - **Cancellation** is not an error; see [`RunOutcome::Cancelled`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::process::ProcessId;

/// Error type for engine operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchedulerError {
    /// The quanta list is empty
    #[error("Engine needs at least one priority level")]
    NoLevels,

    /// A level was configured with a non-positive quantum
    #[error("Invalid quantum {quantum} for level {level}: must be positive")]
    InvalidQuantum {
        /// 1-based level
        level: usize,
        /// Rejected value
        quantum: i64,
    },

    /// Aging or de-aging threshold below zero or too large
    #[error("Invalid {name} threshold {value}: must be in [0, {}]", u32::MAX)]
    InvalidThreshold {
        /// `"aging"` or `"de-aging"`
        name: &'static str,
        /// Rejected value
        value: i64,
    },

    /// Priority outside `[1, levels]`
    #[error(
        "Priority {priority} of process {id} is out of range{}",
        .levels.map_or_else(String::new, |n| format!(" [1, {n}]"))
    )]
    PriorityOutOfRange {
        /// Offending process
        id: ProcessId,
        /// Rejected value
        priority: i64,
        /// Level count, when known
        levels: Option<usize>,
    },

    /// Burst time below zero
    #[error("Negative burst time {burst_time} for process {id}")]
    NegativeBurstTime {
        /// Offending process
        id: ProcessId,
        /// Rejected value
        burst_time: i64,
    },

    /// Arrival time below zero
    #[error("Negative arrival time {arrival_time} for process {id}")]
    NegativeArrivalTime {
        /// Offending process
        id: ProcessId,
        /// Rejected value
        arrival_time: i64,
    },

    /// Another record already uses this id
    #[error("Duplicate process id: {0}")]
    DuplicateProcessId(ProcessId),

    /// No record with this id was submitted
    #[error("Unknown process id: {0}")]
    UnknownProcess(ProcessId),

    /// Submission, edit or a second `schedule()` after the run started
    #[error("Engine run already started")]
    AlreadyStarted,

    /// Internal consistency check failed
    #[error("Scheduler invariant violated: {0}")]
    InvariantViolation(String),
}

impl SchedulerError {
    /// Whether the error stems from caller-supplied configuration
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::NoLevels
                | Self::InvalidQuantum { .. }
                | Self::InvalidThreshold { .. }
                | Self::PriorityOutOfRange { .. }
                | Self::NegativeBurstTime { .. }
                | Self::NegativeArrivalTime { .. }
                | Self::DuplicateProcessId(_)
                | Self::UnknownProcess(_)
        )
    }
}

/// Engine lifecycle
///
/// ```text
/// READY ──schedule()──> RUNNING ──┬──> COMPLETED
///                                 └──> CANCELLED
/// ```
///
/// Both terminal states are final; a fresh engine is needed for a new run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineState {
    /// Accepting submissions and edits
    Ready,
    /// Run loop active
    Running,
    /// Every process finished
    Completed,
    /// Stopped by the cancellation token
    Cancelled,
}

impl EngineState {
    /// Whether submissions are still accepted
    #[inline(always)]
    pub const fn accepts_submissions(self) -> bool {
        matches!(self, EngineState::Ready)
    }

    /// Whether the run is over
    #[inline(always)]
    pub const fn is_terminal(self) -> bool {
        matches!(self, EngineState::Completed | EngineState::Cancelled)
    }
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineState::Ready => write!(f, "READY"),
            EngineState::Running => write!(f, "RUNNING"),
            EngineState::Completed => write!(f, "COMPLETED"),
            EngineState::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunOutcome {
    /// Pending list and every level drained
    Completed,
    /// Stopped early; records are left in a consistent partial state
    Cancelled,
}

impl From<RunOutcome> for EngineState {
    fn from(outcome: RunOutcome) -> Self {
        match outcome {
            RunOutcome::Completed => EngineState::Completed,
            RunOutcome::Cancelled => EngineState::Cancelled,
        }
    }
}
