//! MLFQ Digital Twin
//!
//! # Overview
//!
//! `mlfq-twin` is a deterministic, discrete-time simulator of a
//! multi-level feedback queue CPU scheduler with aging and de-aging. Given
//! a level hierarchy and a set of processes it produces the same schedule,
//! unit for unit, on every run.
//!
//! # Layered Architecture
//!
//! - **Domain**: the engine, its data model and its observation seams
//! - **Infrastructure**: scenario files and trace export (serde_json)
//! - **Adapters**: running an engine on its own thread with live
//!   notifications and cancellation
//!
//! # Scheduling Laws (Invariants)
//!
//! ## Residency
//! - **R-001**: Every record is pending, resident in exactly one level,
//!   on the CPU, or finished
//! - **R-002**: At most one record occupies the CPU
//! - **R-003**: `1 <= priority <= levels` at all times
//! - **R-004**: A record that runs its last unit finishes where it is and
//!   is never demoted
//!
//! ## Time
//! - **T-001**: Global time never decreases
//! - **T-002**: Every unit is either executed or idle
//! - **T-003**: Total CPU time of a finished record equals its burst time
//!
//! ## Policy
//! - **P-001**: Dispatch takes the head of the highest non-empty level
//! - **P-002**: A slice is never interrupted by an arrival or a promotion
//! - **P-003**: A resident that waited `aging_threshold` units moves up
//!
//! # Usage
//!
//! ```rust
//! use mlfq_twin::domain::{EngineConfig, HeadlessEngine, ProcessRecord, RunOutcome};
//!
//! let mut engine = HeadlessEngine::new(EngineConfig::new(vec![2])).unwrap();
//! engine.add_process(ProcessRecord::new("P1", 4, 1, 0)).unwrap();
//! engine.add_process(ProcessRecord::new("P2", 4, 1, 0)).unwrap();
//!
//! let summary = engine.schedule().unwrap();
//! assert_eq!(summary.outcome, RunOutcome::Completed);
//! assert_eq!(summary.elapsed, 8);
//! println!("{}", engine.trace().render());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

// Layers
pub mod adapters;
pub mod domain;
pub mod infrastructure;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Re-export Primary Types
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

// Process types
pub use domain::{ProcessId, ProcessRecord, ProcessSnapshot, ProcessSpec, Residency};

// Engine types
pub use domain::{
    CancellationToken, EngineConfig, EngineState, HeadlessEngine, InteractiveEngine,
    RunConfig, RunOutcome, RunSummary, SchedulerError, SchedulingEngine,
};

// Observation types
pub use domain::{
    ChannelObserver, EngineNotification, NoopObserver, QueueSnapshot, SchedulerObserver,
    TraceEvent, TraceEventKind, TraceLog,
};

// Scenario & runner
pub use adapters::{channel_engine, spawn_engine, EngineHandle};
pub use infrastructure::{load_scenario, write_trace_jsonl, Scenario, ScenarioError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_defined() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_engine_types_exported() {
        let _id = ProcessId::auto(1);
        let _state = EngineState::Ready;
        let _engine: HeadlessEngine = SchedulingEngine::new(EngineConfig::default()).unwrap();
    }
}
