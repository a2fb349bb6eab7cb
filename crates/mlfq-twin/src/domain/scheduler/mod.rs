//! Scheduler Module - The MLFQ Engine
//!
//! # Overview
//!
//! A discrete-time multi-level feedback queue. Processes enter at a level
//! given by their priority, run round-robin within a level for that level's
//! quantum, and move between levels:
//!
//! - **Aging**: a resident that waited `aging_threshold` units moves up one
//!   level. Level 0 is never a source.
//! - **De-aging**: an occupant that ran `de_aging_threshold` consecutive
//!   units at its level moves down one level and forfeits the rest of its
//!   slice. The lowest level is never a source.
//!
//! # Module Structure
//!
//! ```text
//! domain/scheduler/
//! ├── types.rs     SchedulerError, EngineState, RunOutcome
//! ├── config.rs    EngineConfig, RunConfig
//! ├── observer.rs  SchedulerObserver + Noop / Channel / Recording observers
//! ├── pacing.rs    Pacer + NoPacing / FixedDelay
//! ├── cancel.rs    CancellationToken
//! ├── summary.rs   RunSummary, ProcessStats
//! ├── engine.rs    SchedulingEngine<O, P>
//! └── mod.rs       This file
//! ```
//!
//! # Static Dispatch
//!
//! The observer and the pacer are type parameters, not trait objects:
//!
//! - `HeadlessEngine`: `SchedulingEngine<NoopObserver, NoPacing>`, batch runs
//! - `InteractiveEngine`: `SchedulingEngine<ChannelObserver, FixedDelay>`,
//!   live visualization at a human-followable pace
//!
//! Both compile to specialized run loops. A headless run has no notification
//! or sleep calls left after inlining.
//!
//! # Usage
//!
//! ```rust
//! use mlfq_twin::domain::scheduler::{EngineConfig, HeadlessEngine, RunOutcome};
//!
//! let config = EngineConfig::new(vec![2, 4, 8]).with_aging(10).with_de_aging(6);
//! let mut engine = HeadlessEngine::new(config).unwrap();
//! engine.add_new_process(5, 1, 0).unwrap();
//! engine.add_new_process(3, 3, 2).unwrap();
//!
//! let summary = engine.schedule().unwrap();
//! assert_eq!(summary.outcome, RunOutcome::Completed);
//! assert_eq!(summary.elapsed, 8);
//! ```

mod cancel;
mod config;
mod engine;
mod observer;
mod pacing;
mod summary;
mod types;

pub use cancel::CancellationToken;
pub use config::{
    EngineConfig, EngineConfigSpec, RunConfig, DEFAULT_AGING_THRESHOLD,
    DEFAULT_DE_AGING_THRESHOLD, DEFAULT_QUANTA,
};
pub use engine::{HeadlessEngine, InteractiveEngine, SchedulingEngine};
pub use observer::{
    ChannelObserver, EngineNotification, NoopObserver, QueueSnapshot, RecordingObserver,
    SchedulerObserver,
};
pub use pacing::{FixedDelay, NoPacing, Pacer};
pub use summary::{ProcessStats, RunSummary};
pub use types::{EngineState, RunOutcome, SchedulerError};
