//! Domain Layer - The Scheduling Model
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Domain Layer                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │                                                             │
//! │  Clock Module                  Process Module               │
//! │  ├─ SimClock                   ├─ ProcessRecord             │
//! │  └─ TimeUnit                   ├─ ProcessSpec               │
//! │                                └─ ProcessSnapshot           │
//! │                                                             │
//! │  Queue Module                  Trace Module                 │
//! │  ├─ LevelQueue                 ├─ TraceEvent                │
//! │  └─ ProcessSlot                └─ TraceLog                  │
//! │                                                             │
//! │                    Scheduler Module                         │
//! │                    ├─ SchedulingEngine<O, P>                │
//! │                    ├─ SchedulerObserver / Pacer seams       │
//! │                    └─ RunSummary                            │
//! │                                                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing in this layer touches files, wall-clock time or the terminal.
//! The only side channels out of a run are the observer and the pacer, both
//! chosen by the caller.
//!
//! # Type Aliases for Convenience
//!
//! - `HeadlessEngine`: no observer, no pacing
//! - `InteractiveEngine`: channel observer, fixed per-turn delay

pub mod clock;
pub mod process;
pub mod queue;
pub mod scheduler;
pub mod trace;

pub use clock::{SimClock, TimeUnit};
pub use process::{ProcessId, ProcessRecord, ProcessSnapshot, ProcessSpec, Residency};
pub use queue::{LevelQueue, ProcessSlot};
pub use scheduler::{
    CancellationToken, ChannelObserver, EngineConfig, EngineConfigSpec, EngineNotification,
    EngineState, FixedDelay, HeadlessEngine, InteractiveEngine, NoPacing, NoopObserver, Pacer,
    ProcessStats, QueueSnapshot, RecordingObserver, RunConfig, RunOutcome, RunSummary,
    SchedulerError, SchedulerObserver, SchedulingEngine,
};
pub use trace::{TraceEvent, TraceEventKind, TraceLog};
