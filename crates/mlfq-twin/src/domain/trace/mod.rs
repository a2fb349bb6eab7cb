//! # Scheduling Trace
//!
//! An append-only, time-tagged record of every scheduling decision:
//! arrivals, dispatches, per-unit execution, aging, de-aging, finishes and
//! idle units. The trace is data owned by the engine and handed out
//! read-only; it is independent of the diagnostic `tracing` logs.
//!
//! Every event carries the global time at which it was recorded. Per-unit
//! events (`Ran`, `Idle`) are tagged with the clock value *after* the unit,
//! i.e. the unit covering `[t - 1, t)` is tagged `t`.

mod event;
mod log;

pub use event::{TraceEvent, TraceEventKind};
pub use log::TraceLog;
