//! Process Module
//!
//! Leaf data entities of the engine:
//!
//! - `ProcessRecord`: mutable per-process state, mutated only by the engine
//! - `ProcessSnapshot`: owned, read-only copy handed to observers
//! - `ProcessSpec`: configuration-boundary description, validated on conversion
//! - `Residency`: pending / queued / running / finished view of a record

mod types;

pub use types::{ProcessId, ProcessRecord, ProcessSnapshot, ProcessSpec, Residency};
