//! Level Queue Module
//!
//! # Overview
//!
//! One `LevelQueue` per priority level. Each is a plain FIFO of process
//! slots with a fixed round-robin quantum:
//!
//! ```text
//! level 0 (q=2)  ║ P3 P7
//! level 1 (q=4)  ║ P2 P4 P6
//! level 2 (q=6)  ║ P5
//! level 3 (q=8)  ║ P1
//! ```
//!
//! Queues hold [`ProcessSlot`] handles rather than records. The engine owns
//! every `ProcessRecord` in a single table and the slot indexes into it, so a
//! record can be referenced by at most one queue without shared ownership.

mod level;

pub use level::{LevelQueue, ProcessSlot};
