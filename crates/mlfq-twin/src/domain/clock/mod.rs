//! Simulation Clock
//!
//! # Overview
//!
//! The engine's notion of time is a discrete counter of whole units. It only
//! advances when a unit is executed or spent idle; it never reads wall-clock
//! time. Pacing for visualization is a separate concern (see
//! `scheduler::pacing`).
//!
//! # Physical Laws Enforced
//! - Time never decreases
//! - Time advances by exactly one unit per step

mod engine;

pub use engine::SimClock;

/// One discrete unit of simulated time
pub type TimeUnit = u64;
