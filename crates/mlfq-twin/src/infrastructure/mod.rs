//! Infrastructure Layer - Files In, Files Out
//!
//! # Responsibilities
//! - Scenario files (JSON) describing a configuration and a workload
//! - Trace export (JSON Lines)
//!
//! The domain layer never touches the filesystem; everything that does
//! lives here.

mod export;
mod scenario;

pub use export::write_trace_jsonl;
pub use scenario::{load_scenario, Scenario, ScenarioError};
