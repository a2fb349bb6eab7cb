//! Scenario Files
//!
//! A scenario bundles an engine configuration, run knobs and a workload:
//!
//! ```json
//! {
//!   "config": { "quanta": [2, 4, 6, 8], "aging_threshold": 10, "de_aging_threshold": 6 },
//!   "run": { "pacing_ms": 250 },
//!   "processes": [
//!     { "id": "P1", "burst_time": 20, "priority": 4, "arrival_time": 1 },
//!     { "burst_time": 10, "priority": 2, "arrival_time": 3 }
//!   ]
//! }
//! ```
//!
//! `config` and `run` are optional and fall back to their defaults. Numbers in
//! `config` and `processes` are read as signed integers; negative values are
//! rejected as configuration errors, not as malformed JSON.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::process::ProcessSpec;
use crate::domain::scheduler::{
    EngineConfig, EngineConfigSpec, HeadlessEngine, Pacer, RunConfig, SchedulerError,
    SchedulerObserver, SchedulingEngine,
};

/// Errors raised while loading or applying a scenario
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    /// The scenario file could not be read
    #[error("Failed to read scenario {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON or wrong field types
    #[error("Malformed scenario: {0}")]
    Json(#[from] serde_json::Error),

    /// Well-formed, but rejected by the engine
    #[error("Invalid scenario: {0}")]
    Invalid(#[from] SchedulerError),
}

/// Engine configuration plus workload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scenario {
    /// Level hierarchy and thresholds
    pub config: EngineConfig,
    /// Pacing
    pub run: RunConfig,
    /// Workload, in submission order
    pub processes: Vec<ProcessSpec>,
}

/// On-disk shape of a scenario, before the config is validated
#[derive(Deserialize)]
struct ScenarioDocument {
    #[serde(default)]
    config: EngineConfigSpec,
    #[serde(default)]
    run: RunConfig,
    processes: Vec<ProcessSpec>,
}

impl Scenario {
    /// The built-in demo workload on the default 4-level hierarchy
    ///
    /// | id | burst | priority | arrival |
    /// |----|-------|----------|---------|
    /// | P1 | 20    | 4        | 1       |
    /// | P2 | 10    | 2        | 3       |
    /// | P3 | 2     | 1        | 5       |
    /// | P4 | 7     | 2        | 8       |
    /// | P5 | 15    | 3        | 11      |
    /// | P6 | 8     | 2        | 15      |
    /// | P7 | 4     | 1        | 20      |
    pub fn demo() -> Self {
        let workload = [
            (20, 4, 1),
            (10, 2, 3),
            (2, 1, 5),
            (7, 2, 8),
            (15, 3, 11),
            (8, 2, 15),
            (4, 1, 20),
        ];
        Self {
            config: EngineConfig::default(),
            run: RunConfig::default(),
            processes: workload
                .iter()
                .enumerate()
                .map(|(i, &(burst, priority, arrival))| {
                    ProcessSpec::new(format!("P{}", i + 1), burst, priority, arrival)
                })
                .collect(),
        }
    }

    /// Parse a scenario document
    ///
    /// # Errors
    ///
    /// `Json` on malformed input, `Invalid` on a bad level hierarchy or a
    /// negative threshold.
    pub fn from_json_str(json: &str) -> Result<Self, ScenarioError> {
        let document: ScenarioDocument = serde_json::from_str(json)?;
        Ok(Self {
            config: document.config.into_config()?,
            run: document.run,
            processes: document.processes,
        })
    }

    /// Render as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Only if serialization itself fails.
    pub fn to_json_pretty(&self) -> Result<String, ScenarioError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Submit every process to `engine`, in order
    ///
    /// # Errors
    ///
    /// The first submission error; earlier processes stay submitted.
    pub fn submit_to<O: SchedulerObserver, P: Pacer>(
        &self,
        engine: &mut SchedulingEngine<O, P>,
    ) -> Result<(), SchedulerError> {
        for spec in &self.processes {
            engine.add_spec(spec.clone())?;
        }
        Ok(())
    }

    /// Build a headless engine loaded with the workload
    ///
    /// # Errors
    ///
    /// Configuration or submission errors.
    pub fn into_headless(self) -> Result<HeadlessEngine, ScenarioError> {
        let mut engine = HeadlessEngine::new(self.config.clone())?;
        self.submit_to(&mut engine)?;
        Ok(engine)
    }
}

/// Read and parse a scenario file
///
/// # Errors
///
/// `Io` if the file cannot be read, otherwise as [`Scenario::from_json_str`].
pub fn load_scenario(path: impl AsRef<Path>) -> Result<Scenario, ScenarioError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let scenario = Scenario::from_json_str(&json)?;
    debug!(
        path = %path.display(),
        levels = scenario.config.level_count(),
        processes = scenario.processes.len(),
        "scenario loaded"
    );
    Ok(scenario)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use crate::domain::scheduler::RunOutcome;

    #[test]
    fn test_demo_workload_shape() {
        let demo = Scenario::demo();
        assert_eq!(demo.processes.len(), 7);
        assert_eq!(demo.config.level_count(), 4);
        assert_eq!(demo.processes[0], ProcessSpec::new("P1", 20, 4, 1));
        assert_eq!(demo.processes[6], ProcessSpec::new("P7", 4, 1, 20));
    }

    #[test]
    fn test_demo_runs_to_completion() {
        let mut engine = Scenario::demo().into_headless().unwrap();
        let summary = engine.schedule().unwrap();

        assert_eq!(summary.outcome, RunOutcome::Completed);
        assert_eq!(summary.finished_count(), 7);
        // Total burst 66, first arrival at t=1.
        assert_eq!(summary.elapsed - summary.idle_units, 66);
    }

    #[test]
    fn test_defaults_for_missing_sections() {
        let scenario = Scenario::from_json_str(
            r#"{ "processes": [ { "burst_time": 3, "priority": 1 } ] }"#,
        )
        .unwrap();
        assert_eq!(scenario.config, EngineConfig::default());
        assert_eq!(scenario.run, RunConfig::default());
        assert_eq!(scenario.processes[0].arrival_time, 0);
    }

    #[test]
    fn test_invalid_hierarchy_rejected() {
        let err = Scenario::from_json_str(r#"{ "config": { "quanta": [] }, "processes": [] }"#)
            .unwrap_err();
        assert!(matches!(err, ScenarioError::Invalid(SchedulerError::NoLevels)));
    }

    #[test]
    fn test_negative_quantum_is_configuration_error() {
        let err = Scenario::from_json_str(
            r#"{ "config": { "quanta": [2, -4] }, "processes": [] }"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ScenarioError::Invalid(SchedulerError::InvalidQuantum { level: 2, quantum: -4 })
        ));
    }

    #[test]
    fn test_negative_threshold_is_configuration_error() {
        let err = Scenario::from_json_str(
            r#"{ "config": { "quanta": [2], "aging_threshold": -1 }, "processes": [] }"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ScenarioError::Invalid(SchedulerError::InvalidThreshold { name: "aging", value: -1 })
        ));
    }

    #[test]
    fn test_negative_burst_is_configuration_error() {
        let scenario = Scenario::from_json_str(
            r#"{ "processes": [ { "id": "X", "burst_time": -2, "priority": 1 } ] }"#,
        )
        .unwrap();
        let err = scenario.into_headless().unwrap_err();
        assert!(matches!(
            err,
            ScenarioError::Invalid(SchedulerError::NegativeBurstTime { burst_time: -2, .. })
        ));
    }

    #[test]
    fn test_malformed_json() {
        let err = Scenario::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ScenarioError::Json(_)));
    }

    #[test]
    fn test_load_scenario_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = Scenario::demo().to_json_pretty().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let loaded = load_scenario(file.path()).unwrap();
        assert_eq!(loaded, Scenario::demo());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_scenario(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ScenarioError::Io { .. }));
    }
}
