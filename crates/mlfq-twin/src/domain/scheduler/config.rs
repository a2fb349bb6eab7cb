//! Engine Configuration
//!
//! `EngineConfig` describes the level hierarchy and the priority-adjustment
//! thresholds. `EngineConfigSpec` is its signed counterpart read from
//! scenario files. `RunConfig` holds the knobs that do not affect scheduling
//! decisions, currently only pacing.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::types::SchedulerError;

/// Default quanta: four levels, growing quantum toward lower priority
pub const DEFAULT_QUANTA: [u32; 4] = [2, 4, 6, 8];

/// Default aging threshold (waiting units before promotion)
pub const DEFAULT_AGING_THRESHOLD: u32 = 10;

/// Default de-aging threshold (consecutive CPU units before demotion)
pub const DEFAULT_DE_AGING_THRESHOLD: u32 = 6;

/// Level hierarchy and priority-adjustment thresholds
///
/// `quanta[i]` is the quantum of level `i + 1`. A threshold of `0` disables
/// the corresponding mechanism.
///
/// # Example
///
/// ```rust
/// use mlfq_twin::domain::scheduler::EngineConfig;
///
/// let config = EngineConfig::new(vec![2, 4, 8])
///     .with_aging(5)
///     .with_de_aging(0);
///
/// assert_eq!(config.level_count(), 3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineConfig {
    /// Per-level quanta, index 0 = highest priority
    pub quanta: Vec<u32>,
    /// Waiting units that trigger a promotion, `0` = disabled
    pub aging_threshold: u32,
    /// Consecutive CPU units that trigger a demotion, `0` = disabled
    pub de_aging_threshold: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            quanta: DEFAULT_QUANTA.to_vec(),
            aging_threshold: DEFAULT_AGING_THRESHOLD,
            de_aging_threshold: DEFAULT_DE_AGING_THRESHOLD,
        }
    }
}

impl EngineConfig {
    /// Configuration with both mechanisms disabled
    pub fn new(quanta: Vec<u32>) -> Self {
        Self {
            quanta,
            aging_threshold: 0,
            de_aging_threshold: 0,
        }
    }

    /// Set the aging threshold
    #[must_use]
    pub fn with_aging(mut self, threshold: u32) -> Self {
        self.aging_threshold = threshold;
        self
    }

    /// Set the de-aging threshold
    #[must_use]
    pub fn with_de_aging(mut self, threshold: u32) -> Self {
        self.de_aging_threshold = threshold;
        self
    }

    /// Number of priority levels
    #[inline]
    pub fn level_count(&self) -> usize {
        self.quanta.len()
    }

    /// Whether aging is active
    #[inline]
    pub fn aging_enabled(&self) -> bool {
        self.aging_threshold > 0
    }

    /// Whether de-aging is active
    #[inline]
    pub fn de_aging_enabled(&self) -> bool {
        self.de_aging_threshold > 0
    }

    /// Check the level hierarchy
    ///
    /// # Errors
    ///
    /// - `NoLevels` for an empty quanta list
    /// - `InvalidQuantum` for the first zero quantum
    pub fn validate(&self) -> Result<(), SchedulerError> {
        if self.quanta.is_empty() {
            return Err(SchedulerError::NoLevels);
        }
        if let Some((index, quantum)) = self.quanta.iter().enumerate().find(|(_, q)| **q == 0) {
            return Err(SchedulerError::InvalidQuantum {
                level: index + 1,
                quantum: i64::from(*quantum),
            });
        }
        Ok(())
    }
}

/// Engine configuration as written in a scenario file
///
/// Signed, so that negative values are reported as configuration errors
/// instead of parse failures. Thresholds left out of a present `config`
/// section are disabled; a missing section means [`EngineConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfigSpec {
    /// Per-level quanta, index 0 = highest priority
    pub quanta: Vec<i64>,
    /// Waiting units that trigger a promotion
    #[serde(default)]
    pub aging_threshold: i64,
    /// Consecutive CPU units that trigger a demotion
    #[serde(default)]
    pub de_aging_threshold: i64,
}

impl Default for EngineConfigSpec {
    fn default() -> Self {
        Self::from(&EngineConfig::default())
    }
}

impl From<&EngineConfig> for EngineConfigSpec {
    fn from(config: &EngineConfig) -> Self {
        Self {
            quanta: config.quanta.iter().copied().map(i64::from).collect(),
            aging_threshold: i64::from(config.aging_threshold),
            de_aging_threshold: i64::from(config.de_aging_threshold),
        }
    }
}

impl EngineConfigSpec {
    /// Convert into a validated [`EngineConfig`]
    ///
    /// # Errors
    ///
    /// - `NoLevels` for an empty quanta list
    /// - `InvalidQuantum` for the first quantum outside `1..=u32::MAX`
    /// - `InvalidThreshold` for a threshold outside `0..=u32::MAX`
    pub fn into_config(self) -> Result<EngineConfig, SchedulerError> {
        let quanta = self
            .quanta
            .iter()
            .enumerate()
            .map(|(index, &quantum)| {
                u32::try_from(quantum)
                    .ok()
                    .filter(|q| *q > 0)
                    .ok_or(SchedulerError::InvalidQuantum {
                        level: index + 1,
                        quantum,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let config = EngineConfig {
            quanta,
            aging_threshold: threshold("aging", self.aging_threshold)?,
            de_aging_threshold: threshold("de-aging", self.de_aging_threshold)?,
        };
        config.validate()?;
        Ok(config)
    }
}

fn threshold(name: &'static str, value: i64) -> Result<u32, SchedulerError> {
    u32::try_from(value).map_err(|_| SchedulerError::InvalidThreshold { name, value })
}

/// Knobs that do not influence scheduling decisions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Artificial delay after each turn, in milliseconds; `0` = no pacing
    #[serde(default)]
    pub pacing_ms: u64,
}

impl RunConfig {
    /// Pacing delay, `None` when pacing is off
    pub fn pacing(&self) -> Option<Duration> {
        (self.pacing_ms > 0).then(|| Duration::from_millis(self.pacing_ms))
    }
}
