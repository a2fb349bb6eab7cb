//! Run Summary
//!
//! Completion statistics computed from the process table once the run loop
//! returns. For cancelled runs, unfinished records report `None` for every
//! completion-derived figure.

use serde::{Deserialize, Serialize};

use super::types::RunOutcome;
use crate::domain::clock::TimeUnit;
use crate::domain::process::{ProcessId, ProcessRecord, Residency};

/// Per-process statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessStats {
    /// Process identifier
    pub id: ProcessId,
    /// Arrival time
    pub arrival_time: TimeUnit,
    /// Total CPU time required
    pub burst_time: TimeUnit,
    /// CPU time actually consumed
    pub cpu_time: TimeUnit,
    /// Global time of completion
    pub completion_time: Option<TimeUnit>,
    /// `completion - arrival`
    pub turnaround_time: Option<TimeUnit>,
    /// `turnaround - burst`: every unit spent resident but not running
    pub waiting_time: Option<TimeUnit>,
    /// Level at the end of the run
    pub final_priority: usize,
    /// Aging promotions
    pub promotions: u32,
    /// De-aging demotions
    pub demotions: u32,
    /// Where the record was left
    pub residency: Residency,
}

impl From<&ProcessRecord> for ProcessStats {
    fn from(record: &ProcessRecord) -> Self {
        let completion_time = record.completion_time();
        let turnaround_time = completion_time.map(|c| c - record.arrival_time());
        Self {
            id: record.id().clone(),
            arrival_time: record.arrival_time(),
            burst_time: record.burst_time(),
            cpu_time: record.total_cpu_time(),
            completion_time,
            turnaround_time,
            waiting_time: turnaround_time.map(|t| t - record.burst_time()),
            final_priority: record.priority(),
            promotions: record.promotions(),
            demotions: record.demotions(),
            residency: record.residency(),
        }
    }
}

/// Result of `SchedulingEngine::schedule`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// How the run ended
    pub outcome: RunOutcome,
    /// Global time when the loop stopped
    pub elapsed: TimeUnit,
    /// Units without a CPU occupant
    pub idle_units: TimeUnit,
    /// Units spent executing processes
    pub busy_units: TimeUnit,
    /// Statistics in submission order
    pub processes: Vec<ProcessStats>,
}

impl RunSummary {
    /// Whether every process finished
    pub fn is_complete(&self) -> bool {
        self.outcome == RunOutcome::Completed
    }

    /// Number of finished processes
    pub fn finished_count(&self) -> usize {
        self.processes
            .iter()
            .filter(|p| p.completion_time.is_some())
            .count()
    }

    /// Statistics for one process
    pub fn process(&self, id: &ProcessId) -> Option<&ProcessStats> {
        self.processes.iter().find(|p| &p.id == id)
    }

    /// Mean turnaround over finished processes
    pub fn average_turnaround(&self) -> Option<f64> {
        mean(self.processes.iter().filter_map(|p| p.turnaround_time))
    }

    /// Mean waiting time over finished processes
    pub fn average_waiting(&self) -> Option<f64> {
        mean(self.processes.iter().filter_map(|p| p.waiting_time))
    }

    /// Fraction of elapsed units spent executing
    pub fn cpu_utilization(&self) -> Option<f64> {
        (self.elapsed > 0).then(|| self.busy_units as f64 / self.elapsed as f64)
    }
}

fn mean(values: impl Iterator<Item = TimeUnit>) -> Option<f64> {
    let (sum, count) = values.fold((0u64, 0u64), |(s, c), v| (s + v, c + 1));
    (count > 0).then(|| sum as f64 / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finished(id: &str, arrival: u64, burst: u64, completion: u64) -> ProcessStats {
        ProcessStats {
            id: id.into(),
            arrival_time: arrival,
            burst_time: burst,
            cpu_time: burst,
            completion_time: Some(completion),
            turnaround_time: Some(completion - arrival),
            waiting_time: Some(completion - arrival - burst),
            final_priority: 1,
            promotions: 0,
            demotions: 0,
            residency: Residency::Finished,
        }
    }

    #[test]
    fn test_stats_from_record() {
        let record = ProcessRecord::new("P1", 3, 2, 1);
        let stats = ProcessStats::from(&record);
        assert_eq!(stats.completion_time, None);
        assert_eq!(stats.waiting_time, None);
        assert_eq!(stats.residency, Residency::Pending);
        assert_eq!(stats.final_priority, 2);
    }

    #[test]
    fn test_averages() {
        let summary = RunSummary {
            outcome: RunOutcome::Completed,
            elapsed: 10,
            idle_units: 2,
            busy_units: 8,
            processes: vec![finished("P1", 0, 4, 6), finished("P2", 2, 4, 10)],
        };

        assert!(summary.is_complete());
        assert_eq!(summary.finished_count(), 2);
        assert_eq!(summary.average_turnaround(), Some(7.0));
        assert_eq!(summary.average_waiting(), Some(3.0));
        assert_eq!(summary.cpu_utilization(), Some(0.8));
        assert_eq!(summary.process(&"P2".into()).map(|p| p.arrival_time), Some(2));
    }

    #[test]
    fn test_empty_summary_has_no_averages() {
        let summary = RunSummary {
            outcome: RunOutcome::Cancelled,
            elapsed: 0,
            idle_units: 0,
            busy_units: 0,
            processes: vec![],
        };
        assert_eq!(summary.average_turnaround(), None);
        assert_eq!(summary.cpu_utilization(), None);
    }
}
