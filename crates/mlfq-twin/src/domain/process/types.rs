//! Process Types
//!
//! # Overview
//!
//! This module defines the per-process state the engine mutates while it
//! simulates the CPU. A `ProcessRecord` is a plain value holder: it has no
//! change-notification wiring of its own. The engine pushes snapshots to
//! observers after each batch of mutations instead.
//!
//! # Lifecycle
//!
//! ```text
//! PENDING ──arrival──> RESIDENT(level i) ──remaining = 0──> FINISHED
//!                         │      ↑
//!                         └──────┘   aging (i - 1) / de-aging (i + 1)
//! ```
//!
//! Exactly one of the three holds at any instant. `FINISHED` is terminal.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::clock::TimeUnit;

/// Opaque, stable process identifier
///
/// Unique per engine. Identifiers are never reused within a run.
///
/// # Example
///
/// ```rust
/// use mlfq_twin::domain::process::ProcessId;
///
/// let a = ProcessId::new("P1");
/// let b = ProcessId::auto(2);
///
/// assert_eq!(a.as_str(), "P1");
/// assert_eq!(b.as_str(), "P2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessId(String);

impl ProcessId {
    /// Create an identifier from any string-like value
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier assigned to the `n`-th submitted process (`P<n>`, 1-based)
    pub fn auto(n: usize) -> Self {
        Self(format!("P{n}"))
    }

    /// Borrow the raw identifier
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProcessId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Where a record currently lives
///
/// Derived from the record's bookkeeping; the engine keeps the residency
/// of every record consistent with exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Residency {
    /// Submitted but its arrival time has not been reached
    Pending,
    /// Resident in the level queue with this index (0 = highest priority)
    Queued(usize),
    /// Currently on the CPU (dequeued from `level`)
    Running(usize),
    /// Remaining time reached zero; removed from scheduling for good
    Finished,
}

impl fmt::Display for Residency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Residency::Pending => write!(f, "PENDING"),
            Residency::Queued(level) => write!(f, "QUEUED(Q{})", level + 1),
            Residency::Running(level) => write!(f, "RUNNING(Q{})", level + 1),
            Residency::Finished => write!(f, "FINISHED"),
        }
    }
}

/// Mutable state of one simulated process
///
/// # Field Semantics
///
/// - `remaining_time` starts at `burst_time` and only ever decreases.
/// - `waiting_time` counts units spent eligible-but-not-running since the
///   last reset (arrival, dispatch, promotion).
/// - `cpu_time_used` counts consecutive CPU units at the *current* level;
///   reset on arrival and on demotion.
/// - `total_cpu_time` counts every CPU unit over the record's lifetime and is
///   never reset. For a finished record it equals `burst_time`.
/// - `current_queue_index` is for reporting only: `None` while pending or
///   after finishing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    id: ProcessId,
    burst_time: TimeUnit,
    remaining_time: TimeUnit,
    priority: usize,
    arrival_time: TimeUnit,
    waiting_time: TimeUnit,
    cpu_time_used: TimeUnit,
    total_cpu_time: TimeUnit,
    current_queue_index: Option<usize>,
    running: bool,
    finished: bool,
    completion_time: Option<TimeUnit>,
    promotions: u32,
    demotions: u32,
}

impl ProcessRecord {
    /// Create a new record
    ///
    /// The priority range is checked when the record is submitted to an
    /// engine, because only the engine knows its level count.
    pub fn new(
        id: impl Into<ProcessId>,
        burst_time: TimeUnit,
        priority: usize,
        arrival_time: TimeUnit,
    ) -> Self {
        Self {
            id: id.into(),
            burst_time,
            remaining_time: burst_time,
            priority,
            arrival_time,
            waiting_time: 0,
            cpu_time_used: 0,
            total_cpu_time: 0,
            current_queue_index: None,
            running: false,
            finished: false,
            completion_time: None,
            promotions: 0,
            demotions: 0,
        }
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Accessors
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Process identifier
    #[inline]
    pub fn id(&self) -> &ProcessId {
        &self.id
    }

    /// Total CPU time required
    #[inline]
    pub fn burst_time(&self) -> TimeUnit {
        self.burst_time
    }

    /// CPU time still required
    #[inline]
    pub fn remaining_time(&self) -> TimeUnit {
        self.remaining_time
    }

    /// Current level, 1-based (1 = highest priority)
    #[inline]
    pub fn priority(&self) -> usize {
        self.priority
    }

    /// Simulated time at which the process becomes eligible to run
    #[inline]
    pub fn arrival_time(&self) -> TimeUnit {
        self.arrival_time
    }

    /// Units spent waiting since the last reset
    #[inline]
    pub fn waiting_time(&self) -> TimeUnit {
        self.waiting_time
    }

    /// Consecutive CPU units at the current level
    #[inline]
    pub fn cpu_time_used(&self) -> TimeUnit {
        self.cpu_time_used
    }

    /// CPU units consumed over the whole lifetime
    #[inline]
    pub fn total_cpu_time(&self) -> TimeUnit {
        self.total_cpu_time
    }

    /// Level queue index the record occupies, for reporting
    #[inline]
    pub fn current_queue_index(&self) -> Option<usize> {
        self.current_queue_index
    }

    /// Whether the record is the active CPU occupant
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether the record reached its terminal state
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Global time at which the record finished
    #[inline]
    pub fn completion_time(&self) -> Option<TimeUnit> {
        self.completion_time
    }

    /// Number of aging promotions
    #[inline]
    pub fn promotions(&self) -> u32 {
        self.promotions
    }

    /// Number of de-aging demotions
    #[inline]
    pub fn demotions(&self) -> u32 {
        self.demotions
    }

    /// Where the record currently lives
    pub fn residency(&self) -> Residency {
        if self.finished {
            Residency::Finished
        } else if let Some(level) = self.current_queue_index {
            if self.running {
                Residency::Running(level)
            } else {
                Residency::Queued(level)
            }
        } else {
            Residency::Pending
        }
    }

    /// Read-only copy for observers
    pub fn snapshot(&self) -> ProcessSnapshot {
        ProcessSnapshot {
            id: self.id.clone(),
            priority: self.priority,
            remaining_time: self.remaining_time,
            burst_time: self.burst_time,
            current_queue_index: self.current_queue_index,
        }
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Pre-run edits (validated by the engine)
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    pub(crate) fn set_priority(&mut self, priority: usize) {
        self.priority = priority;
    }

    /// Changing the burst time also refills the remaining time.
    pub(crate) fn set_burst_time(&mut self, burst_time: TimeUnit) {
        self.burst_time = burst_time;
        self.remaining_time = burst_time;
    }

    pub(crate) fn set_arrival_time(&mut self, arrival_time: TimeUnit) {
        self.arrival_time = arrival_time;
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Engine bookkeeping
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Arrival into `level`: both counters start from zero.
    pub(crate) fn admit(&mut self, level: usize) {
        self.waiting_time = 0;
        self.cpu_time_used = 0;
        self.current_queue_index = Some(level);
    }

    /// Becomes the CPU occupant.
    pub(crate) fn dispatch(&mut self) {
        assert!(!self.finished, "dispatch of finished process {}", self.id);
        self.running = true;
        self.waiting_time = 0;
    }

    /// One unit of CPU.
    pub(crate) fn execute_unit(&mut self) {
        debug_assert!(self.running, "{} executed while not running", self.id);
        debug_assert!(self.remaining_time > 0, "{} executed with no work left", self.id);
        self.remaining_time -= 1;
        self.cpu_time_used += 1;
        self.total_cpu_time += 1;
    }

    pub(crate) fn increment_waiting_time(&mut self) {
        self.waiting_time += 1;
    }

    /// Leaves the CPU, staying resident at its current level.
    pub(crate) fn preempt(&mut self) {
        self.running = false;
    }

    /// Move one level down, i.e. `priority + 1`.
    pub(crate) fn demote(&mut self) {
        self.priority += 1;
        self.cpu_time_used = 0;
        self.current_queue_index = Some(self.priority - 1);
        self.running = false;
        self.demotions += 1;
    }

    /// Move one level up, i.e. `priority - 1`.
    pub(crate) fn promote(&mut self) {
        debug_assert!(self.priority > 1, "{} promoted past level 1", self.id);
        self.priority -= 1;
        self.waiting_time = 0;
        self.current_queue_index = Some(self.priority - 1);
        self.promotions += 1;
    }

    pub(crate) fn finish(&mut self, now: TimeUnit) {
        self.running = false;
        self.finished = true;
        self.current_queue_index = None;
        self.completion_time = Some(now);
    }
}

/// Read-only view of a record delivered to observers
///
/// Observers may run on another thread, so they receive owned copies instead
/// of references into engine state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSnapshot {
    /// Process identifier
    pub id: ProcessId,
    /// Current level, 1-based
    pub priority: usize,
    /// CPU time still required
    pub remaining_time: TimeUnit,
    /// Total CPU time required
    pub burst_time: TimeUnit,
    /// Occupied level index, `None` when pending or finished
    pub current_queue_index: Option<usize>,
}

/// Process description as it appears at the configuration boundary
///
/// Uses signed integers so that negative values can be reported as
/// configuration errors instead of parse failures. Converted into a
/// `ProcessRecord` by [`ProcessSpec::into_record`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    /// Identifier; assigned `P<n>` from the submission position when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Total CPU time required
    pub burst_time: i64,
    /// Initial level, 1-based
    pub priority: i64,
    /// Arrival time
    #[serde(default)]
    pub arrival_time: i64,
}

impl ProcessSpec {
    /// Convenience constructor with an explicit id
    pub fn new(id: impl Into<String>, burst_time: i64, priority: i64, arrival_time: i64) -> Self {
        Self {
            id: Some(id.into()),
            burst_time,
            priority,
            arrival_time,
        }
    }

    /// Convert into a record
    ///
    /// `position` is the 1-based submission position, used to name records
    /// without an explicit id.
    ///
    /// # Errors
    ///
    /// Negative burst or arrival times and non-positive priorities are
    /// rejected. The upper priority bound is checked by the engine.
    pub fn into_record(
        self,
        position: usize,
    ) -> Result<ProcessRecord, crate::domain::scheduler::SchedulerError> {
        use crate::domain::scheduler::SchedulerError;

        let id = self.id.map_or_else(|| ProcessId::auto(position), ProcessId::new);

        let burst_time = TimeUnit::try_from(self.burst_time).map_err(|_| {
            SchedulerError::NegativeBurstTime {
                id: id.clone(),
                burst_time: self.burst_time,
            }
        })?;
        let arrival_time = TimeUnit::try_from(self.arrival_time).map_err(|_| {
            SchedulerError::NegativeArrivalTime {
                id: id.clone(),
                arrival_time: self.arrival_time,
            }
        })?;
        let priority = usize::try_from(self.priority)
            .ok()
            .filter(|p| *p >= 1)
            .ok_or_else(|| SchedulerError::PriorityOutOfRange {
                id: id.clone(),
                priority: self.priority,
                levels: None,
            })?;

        Ok(ProcessRecord::new(id, burst_time, priority, arrival_time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::scheduler::SchedulerError;

    #[test]
    fn test_new_record_starts_pending() {
        let p = ProcessRecord::new("P1", 5, 2, 3);
        assert_eq!(p.remaining_time(), 5);
        assert_eq!(p.waiting_time(), 0);
        assert_eq!(p.cpu_time_used(), 0);
        assert_eq!(p.current_queue_index(), None);
        assert_eq!(p.residency(), Residency::Pending);
        assert!(!p.is_running());
    }

    #[test]
    fn test_lifecycle_bookkeeping() {
        let mut p = ProcessRecord::new("P1", 2, 1, 0);
        p.admit(0);
        assert_eq!(p.residency(), Residency::Queued(0));

        p.increment_waiting_time();
        p.dispatch();
        assert_eq!(p.waiting_time(), 0);
        assert_eq!(p.residency(), Residency::Running(0));

        p.execute_unit();
        p.execute_unit();
        assert_eq!(p.remaining_time(), 0);
        assert_eq!(p.cpu_time_used(), 2);

        p.finish(7);
        assert_eq!(p.residency(), Residency::Finished);
        assert_eq!(p.completion_time(), Some(7));
        assert_eq!(p.total_cpu_time(), 2);
    }

    #[test]
    fn test_demote_resets_cpu_counter() {
        let mut p = ProcessRecord::new("P1", 10, 1, 0);
        p.admit(0);
        p.dispatch();
        p.execute_unit();
        p.execute_unit();
        p.demote();

        assert_eq!(p.priority(), 2);
        assert_eq!(p.cpu_time_used(), 0);
        assert_eq!(p.total_cpu_time(), 2);
        assert_eq!(p.current_queue_index(), Some(1));
        assert!(!p.is_running());
        assert_eq!(p.demotions(), 1);
    }

    #[test]
    fn test_promote_resets_waiting() {
        let mut p = ProcessRecord::new("P1", 10, 3, 0);
        p.admit(2);
        p.increment_waiting_time();
        p.promote();

        assert_eq!(p.priority(), 2);
        assert_eq!(p.waiting_time(), 0);
        assert_eq!(p.current_queue_index(), Some(1));
        assert_eq!(p.promotions(), 1);
    }

    #[test]
    #[should_panic(expected = "dispatch of finished process")]
    fn test_dispatch_finished_is_fatal() {
        let mut p = ProcessRecord::new("P1", 0, 1, 0);
        p.finish(0);
        p.dispatch();
    }

    #[test]
    fn test_process_spec_auto_id() {
        let spec = ProcessSpec {
            id: None,
            burst_time: 4,
            priority: 1,
            arrival_time: 0,
        };
        let record = spec.into_record(3).unwrap();
        assert_eq!(record.id().as_str(), "P3");
    }

    #[test]
    fn test_process_spec_rejects_negative_values() {
        let err = ProcessSpec::new("X", -1, 1, 0).into_record(1).unwrap_err();
        assert!(matches!(err, SchedulerError::NegativeBurstTime { burst_time: -1, .. }));

        let err = ProcessSpec::new("X", 1, 1, -4).into_record(1).unwrap_err();
        assert!(matches!(err, SchedulerError::NegativeArrivalTime { arrival_time: -4, .. }));

        let err = ProcessSpec::new("X", 1, 0, 0).into_record(1).unwrap_err();
        assert!(matches!(err, SchedulerError::PriorityOutOfRange { priority: 0, .. }));
    }

    #[test]
    fn test_process_spec_json_shape() {
        let spec: ProcessSpec =
            serde_json::from_str(r#"{"burst_time": 7, "priority": 2}"#).unwrap();
        assert_eq!(spec.id, None);
        assert_eq!(spec.arrival_time, 0);
    }
}
