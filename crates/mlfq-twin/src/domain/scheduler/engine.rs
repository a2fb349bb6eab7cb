//! Scheduling Engine - The MLFQ Run Loop
//!
//! # Architecture
//!
//! ```text
//! SchedulingEngine<O, P>
//!   ├─ levels:  Vec<LevelQueue>      (index 0 = highest priority)
//!   ├─ table:   Vec<ProcessRecord>   (owns every record, indexed by slot)
//!   ├─ pending: Vec<ProcessSlot>     (sorted by arrival, then submission)
//!   ├─ clock:   SimClock
//!   ├─ trace:   TraceLog
//!   ├─ observer: O                   (static dispatch)
//!   └─ pacer:    P                   (static dispatch)
//! ```
//!
//! # One Turn
//!
//! 1. Release arrivals (`arrival_time <= now`) into `levels[priority - 1]`.
//! 2. Pick the first non-empty level. Nothing resident: idle one unit if
//!    something is still pending, otherwise the run is complete.
//! 3. Dispatch the head of that level.
//! 4. Execute `min(remaining, quantum)` units, one at a time. After each unit
//!    every resident record waits one unit more. Sustained CPU use at the
//!    current level demotes the occupant and forfeits the rest of the slice.
//! 5. Slice done: finished records leave for good, the rest go to the tail.
//! 6. Aging sweep, lowest level first; level 0 is never a source.
//! 7. Notify observers and pace.
//!
//! Selection is strict priority at the start of a turn only. A higher-level
//! arrival never interrupts a slice in progress.

use tracing::{debug, info, trace, warn};

use super::cancel::CancellationToken;
use super::config::EngineConfig;
use super::observer::{ChannelObserver, NoopObserver, QueueSnapshot, SchedulerObserver};
use super::pacing::{FixedDelay, NoPacing, Pacer};
use super::summary::{ProcessStats, RunSummary};
use super::types::{EngineState, RunOutcome, SchedulerError};
use crate::domain::clock::{SimClock, TimeUnit};
use crate::domain::process::{ProcessId, ProcessRecord, ProcessSnapshot, ProcessSpec};
use crate::domain::queue::{LevelQueue, ProcessSlot};
use crate::domain::trace::{TraceEvent, TraceEventKind, TraceLog};

/// Engine without observer or pacing, for batch runs and tests
pub type HeadlessEngine = SchedulingEngine<NoopObserver, NoPacing>;

/// Engine that streams notifications over a channel and paces each turn
pub type InteractiveEngine = SchedulingEngine<ChannelObserver, FixedDelay>;

/// How a single turn ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TurnEnd {
    /// Quantum used up, process back at the tail of its level
    Expired,
    /// Remaining time reached zero
    Finished,
    /// Demoted mid-slice
    DeAged,
    /// Cancellation observed mid-slice
    Cancelled,
}

/// Multi-level feedback queue scheduling engine
///
/// Single-shot: submit processes, call [`schedule`](Self::schedule) once,
/// then inspect the records and the trace. A new run needs a new engine.
///
/// # Example
///
/// ```rust
/// use mlfq_twin::domain::process::ProcessRecord;
/// use mlfq_twin::domain::scheduler::{EngineConfig, RunOutcome, SchedulingEngine};
///
/// let mut engine = SchedulingEngine::new(EngineConfig::new(vec![2, 4])).unwrap();
/// engine.add_process(ProcessRecord::new("P1", 3, 1, 0)).unwrap();
/// engine.add_process(ProcessRecord::new("P2", 2, 2, 1)).unwrap();
///
/// let summary = engine.schedule().unwrap();
/// assert_eq!(summary.outcome, RunOutcome::Completed);
/// assert_eq!(summary.elapsed, 5);
/// ```
#[derive(Debug)]
pub struct SchedulingEngine<O: SchedulerObserver = NoopObserver, P: Pacer = NoPacing> {
    config: EngineConfig,
    levels: Vec<LevelQueue>,
    table: Vec<ProcessRecord>,
    pending: Vec<ProcessSlot>,
    clock: SimClock,
    trace: TraceLog,
    occupant: Option<ProcessSlot>,
    state: EngineState,
    observer: O,
    pacer: P,
    cancel: CancellationToken,
}

impl SchedulingEngine {
    /// Create a headless engine
    ///
    /// # Errors
    ///
    /// Configuration errors from [`EngineConfig::validate`].
    pub fn new(config: EngineConfig) -> Result<Self, SchedulerError> {
        Self::with_parts(config, NoopObserver, NoPacing)
    }
}

impl<O: SchedulerObserver, P: Pacer> SchedulingEngine<O, P> {
    /// Create an engine with an explicit observer and pacer
    ///
    /// # Errors
    ///
    /// Configuration errors from [`EngineConfig::validate`].
    pub fn with_parts(
        config: EngineConfig,
        observer: O,
        pacer: P,
    ) -> Result<Self, SchedulerError> {
        config.validate()?;
        let levels = config
            .quanta
            .iter()
            .map(|q| LevelQueue::new(TimeUnit::from(*q)))
            .collect();

        Ok(Self {
            config,
            levels,
            table: Vec::new(),
            pending: Vec::new(),
            clock: SimClock::new(),
            trace: TraceLog::new(),
            occupant: None,
            state: EngineState::Ready,
            observer,
            pacer,
            cancel: CancellationToken::new(),
        })
    }

    /// Use an externally created cancellation token
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Submission & Pre-run Edits
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Submit a record
    ///
    /// # Errors
    ///
    /// - `AlreadyStarted` once `schedule()` has been called
    /// - `PriorityOutOfRange` unless `1 <= priority <= level_count`
    /// - `DuplicateProcessId` if the id is taken
    /// - `InvariantViolation` for a record that already ran elsewhere
    pub fn add_process(&mut self, record: ProcessRecord) -> Result<ProcessSlot, SchedulerError> {
        self.ensure_ready()?;
        self.check_priority(record.id(), record.priority())?;
        if self.find(record.id()).is_some() {
            return Err(SchedulerError::DuplicateProcessId(record.id().clone()));
        }
        if record.is_finished()
            || record.current_queue_index().is_some()
            || record.total_cpu_time() > 0
        {
            return Err(SchedulerError::InvariantViolation(format!(
                "submitted record {} is not fresh",
                record.id()
            )));
        }

        let slot = ProcessSlot::new(self.table.len());
        debug!(
            process = %record.id(),
            burst = record.burst_time(),
            priority = record.priority(),
            arrival = record.arrival_time(),
            "process submitted"
        );
        self.table.push(record);
        self.insert_pending(slot);
        Ok(slot)
    }

    /// Submit a configuration-boundary description
    ///
    /// A missing id becomes `P<n>`, `n` being the submission position.
    ///
    /// # Errors
    ///
    /// Validation errors from [`ProcessSpec::into_record`] and from
    /// [`add_process`](Self::add_process).
    pub fn add_spec(&mut self, spec: ProcessSpec) -> Result<ProcessSlot, SchedulerError> {
        self.ensure_ready()?;
        let record = spec.into_record(self.table.len() + 1)?;
        self.add_process(record)
    }

    /// Submit a process named after its submission position (`P<n>`)
    ///
    /// # Errors
    ///
    /// Same as [`add_process`](Self::add_process).
    pub fn add_new_process(
        &mut self,
        burst_time: TimeUnit,
        priority: usize,
        arrival_time: TimeUnit,
    ) -> Result<ProcessSlot, SchedulerError> {
        let id = ProcessId::auto(self.table.len() + 1);
        self.add_process(ProcessRecord::new(id, burst_time, priority, arrival_time))
    }

    /// Change the initial priority of a submitted record
    ///
    /// # Errors
    ///
    /// `AlreadyStarted`, `UnknownProcess` or `PriorityOutOfRange`.
    pub fn set_priority(&mut self, id: &ProcessId, priority: usize) -> Result<(), SchedulerError> {
        self.ensure_ready()?;
        let slot = self.slot_of(id)?;
        self.check_priority(id, priority)?;
        self.table[slot.as_usize()].set_priority(priority);
        Ok(())
    }

    /// Change the burst time (and remaining time) of a submitted record
    ///
    /// # Errors
    ///
    /// `AlreadyStarted` or `UnknownProcess`.
    pub fn set_burst_time(
        &mut self,
        id: &ProcessId,
        burst_time: TimeUnit,
    ) -> Result<(), SchedulerError> {
        self.ensure_ready()?;
        let slot = self.slot_of(id)?;
        self.table[slot.as_usize()].set_burst_time(burst_time);
        Ok(())
    }

    /// Change the arrival time of a submitted record
    ///
    /// The pending order is recomputed; ties still go by submission order.
    ///
    /// # Errors
    ///
    /// `AlreadyStarted` or `UnknownProcess`.
    pub fn set_arrival_time(
        &mut self,
        id: &ProcessId,
        arrival_time: TimeUnit,
    ) -> Result<(), SchedulerError> {
        self.ensure_ready()?;
        let slot = self.slot_of(id)?;
        self.pending.retain(|s| *s != slot);
        self.table[slot.as_usize()].set_arrival_time(arrival_time);
        self.insert_pending(slot);
        Ok(())
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Queries
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Configuration the engine was built with
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Number of priority levels
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Current global time
    pub fn now(&self) -> TimeUnit {
        self.clock.now()
    }

    /// Lifecycle state
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// The scheduling trace recorded so far
    pub fn trace(&self) -> &TraceLog {
        &self.trace
    }

    /// Every submitted record, in submission order
    pub fn records(&self) -> &[ProcessRecord] {
        &self.table
    }

    /// Look up a record by id
    pub fn record(&self, id: &ProcessId) -> Option<&ProcessRecord> {
        self.find(id).map(|slot| &self.table[slot.as_usize()])
    }

    /// Number of records still waiting for their arrival time
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// The current CPU occupant
    pub fn cpu_occupant(&self) -> Option<&ProcessId> {
        self.occupant.map(|slot| self.table[slot.as_usize()].id())
    }

    /// Residents of one level, head first; empty for an out-of-range index
    pub fn processes_in_level(&self, index: usize) -> Vec<ProcessSnapshot> {
        self.levels.get(index).map_or_else(Vec::new, |level| {
            level
                .iter()
                .map(|slot| self.table[slot.as_usize()].snapshot())
                .collect()
        })
    }

    /// Contents of every level
    pub fn queue_snapshot(&self) -> QueueSnapshot {
        QueueSnapshot {
            time: self.clock.now(),
            levels: (0..self.levels.len())
                .map(|index| self.processes_in_level(index))
                .collect(),
        }
    }

    /// The observer the engine notifies
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// A handle that cancels this engine's run
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Whether nothing is pending and every level is empty
    pub fn is_drained(&self) -> bool {
        self.pending.is_empty()
            && self.occupant.is_none()
            && self.levels.iter().all(LevelQueue::is_empty)
    }

    /// Check the residency and bookkeeping invariants
    ///
    /// Every record must be in exactly one of {pending, one level queue,
    /// on the CPU, finished}, its reported queue index and priority must
    /// agree with where it lives, and no CPU time may be lost or gained.
    ///
    /// # Errors
    ///
    /// `InvariantViolation` describing the first broken invariant.
    pub fn verify_invariants(&self) -> Result<(), SchedulerError> {
        let n = self.levels.len();
        for (index, record) in self.table.iter().enumerate() {
            let slot = ProcessSlot::new(index);
            let id = record.id();

            let in_pending = usize::from(self.pending.contains(&slot));
            let queues: Vec<usize> = (0..n).filter(|i| self.levels[*i].contains(slot)).collect();
            let on_cpu = usize::from(self.occupant == Some(slot));
            let finished = usize::from(record.is_finished());

            let places = in_pending + queues.len() + on_cpu + finished;
            if places != 1 {
                return Err(violation(format!("{id} resides in {places} places")));
            }
            if !(1..=n).contains(&record.priority()) {
                return Err(violation(format!(
                    "{id} has priority {} outside [1, {n}]",
                    record.priority()
                )));
            }
            if let Some(&level) = queues.first() {
                if record.current_queue_index() != Some(level) || record.priority() != level + 1 {
                    return Err(violation(format!(
                        "{id} in level {level} reports index {:?} and priority {}",
                        record.current_queue_index(),
                        record.priority()
                    )));
                }
            }
            if (in_pending + finished) == 1 && record.current_queue_index().is_some() {
                return Err(violation(format!("{id} is not resident but reports a queue index")));
            }
            if record.remaining_time() + record.total_cpu_time() != record.burst_time() {
                return Err(violation(format!("{id} lost or gained CPU time")));
            }
            if record.is_finished() && record.remaining_time() != 0 {
                return Err(violation(format!("{id} finished with work left")));
            }
            if !queues.is_empty() && record.remaining_time() == 0 && record.total_cpu_time() > 0 {
                return Err(violation(format!("{id} resident after its last unit")));
            }
        }

        let ordered = self
            .pending
            .windows(2)
            .all(|w| self.pending_key(w[0]) <= self.pending_key(w[1]));
        if !ordered {
            return Err(violation("pending list out of arrival order".to_string()));
        }
        Ok(())
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Run Loop
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Run to completion or cancellation
    ///
    /// Must be called at most once per engine.
    ///
    /// # Errors
    ///
    /// `AlreadyStarted` on a second call. Cancellation is not an error: it
    /// returns `Ok` with [`RunOutcome::Cancelled`].
    ///
    /// # Panics
    ///
    /// On an internal invariant violation, which is a bug in the engine.
    pub fn schedule(&mut self) -> Result<RunSummary, SchedulerError> {
        self.ensure_ready()?;
        self.state = EngineState::Running;
        info!(
            levels = self.levels.len(),
            processes = self.table.len(),
            aging = self.config.aging_threshold,
            de_aging = self.config.de_aging_threshold,
            "MLFQ run started"
        );
        self.notify_queues();

        let outcome = loop {
            if self.cancel.is_cancelled() {
                break RunOutcome::Cancelled;
            }

            self.release_arrivals();

            let Some((level, slot)) = self.dispatch_next() else {
                if self.pending.is_empty() {
                    break RunOutcome::Completed;
                }
                self.idle();
                continue;
            };

            if self.run_slice(level, slot) == TurnEnd::Cancelled {
                break RunOutcome::Cancelled;
            }

            self.aging_sweep();
            self.notify_queues();
            self.notify_cpu();
            self.assert_invariants();
            self.pacer.pace();
        };

        Ok(self.finish_run(outcome))
    }

    /// Step 1: move every due pending record into its level.
    fn release_arrivals(&mut self) {
        let now = self.clock.now();
        let due = self
            .pending
            .partition_point(|slot| self.table[slot.as_usize()].arrival_time() <= now);

        let arrived: Vec<ProcessSlot> = self.pending.drain(..due).collect();
        for slot in arrived {
            let record = &mut self.table[slot.as_usize()];
            let level = record.priority() - 1;
            record.admit(level);
            let kind = TraceEventKind::Arrived {
                process: record.id().clone(),
                level: level + 1,
            };
            self.levels[level].enqueue(slot);
            self.emit(kind);
        }
    }

    /// Steps 2 and 3: take the head of the first non-empty level.
    fn dispatch_next(&mut self) -> Option<(usize, ProcessSlot)> {
        let level = self.levels.iter().position(|q| !q.is_empty())?;
        let slot = self.levels[level].dequeue_head()?;
        Some((level, slot))
    }

    /// No resident process: one idle unit while waiting for an arrival.
    fn idle(&mut self) {
        self.clock.advance_idle();
        self.emit(TraceEventKind::Idle);
        self.notify_cpu();
        self.notify_queues();
        self.pacer.pace();
    }

    /// Steps 3 to 5 for the dispatched record.
    fn run_slice(&mut self, level: usize, slot: ProcessSlot) -> TurnEnd {
        let quantum = self.levels[level].quantum();
        let record = &mut self.table[slot.as_usize()];
        record.dispatch();
        let slice = record.remaining_time().min(quantum);
        let kind = TraceEventKind::Dispatched {
            process: record.id().clone(),
            level: level + 1,
            slice,
        };
        self.occupant = Some(slot);
        self.emit(kind);
        self.notify_cpu();

        for _ in 0..slice {
            if self.cancel.is_cancelled() {
                // Interrupted, not expired: keep its place at the head.
                self.table[slot.as_usize()].preempt();
                self.levels[level].requeue_front(slot);
                self.occupant = None;
                return TurnEnd::Cancelled;
            }

            self.execute_unit(slot, level);

            // A record that just ran its last unit finishes at this level.
            if self.table[slot.as_usize()].remaining_time() == 0 {
                break;
            }
            if self.should_de_age(slot) {
                self.de_age(slot);
                return TurnEnd::DeAged;
            }
        }

        self.occupant = None;
        let now = self.clock.now();
        let record = &mut self.table[slot.as_usize()];
        let process = record.id().clone();
        if record.remaining_time() == 0 {
            record.finish(now);
            self.emit(TraceEventKind::Finished { process });
            TurnEnd::Finished
        } else {
            record.preempt();
            self.levels[level].enqueue(slot);
            self.emit(TraceEventKind::Requeued {
                process,
                level: level + 1,
            });
            TurnEnd::Expired
        }
    }

    /// One unit of CPU for the occupant; every resident waits one unit.
    fn execute_unit(&mut self, slot: ProcessSlot, level: usize) {
        self.clock.advance();
        let record = &mut self.table[slot.as_usize()];
        record.execute_unit();

        let aging = TimeUnit::from(self.config.aging_threshold);
        let de_aging = TimeUnit::from(self.config.de_aging_threshold);
        let kind = TraceEventKind::Ran {
            process: record.id().clone(),
            level: level + 1,
            arrival: record.arrival_time(),
            remaining: record.remaining_time(),
            time_to_age: self
                .config
                .aging_enabled()
                .then(|| aging.saturating_sub(record.waiting_time())),
            time_to_de_age: self
                .config
                .de_aging_enabled()
                .then(|| de_aging.saturating_sub(record.cpu_time_used())),
        };
        self.emit(kind);

        for queue in &self.levels {
            for waiting in queue.iter() {
                let record = &mut self.table[waiting.as_usize()];
                debug_assert!(!record.is_running(), "{} waits while running", record.id());
                record.increment_waiting_time();
            }
        }
    }

    fn should_de_age(&self, slot: ProcessSlot) -> bool {
        let record = &self.table[slot.as_usize()];
        self.config.de_aging_enabled()
            && record.remaining_time() > 0
            && record.cpu_time_used() >= TimeUnit::from(self.config.de_aging_threshold)
            && record.priority() < self.levels.len()
    }

    /// Demote the occupant one level and forfeit the rest of its slice.
    fn de_age(&mut self, slot: ProcessSlot) {
        debug_assert!(
            self.levels.iter().all(|q| !q.contains(slot)),
            "occupant resident in a level queue"
        );
        let record = &mut self.table[slot.as_usize()];
        record.demote();
        let priority = record.priority();
        let kind = TraceEventKind::DeAged {
            process: record.id().clone(),
            level: priority,
        };
        self.levels[priority - 1].enqueue(slot);
        self.occupant = None;
        self.emit(kind);
        self.notify_queues();
        self.notify_cpu();
    }

    /// Step 6: promote every resident that waited long enough.
    ///
    /// Lowest level first. A promoted record has its waiting time reset, so
    /// it cannot qualify again at the next level in the same sweep.
    fn aging_sweep(&mut self) {
        if !self.config.aging_enabled() {
            return;
        }
        let threshold = TimeUnit::from(self.config.aging_threshold);

        for index in (1..self.levels.len()).rev() {
            let promoted: Vec<ProcessSlot> = self.levels[index]
                .iter()
                .filter(|slot| {
                    let record = &self.table[slot.as_usize()];
                    !record.is_running() && record.waiting_time() >= threshold
                })
                .collect();

            for slot in promoted {
                self.levels[index].remove(slot);
                let record = &mut self.table[slot.as_usize()];
                record.promote();
                let kind = TraceEventKind::AgedUp {
                    process: record.id().clone(),
                    level: record.priority(),
                };
                self.levels[index - 1].enqueue(slot);
                self.emit(kind);
            }
        }
    }

    fn finish_run(&mut self, outcome: RunOutcome) -> RunSummary {
        if outcome == RunOutcome::Cancelled {
            self.emit(TraceEventKind::Cancelled);
            warn!(time = self.clock.now(), "MLFQ run cancelled");
        }
        self.occupant = None;
        self.state = outcome.into();
        self.notify_queues();
        self.notify_cpu();
        self.assert_invariants();

        let summary = RunSummary {
            outcome,
            elapsed: self.clock.now(),
            idle_units: self.clock.idle_units(),
            busy_units: self.clock.busy_units(),
            processes: self.table.iter().map(ProcessStats::from).collect(),
        };
        info!(
            outcome = ?outcome,
            elapsed = summary.elapsed,
            idle = summary.idle_units,
            finished = summary.finished_count(),
            "MLFQ run finished"
        );
        summary
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Helpers
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    fn emit(&mut self, kind: TraceEventKind) {
        let event = TraceEvent::new(self.clock.now(), kind);
        if matches!(event.kind, TraceEventKind::Ran { .. }) {
            trace!(time = event.time, "{event}");
        } else {
            debug!(time = event.time, "{event}");
        }
        self.observer.on_trace(&event);
        self.trace.push(event);
    }

    fn notify_queues(&self) {
        self.observer.on_queues_changed(self.queue_snapshot());
    }

    fn notify_cpu(&self) {
        self.observer.on_cpu_changed(self.cpu_occupant().cloned());
    }

    fn assert_invariants(&self) {
        if cfg!(debug_assertions) {
            if let Err(err) = self.verify_invariants() {
                panic!("{err}");
            }
        }
    }

    fn ensure_ready(&self) -> Result<(), SchedulerError> {
        if self.state.accepts_submissions() {
            Ok(())
        } else {
            Err(SchedulerError::AlreadyStarted)
        }
    }

    fn check_priority(&self, id: &ProcessId, priority: usize) -> Result<(), SchedulerError> {
        if (1..=self.levels.len()).contains(&priority) {
            Ok(())
        } else {
            Err(SchedulerError::PriorityOutOfRange {
                id: id.clone(),
                priority: i64::try_from(priority).unwrap_or(i64::MAX),
                levels: Some(self.levels.len()),
            })
        }
    }

    fn find(&self, id: &ProcessId) -> Option<ProcessSlot> {
        self.table
            .iter()
            .position(|record| record.id() == id)
            .map(ProcessSlot::new)
    }

    fn slot_of(&self, id: &ProcessId) -> Result<ProcessSlot, SchedulerError> {
        self.find(id)
            .ok_or_else(|| SchedulerError::UnknownProcess(id.clone()))
    }

    fn pending_key(&self, slot: ProcessSlot) -> (TimeUnit, ProcessSlot) {
        (self.table[slot.as_usize()].arrival_time(), slot)
    }

    /// Insert keeping (arrival, submission) order.
    fn insert_pending(&mut self, slot: ProcessSlot) {
        let key = self.pending_key(slot);
        let pos = self.pending.partition_point(|s| self.pending_key(*s) < key);
        self.pending.insert(pos, slot);
    }
}

fn violation(message: String) -> SchedulerError {
    SchedulerError::InvariantViolation(message)
}
