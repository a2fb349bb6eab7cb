//! Observation Interface
//!
//! # Overview
//!
//! The engine pushes read-only snapshots to a [`SchedulerObserver`] after
//! each batch of mutations. Observers never see references into engine
//! state, so they may live on another thread (a UI thread, an async task).
//!
//! ```text
//! run loop ──on_queues_changed(QueueSnapshot)──┐
//!          ──on_cpu_changed(Option<ProcessId>)─┼──> observer
//!          ──on_trace(&TraceEvent)─────────────┘
//! ```
//!
//! Contract: callbacks must return promptly and must not call back into the
//! engine. `ChannelObserver` satisfies this by forwarding into an unbounded
//! channel, which never blocks the sender.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::domain::clock::TimeUnit;
use crate::domain::process::{ProcessId, ProcessSnapshot};
use crate::domain::trace::TraceEvent;

/// Contents of every level at one instant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueSnapshot {
    /// Global time of the snapshot
    pub time: TimeUnit,
    /// `levels[i]` lists the residents of level `i`, head first
    pub levels: Vec<Vec<ProcessSnapshot>>,
}

impl QueueSnapshot {
    /// Total number of resident records
    pub fn resident_count(&self) -> usize {
        self.levels.iter().map(Vec::len).sum()
    }

    /// Level index holding `id`, if resident
    pub fn level_of(&self, id: &ProcessId) -> Option<usize> {
        self.levels
            .iter()
            .position(|level| level.iter().any(|p| &p.id == id))
    }
}

/// Receiver of engine notifications
pub trait SchedulerObserver: Send {
    /// Queue contents changed
    fn on_queues_changed(&self, snapshot: QueueSnapshot);

    /// CPU occupant changed (`None` = idle or run over)
    fn on_cpu_changed(&self, occupant: Option<ProcessId>);

    /// A trace event was recorded
    fn on_trace(&self, _event: &TraceEvent) {}
}

impl<T: SchedulerObserver + Sync> SchedulerObserver for Arc<T> {
    fn on_queues_changed(&self, snapshot: QueueSnapshot) {
        (**self).on_queues_changed(snapshot);
    }

    fn on_cpu_changed(&self, occupant: Option<ProcessId>) {
        (**self).on_cpu_changed(occupant);
    }

    fn on_trace(&self, event: &TraceEvent) {
        (**self).on_trace(event);
    }
}

/// Observer that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SchedulerObserver for NoopObserver {
    #[inline(always)]
    fn on_queues_changed(&self, _snapshot: QueueSnapshot) {}

    #[inline(always)]
    fn on_cpu_changed(&self, _occupant: Option<ProcessId>) {}
}

/// One notification, as delivered over a channel or recorded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineNotification {
    /// See [`SchedulerObserver::on_queues_changed`]
    QueuesChanged(QueueSnapshot),
    /// See [`SchedulerObserver::on_cpu_changed`]
    CpuChanged(Option<ProcessId>),
    /// See [`SchedulerObserver::on_trace`]
    Trace(TraceEvent),
}

/// Forwards notifications into a tokio unbounded channel
///
/// If the receiver has been dropped, notifications are silently discarded:
/// a departed observer must not stop the simulation.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    tx: mpsc::UnboundedSender<EngineNotification>,
    forward_trace: bool,
}

impl ChannelObserver {
    /// Create an observer and the matching receiver
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<EngineNotification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    /// Wrap an existing sender
    pub fn new(tx: mpsc::UnboundedSender<EngineNotification>) -> Self {
        Self {
            tx,
            forward_trace: true,
        }
    }

    /// Stop forwarding trace events (queue and CPU changes only)
    #[must_use]
    pub fn without_trace(mut self) -> Self {
        self.forward_trace = false;
        self
    }

    fn send(&self, notification: EngineNotification) {
        let _ = self.tx.send(notification);
    }
}

impl SchedulerObserver for ChannelObserver {
    fn on_queues_changed(&self, snapshot: QueueSnapshot) {
        self.send(EngineNotification::QueuesChanged(snapshot));
    }

    fn on_cpu_changed(&self, occupant: Option<ProcessId>) {
        self.send(EngineNotification::CpuChanged(occupant));
    }

    fn on_trace(&self, event: &TraceEvent) {
        if self.forward_trace {
            self.send(EngineNotification::Trace(event.clone()));
        }
    }
}

/// Keeps every notification in memory
///
/// Share it with the engine through an `Arc` to inspect what was delivered.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    notifications: Mutex<Vec<EngineNotification>>,
}

impl RecordingObserver {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far
    pub fn notifications(&self) -> Vec<EngineNotification> {
        self.notifications.lock().clone()
    }

    /// Every queue snapshot, in delivery order
    pub fn queue_snapshots(&self) -> Vec<QueueSnapshot> {
        self.notifications
            .lock()
            .iter()
            .filter_map(|n| match n {
                EngineNotification::QueuesChanged(s) => Some(s.clone()),
                _ => None,
            })
            .collect()
    }

    /// Every CPU occupant change, in delivery order
    pub fn cpu_changes(&self) -> Vec<Option<ProcessId>> {
        self.notifications
            .lock()
            .iter()
            .filter_map(|n| match n {
                EngineNotification::CpuChanged(occupant) => Some(occupant.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, notification: EngineNotification) {
        self.notifications.lock().push(notification);
    }
}

impl SchedulerObserver for RecordingObserver {
    fn on_queues_changed(&self, snapshot: QueueSnapshot) {
        self.record(EngineNotification::QueuesChanged(snapshot));
    }

    fn on_cpu_changed(&self, occupant: Option<ProcessId>) {
        self.record(EngineNotification::CpuChanged(occupant));
    }

    fn on_trace(&self, event: &TraceEvent) {
        self.record(EngineNotification::Trace(event.clone()));
    }
}
