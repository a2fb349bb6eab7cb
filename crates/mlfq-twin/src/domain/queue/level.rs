//! FIFO queue bound to one priority level

use std::collections::VecDeque;
use std::fmt;

use crate::domain::clock::TimeUnit;

/// Handle to a record in the engine's process table
///
/// Slots are assigned in submission order and never reused, so ordering by
/// slot is ordering by submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProcessSlot(pub usize);

impl ProcessSlot {
    /// Create a slot handle
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Index into the process table
    #[inline(always)]
    pub const fn as_usize(self) -> usize {
        self.0
    }
}

impl fmt::Display for ProcessSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Slot({})", self.0)
    }
}

/// Round-robin queue for a single level
///
/// No capacity bound. Insertion order is arrival/requeue order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelQueue {
    entries: VecDeque<ProcessSlot>,
    quantum: TimeUnit,
}

impl LevelQueue {
    /// Create an empty queue
    ///
    /// The quantum is validated by the engine configuration; a zero quantum
    /// here is a programming error.
    pub fn new(quantum: TimeUnit) -> Self {
        debug_assert!(quantum > 0, "level quantum must be positive");
        Self {
            entries: VecDeque::new(),
            quantum,
        }
    }

    /// Time units granted per turn at this level
    #[inline]
    pub fn quantum(&self) -> TimeUnit {
        self.quantum
    }

    /// Append to the tail
    pub fn enqueue(&mut self, slot: ProcessSlot) {
        debug_assert!(!self.contains(slot), "{slot} enqueued twice");
        self.entries.push_back(slot);
    }

    /// Put back at the head, ahead of every waiting entry
    ///
    /// Used only when a run is cancelled in the middle of a slice.
    pub fn requeue_front(&mut self, slot: ProcessSlot) {
        debug_assert!(!self.contains(slot), "{slot} enqueued twice");
        self.entries.push_front(slot);
    }

    /// Remove and return the head, `None` when empty
    pub fn dequeue_head(&mut self) -> Option<ProcessSlot> {
        self.entries.pop_front()
    }

    /// Out-of-order removal, O(n)
    ///
    /// Returns `false` if the slot was not resident.
    pub fn remove(&mut self, slot: ProcessSlot) -> bool {
        match self.entries.iter().position(|s| *s == slot) {
            Some(pos) => {
                self.entries.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Whether the slot is resident
    pub fn contains(&self, slot: ProcessSlot) -> bool {
        self.entries.contains(&slot)
    }

    /// Whether the queue is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of resident entries
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate head to tail
    pub fn iter(&self) -> impl Iterator<Item = ProcessSlot> + '_ {
        self.entries.iter().copied()
    }

    /// Ordered copy of every resident entry, head first
    pub fn snapshot(&self) -> Vec<ProcessSlot> {
        self.entries.iter().copied().collect()
    }
}
