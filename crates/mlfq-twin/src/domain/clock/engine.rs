//! Simulation clock engine

use super::TimeUnit;

/// Discrete global clock
///
/// Starts at zero. The only mutation is [`SimClock::advance`], which moves the
/// clock forward by exactly one unit, so monotonicity holds by construction.
/// Overflow is treated as an invariant violation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimClock {
    now: TimeUnit,
    idle_units: TimeUnit,
}

impl SimClock {
    /// Create a clock at time zero
    pub const fn new() -> Self {
        Self {
            now: 0,
            idle_units: 0,
        }
    }

    /// Current global time
    #[inline]
    pub const fn now(&self) -> TimeUnit {
        self.now
    }

    /// Units the CPU spent without an occupant
    #[inline]
    pub const fn idle_units(&self) -> TimeUnit {
        self.idle_units
    }

    /// Advance by one executed unit and return the new time
    pub fn advance(&mut self) -> TimeUnit {
        self.now += 1;
        self.now
    }

    /// Advance by one idle unit and return the new time
    pub fn advance_idle(&mut self) -> TimeUnit {
        self.idle_units += 1;
        self.advance()
    }

    /// Units the CPU spent executing processes
    #[inline]
    pub const fn busy_units(&self) -> TimeUnit {
        self.now - self.idle_units
    }
}
