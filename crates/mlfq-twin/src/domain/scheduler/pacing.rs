//! Pacing Strategies
//!
//! Pacing slows the run loop down so an external viewer can render
//! intermediate states. It never influences scheduling decisions, and tests
//! run with [`NoPacing`].

use std::time::Duration;

/// Delay applied after each turn
pub trait Pacer: Send {
    /// Block the run loop for one pacing interval
    fn pace(&self);
}

/// No delay at all
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacing;

impl Pacer for NoPacing {
    #[inline(always)]
    fn pace(&self) {}
}

/// Fixed sleep after each turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay(pub Duration);

impl Pacer for FixedDelay {
    fn pace(&self) {
        if !self.0.is_zero() {
            std::thread::sleep(self.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_fixed_delay_sleeps() {
        let pacer = FixedDelay(Duration::from_millis(5));
        let start = Instant::now();
        pacer.pace();
        assert!(start.elapsed() >= Duration::from_millis(5));
    }

    #[test]
    fn test_zero_delay_returns_immediately() {
        FixedDelay(Duration::ZERO).pace();
        NoPacing.pace();
    }
}
