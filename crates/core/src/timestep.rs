//! Fixed-timestep accumulator for the game loop.
//!
//! Wall-clock time is fed in as it passes; whole ticks come out and the
//! remainder carries to the next call, so slow frames catch up instead of
//! stretching game time.

use std::time::Duration;

/// Backlog limit; anything beyond it is dropped (e.g. after the process was suspended).
pub const MAX_CATCH_UP_TICKS: u32 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedTimestep {
    step: Duration,
    pending: Duration,
}

impl FixedTimestep {
    pub fn new(step: Duration) -> Self {
        Self {
            step,
            pending: Duration::ZERO,
        }
    }

    pub fn from_millis(step_ms: u32) -> Self {
        Self::new(Duration::from_millis(u64::from(step_ms)))
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    /// Time accumulated toward the next tick
    pub fn pending(&self) -> Duration {
        self.pending
    }

    /// Time left until the next tick is due
    pub fn until_next(&self) -> Duration {
        self.step.saturating_sub(self.pending)
    }

    /// Add `elapsed` and return how many ticks are now due.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if self.step.is_zero() {
            return 0;
        }

        self.pending += elapsed;
        let mut due = 0u32;
        while self.pending >= self.step {
            self.pending -= self.step;
            due += 1;
            if due == MAX_CATCH_UP_TICKS {
                self.pending = self.pending.min(self.step.saturating_sub(Duration::from_nanos(1)));
                break;
            }
        }
        due
    }
}
