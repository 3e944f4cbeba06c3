//! Periodic gate for pacing the control loop.

use std::time::{Duration, Instant};
use tracing::warn;

/// A monotonic-clock gate that fires at most once per [`check`] call.
///
/// The deadline advances by whole multiples of the period, so scheduling
/// jitter neither accumulates drift nor triggers a burst of catch-up
/// fires: however late a check arrives, it yields one `true` and the next
/// deadline lands back on the period grid.
///
/// Intended for exclusive ownership by a single loop; concurrent
/// `check`/`reset` calls need external locking.
///
/// [`check`]: Timer::check
#[derive(Debug)]
pub struct Timer {
    period: Duration,
    deadline: Instant,
}

impl Timer {
    /// Create a timer whose first deadline is one period from now.
    ///
    /// # Panics
    ///
    /// Panics if `period` is zero, as with the async ecosystem's interval
    /// timers.
    pub fn new(period: Duration) -> Self {
        assert!(!period.is_zero(), "timer period must be non-zero");
        Self { period, deadline: Instant::now() + period }
    }

    /// Check whether the period has elapsed, firing at most once.
    ///
    /// Returns `false` without touching state while the deadline is in
    /// the future. Once due, missed periods are absorbed in one step and
    /// reported as a catch-up event; this is recoverable by design and
    /// never an error.
    pub fn check(&mut self) -> bool {
        self.check_at(Instant::now())
    }

    /// Deterministic variant of [`check`](Timer::check) against an
    /// explicit instant, for callers that sample the clock themselves.
    pub fn check_at(&mut self, now: Instant) -> bool {
        if now < self.deadline {
            return false;
        }

        let missed = self.missed_periods(now);
        if missed > 0 {
            warn!(missed_periods = missed, period = ?self.period, "timer catching up");
        }
        self.deadline += self.period.saturating_mul(missed.saturating_add(1));
        true
    }

    /// Re-arm the timer to fire one period from now, discarding any
    /// accumulated offset from the original grid.
    pub fn reset(&mut self) {
        self.reset_at(Instant::now());
    }

    /// Deterministic variant of [`reset`](Timer::reset).
    pub fn reset_at(&mut self, now: Instant) {
        self.deadline = now + self.period;
    }

    /// The configured period.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// The next instant at which [`check`](Timer::check) will fire.
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Whole periods elapsed past the deadline at `now`.
    fn missed_periods(&self, now: Instant) -> u32 {
        let Some(overdue) = now.checked_duration_since(self.deadline) else {
            return 0;
        };
        u32::try_from(overdue.as_nanos() / self.period.as_nanos()).unwrap_or(u32::MAX)
    }
}
