//! Fixed-period tick stream for async control loops.

use futures::{Stream, ready};
use pin_project_lite::pin_project;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::time::{Instant, Sleep, sleep_until};
use tracing::warn;

pin_project! {
    /// A stream of tick instants with the same catch-up semantics as
    /// [`Timer`](crate::Timer): a late poll yields one tick, missed
    /// periods are absorbed in whole multiples and reported, and the
    /// next deadline lands back on the period grid. The stream never
    /// ends.
    pub struct Cadence {
        period: Duration,
        deadline: Instant,
        #[pin]
        sleep: Sleep,
    }
}

impl Cadence {
    /// Create a cadence whose first tick is one period from now.
    ///
    /// # Panics
    ///
    /// Panics if `period` is zero.
    pub fn new(period: Duration) -> Self {
        assert!(!period.is_zero(), "cadence period must be non-zero");
        let deadline = Instant::now() + period;
        Self { period, deadline, sleep: sleep_until(deadline) }
    }

    /// The configured period.
    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Stream for Cadence {
    type Item = Instant;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();
        ready!(this.sleep.as_mut().poll(cx));

        let fired = *this.deadline;
        let missed = Instant::now()
            .checked_duration_since(fired)
            .map_or(0, |overdue| {
                u32::try_from(overdue.as_nanos() / this.period.as_nanos()).unwrap_or(u32::MAX)
            });
        if missed > 0 {
            warn!(missed_periods = missed, period = ?this.period, "cadence catching up");
        }

        *this.deadline = fired + this.period.saturating_mul(missed.saturating_add(1));
        this.sleep.reset(*this.deadline);
        Poll::Ready(Some(fired))
    }
}
