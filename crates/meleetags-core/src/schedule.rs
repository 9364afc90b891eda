//! Fixed-rate scheduling.
//!
//! Wall-clock time is accumulated between checks and one tick is due for
//! every whole interval. After a stall every missed tick is delivered in a
//! burst; none are dropped.

use std::thread;
use std::time::{Duration, Instant};

use tracing::trace;

use crate::error::Result;

/// Catch-up tick accumulator
#[derive(Debug, Clone)]
pub struct FixedRate {
    interval: Duration,
    last: Instant,
    accumulated: Duration,
}

impl FixedRate {
    /// A zero interval is clamped to one nanosecond.
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval: interval.max(Duration::from_nanos(1)),
            last: now,
            accumulated: Duration::ZERO,
        }
    }

    pub fn from_hz(hz: u32, now: Instant) -> Self {
        Self::new(Duration::from_secs(1) / hz.max(1), now)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of ticks that became due since the previous call.
    pub fn due(&mut self, now: Instant) -> u32 {
        self.accumulated += now.saturating_duration_since(self.last);
        self.last = self.last.max(now);

        let mut ticks = 0;
        while self.accumulated >= self.interval {
            self.accumulated -= self.interval;
            ticks += 1;
        }
        ticks
    }

    /// When the next tick becomes due
    pub fn next_deadline(&self) -> Instant {
        self.last + self.interval.saturating_sub(self.accumulated)
    }
}

/// Call `tick` at `rate_hz` until it returns an error.
///
/// There is no other way out of the loop.
pub fn run_at_rate<F>(rate_hz: u32, mut tick: F) -> Result<()>
where
    F: FnMut() -> Result<()>,
{
    let mut rate = FixedRate::from_hz(rate_hz, Instant::now());

    loop {
        let due = rate.due(Instant::now());
        if due > 1 {
            trace!("Catching up {} ticks", due);
        }
        for _ in 0..due {
            tick()?;
        }

        let now = Instant::now();
        let deadline = rate.next_deadline();
        if deadline > now {
            thread::sleep(deadline - now);
        }
    }
}
