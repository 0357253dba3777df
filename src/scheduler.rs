//! Periodic worker pacing.
//!
//! Every worker runs the same sleep-until-next-cycle loop:
//!
//! ```text
//!  ┌─────────┐   work   ┌──────────────┐  sleep(period − elapsed)
//!  │  start  │────────▶│ cycle done    │──────────────────────┐
//!  └─────────┘          └──────────────┘                      │
//!       ▲                                                     │
//!       └─────────────────────────────────────────────────────┘
//! ```
//!
//! A cycle that overruns its period starts the next one immediately.
//! Missed periods are not made up, so an overrun never causes a burst.

use std::time::{Duration, Instant};

use log::debug;

/// Time left in the period after `elapsed` of work (zero on overrun).
pub fn remaining(period: Duration, elapsed: Duration) -> Duration {
    period.saturating_sub(elapsed)
}

/// Tracks one worker's period and overrun count.
#[derive(Debug, Clone)]
pub struct Pacer {
    name: &'static str,
    period: Duration,
    overruns: u32,
}

impl Pacer {
    pub fn new(name: &'static str, period: Duration) -> Self {
        Self {
            name,
            period,
            overruns: 0,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn overruns(&self) -> u32 {
        self.overruns
    }

    /// How long to sleep after a cycle that took `elapsed`.
    pub fn next_delay(&mut self, elapsed: Duration) -> Duration {
        if elapsed >= self.period {
            self.overruns = self.overruns.saturating_add(1);
            debug!(
                "{}: cycle overran ({} ms > {} ms)",
                self.name,
                elapsed.as_millis(),
                self.period.as_millis()
            );
        }
        remaining(self.period, elapsed)
    }
}

/// Run `cycle` forever, once per `period`.
pub fn run_periodic(name: &'static str, period: Duration, mut cycle: impl FnMut()) -> ! {
    let mut pacer = Pacer::new(name, period);
    loop {
        let start = Instant::now();
        cycle();
        let delay = pacer.next_delay(start.elapsed());
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
}
