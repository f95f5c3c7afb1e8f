// Copyright (c) 2026 rezky_nightky

use std::time::{Duration, Instant};

/// Monotonic time source. Readings are offsets from an arbitrary origin fixed
/// when the clock is created; only differences between readings are meaningful.
pub trait Clock {
    fn now(&self) -> Duration;
}

pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

#[cfg(test)]
pub use manual::ManualClock;
