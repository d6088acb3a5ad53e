//! Timing collaborators for the latency driver.
//!
//! The broker never reads a clock. The driver and the benches stamp orders
//! and measure spans through [`Clock`] so tests can substitute a fake.

use std::time::{Duration, Instant};

/// Nanosecond timestamps, monotonic within one process.
pub trait Clock {
    fn now_ns(&self) -> u64;
}

/// `Instant`-backed clock counting from its own creation.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for MonotonicClock {
    #[inline]
    fn now_ns(&self) -> u64 {
        // Saturates after ~584 years
        u64::try_from(self.origin.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }
}

/// Accumulates elapsed time over `start`/`stop` spans.
#[derive(Debug, Clone, Default)]
pub struct Stopwatch {
    started_at: Option<u64>,
    total_ns: u64,
    spans: u64,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a span; restarts the current one if already running
    #[inline]
    pub fn start<C: Clock>(&mut self, clock: &C) {
        self.started_at = Some(clock.now_ns());
    }

    /// Close the open span and return its length, or 0 if none was open
    #[inline]
    pub fn stop<C: Clock>(&mut self, clock: &C) -> u64 {
        let Some(started_at) = self.started_at.take() else {
            return 0;
        };
        let elapsed = clock.now_ns().saturating_sub(started_at);
        self.total_ns = self.total_ns.saturating_add(elapsed);
        self.spans += 1;
        elapsed
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn total_ns(&self) -> u64 {
        self.total_ns
    }

    pub fn total(&self) -> Duration {
        Duration::from_nanos(self.total_ns)
    }

    /// Number of closed spans
    pub fn spans(&self) -> u64 {
        self.spans
    }

    /// Mean span length in nanoseconds
    pub fn mean_ns(&self) -> Option<f64> {
        if self.spans == 0 {
            None
        } else {
            Some(self.total_ns as f64 / self.spans as f64)
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
