//! Time management utilities

use std::time::{Duration, Instant};

/// Monotonic clock measuring time since the adapter was created
///
/// Backs the `now()` query the diffing engine uses for expiration times.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    origin: Instant,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    /// Create a clock starting at zero
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Time elapsed since the clock was created
    pub fn elapsed(&self) -> Duration {
        self.origin.elapsed()
    }

    /// Milliseconds elapsed since the clock was created
    pub fn now_millis(&self) -> f64 {
        self.elapsed().as_secs_f64() * 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_is_monotonic() {
        let clock = Clock::new();
        let first = clock.now_millis();
        let second = clock.now_millis();
        assert!(first >= 0.0);
        assert!(second >= first);
    }
}
