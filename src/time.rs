//! Monotonic time helpers
//!
//! Elapsed seconds since first use, plus a lap clock that feeds the playback
//! driver with the wall-clock time between two viewer updates.

use std::sync::OnceLock;
use std::time::{Duration, Instant};

pub fn now_seconds() -> f64 {
    static START: OnceLock<Instant> = OnceLock::new();
    START.get_or_init(Instant::now).elapsed().as_secs_f64()
}

/// Measures time between consecutive `lap` calls
#[derive(Default)]
pub struct FrameClock {
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time since the previous lap (zero on the first call)
    pub fn lap(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = self.last.map_or(Duration::ZERO, |last| now - last);
        self.last = Some(now);
        elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_lap_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.lap(), Duration::ZERO);
    }

    #[test]
    fn test_lap_measures_sleep() {
        let mut clock = FrameClock::new();
        clock.lap();
        std::thread::sleep(Duration::from_millis(5));
        assert!(clock.lap() >= Duration::from_millis(5));
    }

    #[test]
    fn test_now_seconds_is_monotonic() {
        let a = now_seconds();
        let b = now_seconds();
        assert!(b >= a);
    }
}
