//! Sources of clock readings.

use std::fmt;
use std::time::{Duration, Instant};

use chrono::Local;
use tronodoro_core::{ClockReading, SECONDS_PER_DAY};

/// Something that can tell the time of day.
pub trait ClockSource: fmt::Debug {
    fn now(&self) -> ClockReading;
}

/// The local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct WallClock;

impl ClockSource for WallClock {
    fn now(&self) -> ClockReading {
        ClockReading::from_time(&Local::now())
    }
}

/// A clock running faster than real time, for previewing whole days.
#[derive(Debug, Clone)]
pub struct SimulatedClock {
    /// Simulated time when the clock was created.
    start: ClockReading,
    /// Simulated seconds per real second.
    multiplier: f64,
    /// Real instant the clock was created.
    origin: Instant,
}

impl SimulatedClock {
    /// Start a simulated clock at `start`, running `multiplier` times faster
    /// than real time.
    pub fn new(start: ClockReading, multiplier: f64) -> Self {
        Self {
            start,
            multiplier,
            origin: Instant::now(),
        }
    }

    /// Start a simulated clock at the current wall time.
    pub fn starting_now(multiplier: f64) -> Self {
        Self::new(WallClock.now(), multiplier)
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Simulated reading after `elapsed` real time.
    pub fn reading_after(&self, elapsed: Duration) -> ClockReading {
        let day = SECONDS_PER_DAY as f64;
        let advanced = (elapsed.as_secs_f64() * self.multiplier).rem_euclid(day);
        let seconds = (self.start.seconds_of_day() as f64 + advanced).floor();
        ClockReading::from_seconds_of_day(seconds as u64)
    }
}

impl ClockSource for SimulatedClock {
    fn now(&self) -> ClockReading {
        self.reading_after(self.origin.elapsed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_an_hour_per_second() {
        let clock = SimulatedClock::new(ClockReading::new(6, 0, 0).unwrap(), 3600.0);
        assert_eq!(
            clock.reading_after(Duration::ZERO),
            ClockReading::new(6, 0, 0).unwrap()
        );
        assert_eq!(
            clock.reading_after(Duration::from_secs(1)),
            ClockReading::new(7, 0, 0).unwrap()
        );
        assert_eq!(
            clock.reading_after(Duration::from_millis(250)),
            ClockReading::new(6, 15, 0).unwrap()
        );
    }

    #[test]
    fn test_wraps_after_a_simulated_day() {
        let clock = SimulatedClock::new(ClockReading::new(22, 0, 0).unwrap(), 3600.0);
        assert_eq!(
            clock.reading_after(Duration::from_secs(4)),
            ClockReading::new(2, 0, 0).unwrap()
        );
        assert_eq!(
            clock.reading_after(Duration::from_secs(24 * 7 + 1)),
            ClockReading::new(23, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_real_time_multiplier() {
        let clock = SimulatedClock::new(ClockReading::MIDNIGHT, 1.0);
        assert_eq!(
            clock.reading_after(Duration::from_secs(61)),
            ClockReading::new(0, 1, 1).unwrap()
        );
        assert_eq!(clock.multiplier(), 1.0);
    }

    #[test]
    fn test_wall_clock_reads_valid_time() {
        let now = WallClock.now();
        assert!(ClockReading::new(now.hours, now.minutes, now.seconds).is_some());
    }
}
