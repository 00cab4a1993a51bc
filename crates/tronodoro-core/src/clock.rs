//! Wall-clock readings.

use std::fmt;
use std::str::FromStr;

use chrono::Timelike;
use thiserror::Error;

/// Number of seconds in a day.
pub const SECONDS_PER_DAY: u32 = 24 * 60 * 60;

/// A snapshot of the time of day, recomputed every tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ClockReading {
    /// Hour of the day (0-23).
    pub hours: u32,
    /// Minute of the hour (0-59).
    pub minutes: u32,
    /// Second of the minute (0-59).
    pub seconds: u32,
}

/// Error returned when parsing an `HH:MM[:SS]` string fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid time of day {input:?}, expected HH:MM or HH:MM:SS")]
pub struct ParseReadingError {
    input: String,
}

impl ClockReading {
    /// Midnight, 00:00:00.
    pub const MIDNIGHT: Self = Self {
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Create a reading, returning `None` if any component is out of range.
    pub fn new(hours: u32, minutes: u32, seconds: u32) -> Option<Self> {
        (hours < 24 && minutes < 60 && seconds < 60).then_some(Self {
            hours,
            minutes,
            seconds,
        })
    }

    /// Build a reading from a count of seconds since midnight.
    /// Counts past one day wrap around.
    pub fn from_seconds_of_day(seconds: u64) -> Self {
        let s = (seconds % SECONDS_PER_DAY as u64) as u32;
        Self {
            hours: s / 3600,
            minutes: (s / 60) % 60,
            seconds: s % 60,
        }
    }

    /// Take the time-of-day part of any chrono time value.
    pub fn from_time<T: Timelike>(time: &T) -> Self {
        Self {
            hours: time.hour(),
            minutes: time.minute(),
            // Leap seconds show up as second 59 with extra nanoseconds.
            seconds: time.second().min(59),
        }
    }

    /// Seconds elapsed since midnight.
    pub fn seconds_of_day(&self) -> u32 {
        self.hours * 3600 + self.minutes * 60 + self.seconds
    }

    /// Whole minutes elapsed since midnight (0-1439).
    pub fn minute_of_day(&self) -> u32 {
        self.hours * 60 + self.minutes
    }

    /// Minutes elapsed since midnight, including the seconds as a fraction.
    pub fn fractional_minute_of_day(&self) -> f32 {
        self.minute_of_day() as f32 + self.seconds as f32 / 60.0
    }

    /// Fraction of the day elapsed, in `[0, 1)`.
    pub fn day_fraction(&self) -> f32 {
        self.seconds_of_day() as f32 / SECONDS_PER_DAY as f32
    }
}

impl fmt::Display for ClockReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        )
    }
}

impl FromStr for ClockReading {
    type Err = ParseReadingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseReadingError {
            input: s.to_string(),
        };

        let parts: Vec<&str> = s.trim().split(':').collect();
        if !(2..=3).contains(&parts.len()) {
            return Err(err());
        }

        let mut values = [0u32; 3];
        for (value, part) in values.iter_mut().zip(&parts) {
            *value = part.parse().map_err(|_| err())?;
        }

        Self::new(values[0], values[1], values[2]).ok_or_else(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(ClockReading::new(23, 59, 59).is_some());
        assert!(ClockReading::new(24, 0, 0).is_none());
        assert!(ClockReading::new(0, 60, 0).is_none());
        assert!(ClockReading::new(0, 0, 60).is_none());
    }

    #[test]
    fn test_from_seconds_of_day_wraps() {
        let reading = ClockReading::from_seconds_of_day(5 * 3600 + 30 * 60 + 15);
        assert_eq!(reading, ClockReading::new(5, 30, 15).unwrap());

        let wrapped = ClockReading::from_seconds_of_day(SECONDS_PER_DAY as u64 + 61);
        assert_eq!(wrapped, ClockReading::new(0, 1, 1).unwrap());
    }

    #[test]
    fn test_minute_helpers() {
        let reading = ClockReading::new(5, 0, 30).unwrap();
        assert_eq!(reading.minute_of_day(), 300);
        assert_eq!(reading.fractional_minute_of_day(), 300.5);
        assert_eq!(ClockReading::new(12, 0, 0).unwrap().day_fraction(), 0.5);
    }

    #[test]
    fn test_from_time() {
        let time = chrono::NaiveTime::from_hms_opt(18, 45, 12).unwrap();
        assert_eq!(
            ClockReading::from_time(&time),
            ClockReading::new(18, 45, 12).unwrap()
        );
    }

    #[test]
    fn test_parse_and_display() {
        let reading: ClockReading = "06:30".parse().unwrap();
        assert_eq!(reading, ClockReading::new(6, 30, 0).unwrap());
        assert_eq!(reading.to_string(), "06:30:00");

        let reading: ClockReading = "23:05:09".parse().unwrap();
        assert_eq!(reading.to_string(), "23:05:09");

        assert!("24:00".parse::<ClockReading>().is_err());
        assert!("noon".parse::<ClockReading>().is_err());
        assert!("1:2:3:4".parse::<ClockReading>().is_err());
    }
}
