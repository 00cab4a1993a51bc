//! Named periods of the day and the tables that map a time to a level.
//!
//! A [`PeriodTable`] partitions the 1440 minutes of a day into named spans.
//! Each span carries a [`Ramp`] describing how its level (overlay darkness or
//! sky blend) moves from the start of the span to its end. Tables are
//! validated when built, so lookups are total.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of minutes in a day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Tolerance used when comparing levels across a period boundary.
const LEVEL_EPSILON: f32 = 1e-6;

/// Stand-in returned by lookups on an empty unchecked table.
static UNCOVERED: Period = Period::new(TimeOfDay::Day, 0, 0, Ramp::Hold(0.0));

/// Named part of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Night,
    Dawn,
    Day,
    Dusk,
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimeOfDay::Night => "night",
            TimeOfDay::Dawn => "dawn",
            TimeOfDay::Day => "day",
            TimeOfDay::Dusk => "dusk",
        };
        f.write_str(name)
    }
}

/// How a level evolves across a period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ramp {
    /// Constant level for the whole period.
    Hold(f32),
    /// Linear change from `from` at the start to `to` at the end.
    Linear { from: f32, to: f32 },
}

impl Ramp {
    /// Level at the very start of the period.
    pub fn start_level(&self) -> f32 {
        match *self {
            Ramp::Hold(level) => level,
            Ramp::Linear { from, .. } => from,
        }
    }

    /// Level the period converges to at its end boundary.
    pub fn end_level(&self) -> f32 {
        match *self {
            Ramp::Hold(level) => level,
            Ramp::Linear { to, .. } => to,
        }
    }

    /// Level at `progress` through the period (clamped to `[0, 1]`).
    pub fn level_at(&self, progress: f32) -> f32 {
        match *self {
            Ramp::Hold(level) => level,
            Ramp::Linear { from, to } => from + (to - from) * progress.clamp(0.0, 1.0),
        }
    }
}

/// A named span of the day, `[start, end)` in minutes since midnight.
///
/// `end` may be smaller than `start`, in which case the span wraps past
/// midnight (e.g. night from 22:00 to 04:00).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Period {
    pub kind: TimeOfDay,
    pub start: u32,
    pub end: u32,
    pub ramp: Ramp,
}

impl Period {
    pub const fn new(kind: TimeOfDay, start: u32, end: u32, ramp: Ramp) -> Self {
        Self {
            kind,
            start,
            end,
            ramp,
        }
    }

    /// Length of the span in minutes. A span whose start equals its end has
    /// length zero here; a single-period table treats it as the whole day.
    pub fn len(&self) -> u32 {
        (self.end % MINUTES_PER_DAY + MINUTES_PER_DAY - self.start % MINUTES_PER_DAY) % MINUTES_PER_DAY
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Minutes from the start of the span to `minute`, wrapping at midnight.
    fn offset(&self, minute: f32) -> f32 {
        (minute - self.start as f32).rem_euclid(MINUTES_PER_DAY as f32)
    }

    /// Whether `minute` (fractional minutes since midnight) falls inside.
    pub fn contains(&self, minute: f32) -> bool {
        self.offset(minute) < self.len() as f32
    }

    /// Level of this period's ramp at `minute`.
    pub fn level_at(&self, minute: f32) -> f32 {
        let len = match self.len() {
            0 => MINUTES_PER_DAY,
            len => len,
        };
        self.ramp.level_at(self.offset(minute) / len as f32)
    }
}

/// Reasons a period table is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PeriodTableError {
    #[error("period table is empty")]
    Empty,

    #[error("{kind} boundary {minute} is outside the day (0-1439)")]
    BoundaryOutOfRange { kind: TimeOfDay, minute: u32 },

    #[error("{kind} period starting at minute {start} has no length")]
    EmptyPeriod { kind: TimeOfDay, start: u32 },

    #[error("{kind} level {level} is outside 0.0-1.0")]
    LevelOutOfRange { kind: TimeOfDay, level: f32 },

    #[error("minutes {from}..{to} are not covered by any period")]
    Gap { from: u32, to: u32 },

    #[error("periods overlap at minute {at}")]
    Overlap { at: u32 },

    #[error("level jumps from {before} to {after} at minute {at}")]
    Discontinuity { at: u32, before: f32, after: f32 },
}

/// An ordered set of periods covering the whole day exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodTable {
    periods: Vec<Period>,
}

impl PeriodTable {
    /// Build a table, checking that the periods partition the day and that
    /// levels join up at every boundary.
    pub fn new(periods: Vec<Period>) -> Result<Self, PeriodTableError> {
        validate(&periods)?;
        Ok(Self { periods })
    }

    /// Build a table without validation.
    ///
    /// A lookup that lands in a gap panics in debug builds and falls back to
    /// the nearest preceding period in release builds.
    pub fn new_unchecked(periods: Vec<Period>) -> Self {
        Self { periods }
    }

    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    /// The period containing `minute` (fractional minutes since midnight).
    pub fn period_at(&self, minute: f32) -> &Period {
        if let [only] = self.periods.as_slice() {
            return only;
        }

        if let Some(period) = self.periods.iter().find(|p| p.contains(minute)) {
            return period;
        }

        debug_assert!(false, "minute {minute} is not covered by the period table");
        self.nearest_preceding(minute)
    }

    /// The period whose start is closest before `minute`, wrapping at
    /// midnight.
    fn nearest_preceding(&self, minute: f32) -> &Period {
        self.periods
            .iter()
            .min_by(|a, b| a.offset(minute).total_cmp(&b.offset(minute)))
            .unwrap_or(&UNCOVERED)
    }

    /// Level at `minute` (fractional minutes since midnight).
    pub fn level_at(&self, minute: f32) -> f32 {
        self.period_at(minute).level_at(minute)
    }
}

fn validate(periods: &[Period]) -> Result<(), PeriodTableError> {
    if periods.is_empty() {
        return Err(PeriodTableError::Empty);
    }

    for p in periods {
        for minute in [p.start, p.end] {
            if minute >= MINUTES_PER_DAY {
                return Err(PeriodTableError::BoundaryOutOfRange {
                    kind: p.kind,
                    minute,
                });
            }
        }
        for level in [p.ramp.start_level(), p.ramp.end_level()] {
            if !(0.0..=1.0).contains(&level) {
                return Err(PeriodTableError::LevelOutOfRange {
                    kind: p.kind,
                    level,
                });
            }
        }
    }

    if let [only] = periods {
        // A lone period must span the whole day.
        if only.start != only.end {
            return Err(PeriodTableError::Gap {
                from: only.end,
                to: only.start,
            });
        }
    } else {
        if let Some(p) = periods.iter().find(|p| p.is_empty()) {
            return Err(PeriodTableError::EmptyPeriod {
                kind: p.kind,
                start: p.start,
            });
        }

        for (i, p) in periods.iter().enumerate() {
            let next = &periods[(i + 1) % periods.len()];
            if p.end != next.start {
                return Err(if p.contains(next.start as f32) {
                    PeriodTableError::Overlap { at: next.start }
                } else {
                    PeriodTableError::Gap {
                        from: p.end,
                        to: next.start,
                    }
                });
            }
        }

        // Contiguous periods cover a whole number of days; more than one
        // means the table loops over itself.
        let total: u32 = periods.iter().map(Period::len).sum();
        if total != MINUTES_PER_DAY {
            return Err(PeriodTableError::Overlap {
                at: periods[0].start,
            });
        }
    }

    for (i, p) in periods.iter().enumerate() {
        let next = &periods[(i + 1) % periods.len()];
        let before = p.ramp.end_level();
        let after = next.ramp.start_level();
        if (before - after).abs() > LEVEL_EPSILON {
            return Err(PeriodTableError::Discontinuity {
                at: p.end,
                before,
                after,
            });
        }
    }

    Ok(())
}
