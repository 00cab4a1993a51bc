//! Core types shared by the tronodoro crates.
//!
//! Everything here is plain data: clock readings, colors, the period tables
//! that drive the day/night cycle, and the snapshots the model produces.

mod clock;
mod color;
mod period;
mod state;

pub use clock::{ClockReading, ParseReadingError, SECONDS_PER_DAY};
pub use color::{Point, Rgb};
pub use period::{MINUTES_PER_DAY, Period, PeriodTable, PeriodTableError, Ramp, TimeOfDay};
pub use state::{
    HandAngles, HandTips, Hands, PendingPolicy, PlaybackState, RainState, SkyState, Snapshot,
};
