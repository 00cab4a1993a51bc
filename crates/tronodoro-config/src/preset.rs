//! Built-in scene presets.
//!
//! Each preset reproduces one variant of the scene: `Classic` is the
//! gradient-sky room, `Parallax` adds mountains and a sun/moon orbit with
//! separate darkness and sky-blend windows, and `Timelapse` runs the
//! parallax scene on an accelerated clock.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tronodoro_core::{Period, PeriodTable, PeriodTableError, Point, Ramp, TimeOfDay};

use crate::scene::{
    ClockFace, HandLengths, MountainTint, Orbit, RainEmitterConfig, SceneConfig, SkyPalette,
    Viewport,
};

/// Overlay darkness at night.
const NIGHT_DARKNESS: f32 = 0.7;

/// Simulated seconds per real second for the timelapse preset.
pub(crate) const TIMELAPSE_MULTIPLIER: f64 = 3600.0;

const fn hm(hours: u32, minutes: u32) -> u32 {
    hours * 60 + minutes
}

/// Named scene preset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Classic,
    #[default]
    Parallax,
    Timelapse,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Classic, Preset::Parallax, Preset::Timelapse];

    /// Cycle to the next preset.
    pub fn next(self) -> Self {
        match self {
            Preset::Classic => Preset::Parallax,
            Preset::Parallax => Preset::Timelapse,
            Preset::Timelapse => Preset::Classic,
        }
    }

    /// Whether this preset runs on a simulated clock by default.
    pub fn simulated_by_default(self) -> bool {
        self == Preset::Timelapse
    }

    /// Whether the scene shows mountains and the sun/moon orbit.
    pub fn has_landscape(self) -> bool {
        self != Preset::Classic
    }

    /// Periods driving the overlay darkness.
    pub fn darkness_periods(self) -> Vec<Period> {
        let (dawn_end, dusk_start) = match self {
            Preset::Classic => (hm(6, 0), hm(18, 0)),
            Preset::Parallax | Preset::Timelapse => (hm(7, 0), hm(19, 0)),
        };
        four_periods(NIGHT_DARKNESS, dawn_end, dusk_start)
    }

    /// Periods driving the day/night sky blend.
    pub fn sky_blend_periods(self) -> Vec<Period> {
        let (sunrise_end, sunset_start) = match self {
            Preset::Classic => (hm(6, 0), hm(18, 0)),
            Preset::Parallax | Preset::Timelapse => (hm(8, 0), hm(18, 0)),
        };
        four_periods(1.0, sunrise_end, sunset_start)
    }

    fn clock_face(self, viewport: Viewport) -> ClockFace {
        let center = match self {
            Preset::Classic => Point::new(583.0, 160.0),
            Preset::Parallax | Preset::Timelapse => {
                Point::new(viewport.width / 2.9, viewport.height / 6.2)
            }
        };
        ClockFace {
            center,
            radius: 70.0,
            lengths: HandLengths::default(),
        }
    }

    /// Resolve the preset into a scene configuration.
    pub fn scene(self) -> Result<SceneConfig, PeriodTableError> {
        let viewport = Viewport::default();
        Ok(SceneConfig {
            viewport,
            clock_face: self.clock_face(viewport),
            darkness: PeriodTable::new(self.darkness_periods())?,
            sky_blend: PeriodTable::new(self.sky_blend_periods())?,
            palette: SkyPalette::default(),
            orbit: Orbit::for_viewport(viewport),
            mountains: MountainTint::default(),
            rain: RainEmitterConfig::default(),
        })
    }
}

/// Night from 22:00 to 04:00 at `night`, ramping down until `morning_end`,
/// zero through the day, ramping back up from `evening_start` to 22:00.
fn four_periods(night: f32, morning_end: u32, evening_start: u32) -> Vec<Period> {
    vec![
        Period::new(TimeOfDay::Night, hm(22, 0), hm(4, 0), Ramp::Hold(night)),
        Period::new(
            TimeOfDay::Dawn,
            hm(4, 0),
            morning_end,
            Ramp::Linear {
                from: night,
                to: 0.0,
            },
        ),
        Period::new(TimeOfDay::Day, morning_end, evening_start, Ramp::Hold(0.0)),
        Period::new(
            TimeOfDay::Dusk,
            evening_start,
            hm(22, 0),
            Ramp::Linear {
                from: 0.0,
                to: night,
            },
        ),
    ]
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Preset::Classic => "classic",
            Preset::Parallax => "parallax",
            Preset::Timelapse => "timelapse",
        };
        f.write_str(name)
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|p| p.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown preset {s:?} (expected classic, parallax or timelapse)"))
    }
}
