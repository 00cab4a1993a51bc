//! Resolved scene configuration consumed by the day/night model.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};
use tronodoro_core::{PeriodTable, Point, Rgb};

/// Size of the reference viewport scene coordinates are expressed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// Hand lengths as fractions of the clock radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandLengths {
    pub hour: f32,
    pub minute: f32,
    pub second: f32,
}

impl Default for HandLengths {
    fn default() -> Self {
        Self {
            hour: 0.5,
            minute: 0.7,
            second: 0.8,
        }
    }
}

/// Geometry of the wall clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockFace {
    pub center: Point,
    pub radius: f32,
    pub lengths: HandLengths,
}

/// Circle the sun and moon travel along once per day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    pub center: Point,
    pub radius: f32,
    /// Phase added to the sun's angle; the moon sits half a turn further.
    pub sun_phase: f32,
}

impl Orbit {
    /// Orbit centered on the bottom edge of the viewport, as tall as 80% of it.
    pub fn for_viewport(viewport: Viewport) -> Self {
        Self {
            center: Point::new(viewport.width / 2.0, viewport.height),
            radius: viewport.height * 0.8,
            // Shifted from the base formula (phase 0 puts the sun at the top
            // at midnight) so the sun is at the top at noon. The moon keeps
            // its half-turn offset from the sun. Pass 0.0 to
            // `compute_celestial_position` for the unshifted position.
            sun_phase: PI,
        }
    }

    pub fn moon_phase(&self) -> f32 {
        self.sun_phase + PI
    }
}

/// Day and night sky gradients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyPalette {
    pub day_top: Rgb,
    pub day_bottom: Rgb,
    pub night_top: Rgb,
    pub night_bottom: Rgb,
}

impl Default for SkyPalette {
    fn default() -> Self {
        Self {
            day_top: Rgb::new(0x87, 0xce, 0xeb),
            day_bottom: Rgb::new(0xf0, 0xf8, 0xff),
            night_top: Rgb::new(0x00, 0x1a, 0x33),
            night_bottom: Rgb::new(0x0f, 0x2c, 0x4c),
        }
    }
}

/// How the mountain layers darken with the sky blend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MountainTint {
    /// Darkness applied even in full daylight.
    pub base_darkness: f32,
    /// Multipliers for the back, middle and front layers.
    pub layer_multipliers: [f32; 3],
    /// Tint at zero darkness.
    pub lit: Rgb,
    /// Tint at full darkness.
    pub unlit: Rgb,
}

impl Default for MountainTint {
    fn default() -> Self {
        Self {
            base_darkness: 0.5,
            layer_multipliers: [1.0, 0.8, 0.6],
            lit: Rgb::WHITE,
            unlit: Rgb::BLACK,
        }
    }
}

/// A pair of values, used both for random ranges and start/end ramps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub from: f32,
    pub to: f32,
}

impl Range {
    pub const fn new(from: f32, to: f32) -> Self {
        Self { from, to }
    }

    /// Linear interpolation between the two ends (`t` clamped to `[0, 1]`).
    pub fn lerp(&self, t: f32) -> f32 {
        self.from + (self.to - self.from) * t.clamp(0.0, 1.0)
    }
}

/// Rain particle emitter parameters, in scene coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RainEmitterConfig {
    /// Horizontal spawn range.
    pub spawn_x: Range,
    /// Vertical spawn position.
    pub spawn_y: f32,
    /// Drops spawned per emission.
    pub quantity: u32,
    /// Time between emissions.
    pub spawn_interval_ms: u64,
    /// How long a drop lives.
    pub lifespan_ms: u64,
    /// Vertical speed range in scene units per second.
    pub speed_y: Range,
    /// Scale at birth and death.
    pub scale: Range,
    /// Opacity at birth and death.
    pub alpha: Range,
}

impl Default for RainEmitterConfig {
    fn default() -> Self {
        Self {
            spawn_x: Range::new(200.0, 400.0),
            spawn_y: 50.0,
            quantity: 1,
            spawn_interval_ms: 100,
            lifespan_ms: 2800,
            speed_y: Range::new(100.0, 150.0),
            scale: Range::new(0.2, 0.4),
            alpha: Range::new(0.8, 0.3),
        }
    }
}

/// Fully resolved and validated scene configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub viewport: Viewport,
    pub clock_face: ClockFace,
    pub darkness: PeriodTable,
    pub sky_blend: PeriodTable,
    pub palette: SkyPalette,
    pub orbit: Orbit,
    pub mountains: MountainTint,
    pub rain: RainEmitterConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_lerp() {
        let alpha = Range::new(0.8, 0.3);
        assert_eq!(alpha.lerp(0.0), 0.8);
        assert_eq!(alpha.lerp(1.0), 0.3);
        assert_eq!(alpha.lerp(2.0), 0.3);
    }

    #[test]
    fn test_orbit_for_viewport() {
        let orbit = Orbit::for_viewport(Viewport::default());
        assert_eq!(orbit.center, Point::new(640.0, 720.0));
        assert_eq!(orbit.radius, 576.0);
        assert_eq!(orbit.moon_phase(), 2.0 * PI);
    }
}
