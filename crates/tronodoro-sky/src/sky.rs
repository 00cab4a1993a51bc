//! Darkness, sky blend and the colors derived from them.

use tronodoro_config::{MountainTint, SkyPalette};
use tronodoro_core::{ClockReading, PeriodTable, Rgb};

use crate::color::interpolate_color;

/// Opacity of the dimming overlay for `reading`.
pub fn compute_darkness(reading: &ClockReading, periods: &PeriodTable) -> f32 {
    level(reading, periods)
}

/// Blend factor between the day sky (0.0) and the night sky (1.0).
pub fn compute_sky_blend(reading: &ClockReading, periods: &PeriodTable) -> f32 {
    level(reading, periods)
}

fn level(reading: &ClockReading, periods: &PeriodTable) -> f32 {
    periods
        .level_at(reading.fractional_minute_of_day())
        .clamp(0.0, 1.0)
}

/// Top and bottom colors of the sky gradient at `blend`.
pub fn sky_gradient(blend: f32, palette: &SkyPalette) -> (Rgb, Rgb) {
    (
        interpolate_color(palette.day_top, palette.night_top, blend),
        interpolate_color(palette.day_bottom, palette.night_bottom, blend),
    )
}

/// Tints of the back, middle and front mountain layers at `blend`.
///
/// Mountains never get fully lit: their darkness starts at `base_darkness`
/// and rises to 1.0 with the blend, scaled per layer so nearer layers stay
/// lighter.
pub fn mountain_tints(blend: f32, tint: &MountainTint) -> [Rgb; 3] {
    let blend = blend.clamp(0.0, 1.0);
    let darkness = tint.base_darkness + blend * (1.0 - tint.base_darkness);
    tint.layer_multipliers
        .map(|multiplier| interpolate_color(tint.lit, tint.unlit, darkness * multiplier))
}
