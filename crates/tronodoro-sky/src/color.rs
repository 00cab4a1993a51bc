//! Color interpolation.

use tronodoro_core::Rgb;

/// Linearly interpolate between two colors, `t` clamped to `[0, 1]`.
///
/// Channels are rounded to the nearest integer, so `t = 0` yields `a` and
/// `t = 1` yields `b` exactly.
pub fn interpolate_color(a: Rgb, b: Rgb, t: f32) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let channel = |from: u8, to: u8| {
        let from = from as f32;
        (from + (to as f32 - from) * t).round() as u8
    };
    Rgb::new(channel(a.r, b.r), channel(a.g, b.g), channel(a.b, b.b))
}
