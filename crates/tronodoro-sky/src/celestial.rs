//! Sun and moon positions.

use std::f32::consts::{FRAC_PI_2, TAU};

use tronodoro_config::Orbit;
use tronodoro_core::{ClockReading, Point};

/// Position of a body on a circle it travels once per day.
///
/// At phase 0 the body sits at the top of the circle at midnight and moves
/// clockwise (screen coordinates, y down).
pub fn compute_celestial_position(
    reading: &ClockReading,
    center: Point,
    radius: f32,
    phase: f32,
) -> Point {
    let angle = reading.day_fraction() * TAU - FRAC_PI_2 + phase;
    Point::new(
        center.x + angle.cos() * radius,
        center.y + angle.sin() * radius,
    )
}

/// Sun and moon positions; the moon is always half a turn from the sun.
pub fn sun_and_moon(reading: &ClockReading, orbit: &Orbit) -> (Point, Point) {
    (
        compute_celestial_position(reading, orbit.center, orbit.radius, orbit.sun_phase),
        compute_celestial_position(reading, orbit.center, orbit.radius, orbit.moon_phase()),
    )
}
