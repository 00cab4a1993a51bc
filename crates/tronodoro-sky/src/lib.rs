//! Day/night model for the tronodoro scene.
//!
//! This crate turns a [`ClockReading`](tronodoro_core::ClockReading) into
//! everything the scene paints for one tick: clock hands, overlay darkness,
//! the sky gradient, mountain tints and the sun and moon positions. All of
//! that is pure and lives in [`DayNightModel`]. The crate also provides the
//! clock sources that produce readings and the stateful rain emitter.

mod celestial;
mod clock;
mod color;
mod hands;
mod model;
mod rain;
mod sky;

pub use celestial::{compute_celestial_position, sun_and_moon};
pub use clock::{ClockSource, SimulatedClock, WallClock};
pub use color::interpolate_color;
pub use hands::{compute_hand_angles, compute_hand_tips, compute_hands};
pub use model::DayNightModel;
pub use rain::{RainDrop, RainEmitter};
pub use sky::{compute_darkness, compute_sky_blend, mountain_tints, sky_gradient};
