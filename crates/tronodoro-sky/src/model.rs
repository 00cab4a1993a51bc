//! The day/night model.

use tracing::debug;
use tronodoro_config::SceneConfig;
use tronodoro_core::{ClockReading, Hands, SkyState, Snapshot, TimeOfDay};

use crate::celestial::sun_and_moon;
use crate::hands::compute_hands;
use crate::sky::{compute_darkness, compute_sky_blend, mountain_tints, sky_gradient};

/// Maps clock readings to everything the scene paints.
///
/// The model holds only configuration; every method is a pure function of
/// the reading it is given.
#[derive(Debug, Clone)]
pub struct DayNightModel {
    scene: SceneConfig,
}

impl DayNightModel {
    pub fn new(scene: SceneConfig) -> Self {
        debug!(
            darkness_periods = scene.darkness.periods().len(),
            sky_blend_periods = scene.sky_blend.periods().len(),
            "day/night model configured"
        );
        Self { scene }
    }

    pub fn scene(&self) -> &SceneConfig {
        &self.scene
    }

    /// Clock hand angles and tip offsets.
    pub fn hands(&self, reading: &ClockReading) -> Hands {
        compute_hands(reading, &self.scene.clock_face)
    }

    /// Name of the darkness period `reading` falls in.
    pub fn time_of_day(&self, reading: &ClockReading) -> TimeOfDay {
        self.scene
            .darkness
            .period_at(reading.fractional_minute_of_day())
            .kind
    }

    /// Sky colors, overlay darkness, tints and celestial positions.
    pub fn sky(&self, reading: &ClockReading) -> SkyState {
        let darkness = compute_darkness(reading, &self.scene.darkness);
        let blend = compute_sky_blend(reading, &self.scene.sky_blend);
        let (top, bottom) = sky_gradient(blend, &self.scene.palette);
        let (sun, moon) = sun_and_moon(reading, &self.scene.orbit);

        SkyState {
            darkness,
            blend,
            top,
            bottom,
            sun,
            moon,
            mountain_tints: mountain_tints(blend, &self.scene.mountains),
            time_of_day: self.time_of_day(reading),
        }
    }

    /// Everything for one tick.
    pub fn on_tick(&self, reading: &ClockReading) -> Snapshot {
        Snapshot {
            hands: self.hands(reading),
            sky: self.sky(reading),
        }
    }
}
