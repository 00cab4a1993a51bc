//! Snapshots produced by the day/night model and the small toggles around it.

use serde::{Deserialize, Serialize};

use crate::{Point, Rgb, TimeOfDay};

/// Clock hand angles in radians, measured clockwise from the positive x axis
/// (12 o'clock is `-π/2`).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HandAngles {
    pub hour: f32,
    pub minute: f32,
    pub second: f32,
}

/// Hand tip offsets from the clock face center.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HandTips {
    pub hour: Point,
    pub minute: Point,
    pub second: Point,
}

/// Angles and tip offsets for the three clock hands.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Hands {
    pub angles: HandAngles,
    pub tips: HandTips,
}

/// Everything the scene needs to paint the sky for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyState {
    /// Opacity of the black overlay dimming the scene (0.0-1.0).
    pub darkness: f32,
    /// Blend between the day sky (0.0) and the night sky (1.0).
    pub blend: f32,
    /// Color at the top of the sky gradient.
    pub top: Rgb,
    /// Color at the bottom of the sky gradient.
    pub bottom: Rgb,
    /// Sun position in scene coordinates.
    pub sun: Point,
    /// Moon position in scene coordinates.
    pub moon: Point,
    /// Tints for the back, middle and front mountain layers.
    pub mountain_tints: [Rgb; 3],
    /// Name of the darkness period the reading falls in.
    pub time_of_day: TimeOfDay,
}

/// Output of one model tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub hands: Hands,
    pub sky: SkyState,
}

/// Whether rain is falling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RainState {
    pub is_raining: bool,
}

impl RainState {
    pub fn new(is_raining: bool) -> Self {
        Self { is_raining }
    }

    /// Flip the rain flag, returning the new value.
    pub fn toggle(&mut self) -> bool {
        self.is_raining = !self.is_raining;
        self.is_raining
    }
}

/// Desired state of the background music player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackState {
    pub is_playing: bool,
    /// Volume in percent (0-100).
    pub volume: u8,
}

impl PlaybackState {
    pub const MAX_VOLUME: u8 = 100;

    pub fn new(is_playing: bool, volume: u8) -> Self {
        Self {
            is_playing,
            volume: volume.min(Self::MAX_VOLUME),
        }
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new(false, 50)
    }
}

/// What to do with playback commands issued before the player is ready.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PendingPolicy {
    /// Remember the latest desired state and apply it once the player is ready.
    #[default]
    QueueLatest,
    /// Discard the command and leave the state untouched.
    DropBeforeReady,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rain_double_toggle_is_identity() {
        for start in [false, true] {
            let mut rain = RainState::new(start);
            assert_eq!(rain.toggle(), !start);
            assert_eq!(rain.toggle(), start);
            assert_eq!(rain, RainState::new(start));
        }
    }

    #[test]
    fn test_playback_defaults() {
        let state = PlaybackState::default();
        assert!(!state.is_playing);
        assert_eq!(state.volume, 50);
        assert_eq!(PlaybackState::new(true, 250).volume, 100);
    }
}
