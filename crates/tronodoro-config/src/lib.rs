//! Configuration for the tronodoro scene.
//!
//! A [`Config`] is what lives in `config.toml`: a preset name plus a few
//! overrides. [`Config::scene`] resolves it into a validated [`SceneConfig`]
//! the day/night model can run on.

mod error;
mod file;
mod preset;
mod scene;

pub use error::ConfigError;
pub use file::{
    ClockMode, ClockSettings, Config, PeriodSpec, PlaybackSettings, RainSettings, project_dirs,
};
pub use preset::Preset;
pub use scene::{
    ClockFace, HandLengths, MountainTint, Orbit, RainEmitterConfig, Range, SceneConfig,
    SkyPalette, Viewport,
};
