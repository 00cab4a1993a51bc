//! The `config.toml` file.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use tronodoro_core::{ClockReading, PendingPolicy, Period, PeriodTable, Ramp, TimeOfDay};

use crate::error::ConfigError;
use crate::preset::{Preset, TIMELAPSE_MULTIPLIER};
use crate::scene::{SceneConfig, SkyPalette};

/// Project directories for config and log files.
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "tronodoro")
}

/// Which clock drives the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockMode {
    /// The local wall clock.
    Wall,
    /// An accelerated clock for previewing full days.
    Simulated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockSettings {
    /// Clock mode; the preset decides when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<ClockMode>,
    /// Simulated seconds per real second.
    pub multiplier: f64,
    /// Simulated start time as `HH:MM`; the current wall time when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    /// Interval between scene updates.
    pub tick_ms: u64,
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            mode: None,
            multiplier: TIMELAPSE_MULTIPLIER,
            start: None,
            tick_ms: 100,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RainSettings {
    /// Start with rain falling.
    pub enabled: bool,
    /// Toggle rain every this many seconds; 0 disables.
    pub auto_toggle_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Initial volume in percent.
    pub volume: u8,
    /// Handling of commands issued before the player is ready.
    pub policy: PendingPolicy,
    /// Stream loaded by the embedded player.
    pub stream_id: String,
    /// How long the embedded player takes to come up.
    pub ready_delay_ms: u64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            volume: 50,
            policy: PendingPolicy::default(),
            // Lofi radio stream
            stream_id: "jfKfPfyJRdk".to_string(),
            ready_delay_ms: 1500,
        }
    }
}

/// One entry of a period override table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSpec {
    pub kind: TimeOfDay,
    /// Start boundary as `HH:MM`.
    pub start: String,
    /// End boundary as `HH:MM` (exclusive).
    pub end: String,
    /// Level at the start of the period.
    pub from: f32,
    /// Level at the end of the period; same as `from` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<f32>,
}

impl PeriodSpec {
    fn to_period(&self) -> Result<Period, ConfigError> {
        let ramp = match self.to {
            Some(to) if to != self.from => Ramp::Linear {
                from: self.from,
                to,
            },
            _ => Ramp::Hold(self.from),
        };
        Ok(Period::new(
            self.kind,
            parse_boundary(&self.start)?,
            parse_boundary(&self.end)?,
            ramp,
        ))
    }
}

fn parse_boundary(s: &str) -> Result<u32, ConfigError> {
    let reading: ClockReading = s.parse()?;
    if reading.seconds != 0 {
        return Err(ConfigError::Boundary(s.to_string()));
    }
    Ok(reading.minute_of_day())
}

/// Contents of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub preset: Preset,
    pub clock: ClockSettings,
    pub rain: RainSettings,
    pub playback: PlaybackSettings,
    /// Day and night sky colors as `#rrggbb`.
    pub palette: SkyPalette,
    /// Replaces the preset's darkness periods when non-empty.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub darkness: Vec<PeriodSpec>,
    /// Replaces the preset's sky blend periods when non-empty.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sky_blend: Vec<PeriodSpec>,
}

impl Config {
    /// Default location of the config file.
    pub fn default_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load from the default location, falling back to defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => {
                info!("no config directory on this platform, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load and validate a config file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;

        debug!(path = %path.display(), preset = %config.preset, "loaded config");
        Ok(config)
    }

    /// Write the config, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source: std::io::Error| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(path, self.to_toml()?).map_err(write_err)?;
        info!(path = %path.display(), "saved config");
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every setting, including the period tables.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let multiplier = self.clock.multiplier;
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(ConfigError::Multiplier(multiplier));
        }
        if self.clock.tick_ms == 0 {
            return Err(ConfigError::TickInterval);
        }
        self.simulated_start()?;
        self.scene()?;
        Ok(())
    }

    /// Clock mode after applying the preset default.
    pub fn clock_mode(&self) -> ClockMode {
        self.clock.mode.unwrap_or(if self.preset.simulated_by_default() {
            ClockMode::Simulated
        } else {
            ClockMode::Wall
        })
    }

    /// Configured start of the simulated clock, if any.
    pub fn simulated_start(&self) -> Result<Option<ClockReading>, ConfigError> {
        Ok(self.clock.start.as_deref().map(str::parse::<ClockReading>).transpose()?)
    }

    /// Resolve the preset and overrides into a validated scene.
    pub fn scene(&self) -> Result<SceneConfig, ConfigError> {
        let mut scene = self.preset.scene().map_err(|source| ConfigError::Periods {
            table: "preset",
            source,
        })?;

        scene.palette = self.palette;
        if !self.darkness.is_empty() {
            scene.darkness = build_table("darkness", &self.darkness)?;
        }
        if !self.sky_blend.is_empty() {
            scene.sky_blend = build_table("sky_blend", &self.sky_blend)?;
        }

        Ok(scene)
    }
}

fn build_table(table: &'static str, specs: &[PeriodSpec]) -> Result<PeriodTable, ConfigError> {
    let periods = specs
        .iter()
        .map(PeriodSpec::to_period)
        .collect::<Result<Vec<_>, _>>()?;
    PeriodTable::new(periods).map_err(|source| ConfigError::Periods { table, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tronodoro_core::{PeriodTableError, Rgb};

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.preset, Preset::Parallax);
        assert_eq!(config.clock_mode(), ClockMode::Wall);
        assert_eq!(config.playback.volume, 50);
        assert_eq!(config.playback.policy, PendingPolicy::QueueLatest);
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = Config::default();
        config.preset = Preset::Classic;
        config.clock.start = Some("05:00".to_string());
        config.rain.enabled = true;

        let text = config.to_toml().unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_palette_colors_from_file() {
        let config: Config = toml::from_str(
            r##"
            [palette]
            night_top = "#000010"
            "##,
        )
        .unwrap();

        let scene = config.scene().unwrap();
        assert_eq!(scene.palette.night_top, Rgb::new(0x00, 0x00, 0x10));
        assert_eq!(scene.palette.day_top, SkyPalette::default().day_top);

        let text = config.to_toml().unwrap();
        assert!(text.contains("#000010"), "{text}");
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.palette, config.palette);
    }

    #[test]
    fn test_bad_palette_color_is_rejected() {
        let result = toml::from_str::<Config>(
            r##"
            [palette]
            day_top = "skyblue"
            "##,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            preset = "timelapse"

            [clock]
            multiplier = 1440.0
            start = "21:30"

            [playback]
            policy = "drop-before-ready"
            "#,
        )
        .unwrap();

        assert_eq!(config.clock_mode(), ClockMode::Simulated);
        assert_eq!(config.clock.tick_ms, 100);
        assert_eq!(
            config.simulated_start().unwrap(),
            ClockReading::new(21, 30, 0)
        );
        assert_eq!(config.playback.policy, PendingPolicy::DropBeforeReady);
        assert_eq!(config.playback.stream_id, "jfKfPfyJRdk");
    }

    #[test]
    fn test_period_overrides() {
        let config: Config = toml::from_str(
            r#"
            [[darkness]]
            kind = "night"
            start = "21:00"
            end = "05:00"
            from = 0.9

            [[darkness]]
            kind = "day"
            start = "05:00"
            end = "21:00"
            from = 0.9
            to = 0.9
            "#,
        )
        .unwrap();

        let scene = config.scene().unwrap();
        let periods = scene.darkness.periods();
        assert_eq!(periods.len(), 2);
        assert_eq!(periods[0].start, 21 * 60);
        assert_eq!(periods[0].ramp, Ramp::Hold(0.9));
        // Sky blend still comes from the preset.
        assert_eq!(scene.sky_blend.periods().len(), 4);
    }

    #[test]
    fn test_gapped_override_is_rejected() {
        let config: Config = toml::from_str(
            r#"
            [[sky_blend]]
            kind = "night"
            start = "22:00"
            end = "04:00"
            from = 1.0

            [[sky_blend]]
            kind = "day"
            start = "08:00"
            end = "22:00"
            from = 1.0
            "#,
        )
        .unwrap();

        match config.validate() {
            Err(ConfigError::Periods { table, source }) => {
                assert_eq!(table, "sky_blend");
                assert_eq!(source, PeriodTableError::Gap { from: 240, to: 480 });
            }
            other => panic!("expected a period error, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_bad_clock_settings() {
        let mut config = Config::default();
        config.clock.multiplier = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Multiplier(_))));

        let mut config = Config::default();
        config.clock.multiplier = f64::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::Multiplier(_))));

        let mut config = Config::default();
        config.clock.tick_ms = 0;
        assert!(matches!(config.validate(), Err(ConfigError::TickInterval)));

        let mut config = Config::default();
        config.clock.start = Some("25:00".to_string());
        assert!(matches!(config.validate(), Err(ConfigError::Time(_))));
    }

    #[test]
    fn test_boundary_must_be_whole_minute() {
        assert_eq!(parse_boundary("04:00").unwrap(), 240);
        assert!(matches!(
            parse_boundary("04:00:30"),
            Err(ConfigError::Boundary(_))
        ));
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("tronodoro-test-missing/config.toml");
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("tronodoro-test-{}", std::process::id()));
        let path = dir.join("nested/config.toml");

        let mut config = Config::default();
        config.preset = Preset::Timelapse;
        config.playback.volume = 80;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_parse_error_names_file() {
        let dir = std::env::temp_dir().join(format!("tronodoro-bad-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "preset = 42").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.toml"));

        let _ = fs::remove_dir_all(&dir);
    }
}
