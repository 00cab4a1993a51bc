use std::path::PathBuf;

use clap::Parser;
use tronodoro_config::{ClockMode, Config, ConfigError, Preset};

/// A day/night ambient scene with a clock, rain and background music
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Scene preset: classic, parallax or timelapse
    #[arg(long, value_name = "NAME")]
    pub preset: Option<Preset>,

    /// Run on an accelerated clock
    #[arg(long)]
    pub simulated: bool,

    /// Simulated seconds per real second
    #[arg(long, value_name = "N")]
    pub multiplier: Option<f64>,

    /// Simulated start time (implies --simulated)
    #[arg(long, value_name = "HH:MM")]
    pub start: Option<String>,

    /// Start with rain falling
    #[arg(long)]
    pub rain: bool,

    /// Print the resolved configuration and exit
    #[arg(long)]
    pub print_config: bool,
}

impl Args {
    /// Load the config file and apply command line overrides on top.
    pub fn load_config(&self) -> Result<Config, ConfigError> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    fn apply(&self, config: &mut Config) {
        if let Some(preset) = self.preset {
            config.preset = preset;
        }
        if self.simulated || self.start.is_some() {
            config.clock.mode = Some(ClockMode::Simulated);
        }
        if let Some(multiplier) = self.multiplier {
            config.clock.multiplier = multiplier;
        }
        if let Some(start) = &self.start {
            config.clock.start = Some(start.clone());
        }
        if self.rain {
            config.rain.enabled = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("tronodoro").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_no_flags_keep_config() {
        let mut config = Config::default();
        parse(&[]).apply(&mut config);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_overrides() {
        let mut config = Config::default();
        parse(&["--preset", "classic", "--multiplier", "60", "--rain"]).apply(&mut config);

        assert_eq!(config.preset, Preset::Classic);
        assert_eq!(config.clock.multiplier, 60.0);
        assert!(config.rain.enabled);
        assert_eq!(config.clock_mode(), ClockMode::Wall);
    }

    #[test]
    fn test_start_implies_simulated() {
        let mut config = Config::default();
        parse(&["--start", "05:00"]).apply(&mut config);

        assert_eq!(config.clock_mode(), ClockMode::Simulated);
        assert_eq!(config.clock.start.as_deref(), Some("05:00"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bad_start_fails_validation() {
        let mut config = Config::default();
        parse(&["--start", "25:00"]).apply(&mut config);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_preset_is_rejected() {
        let result = Args::try_parse_from(["tronodoro", "--preset", "sunset"]);
        assert!(result.is_err());
    }
}
