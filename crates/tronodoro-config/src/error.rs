//! Configuration errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tronodoro_core::{ParseReadingError, PeriodTableError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error(transparent)]
    Time(#[from] ParseReadingError),

    #[error("period boundary {0:?} must fall on a whole minute")]
    Boundary(String),

    #[error("invalid {table} table: {source}")]
    Periods {
        table: &'static str,
        #[source]
        source: PeriodTableError,
    },

    #[error("simulated clock multiplier must be positive and finite, got {0}")]
    Multiplier(f64),

    #[error("tick interval must be at least 1 ms")]
    TickInterval,
}
