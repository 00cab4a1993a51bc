//! File logging.
//!
//! The terminal belongs to the scene, so log output goes to
//! `tronodoro.log` in the data directory instead.

use std::fs;

use color_eyre::eyre::{WrapErr, eyre};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tronodoro_config::project_dirs;

const LOG_FILE: &str = "tronodoro.log";

/// Install the global subscriber. Filtering follows `RUST_LOG`, defaulting to
/// `info`. Returns `None` when the platform has no data directory.
///
/// Keep the guard alive until exit or buffered lines are lost.
pub fn init() -> color_eyre::Result<Option<WorkerGuard>> {
    let Some(dirs) = project_dirs() else {
        return Ok(None);
    };
    let dir = dirs.data_local_dir();
    fs::create_dir_all(dir)
        .wrap_err_with(|| format!("failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(writer)
        .try_init()
        .map_err(|err| eyre!("failed to install log subscriber: {err}"))?;

    Ok(Some(guard))
}
