//! File logging. The terminal belongs to the UI, so nothing is written to stderr.
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE: &str = "client.log";

/// Install the global subscriber writing to `<dir>/client.log`.
///
/// Keep the returned guard alive for as long as logs should be flushed.
pub fn setup_logging(log_dir: Option<&Path>) -> Result<WorkerGuard> {
    let log_dir = log_dir.map(Path::to_path_buf).unwrap_or_else(default_log_dir);
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, LOG_FILE);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()?;

    tracing::info!("Log file: {}", log_dir.join(LOG_FILE).display());

    Ok(guard)
}

/// `$XDG_CACHE_HOME/carlosweeper/logs`, falling back to `~/.cache` and then the temp dir.
fn default_log_dir() -> PathBuf {
    let base = std::env::var_os("XDG_CACHE_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".cache")))
        .unwrap_or_else(std::env::temp_dir);

    base.join("carlosweeper").join("logs")
}
