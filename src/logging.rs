use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Route `tracing` output to a daily file; the terminal belongs to the UI.
///
/// The returned guard flushes pending lines on drop and must live until exit.
pub fn init(config: &Config) -> Result<WorkerGuard> {
    std::fs::create_dir_all(&config.log_dir)?;

    let appender = tracing_appender::rolling::daily(&config.log_dir, "rental_console.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .init();

    Ok(guard)
}
