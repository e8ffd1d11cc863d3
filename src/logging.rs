//! File-based logging setup.
//!
//! The TUI owns the terminal, so logs go to a rotating file instead of
//! stdout. The returned guard must stay alive for the lifetime of the
//! process; dropping it shuts the background log writer down.

use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LogSettings;

const LOG_FILE_PREFIX: &str = "attacca";

/// Initialize the logging system.
///
/// Logs are written to `<directory>/attacca.YYYY-MM-DD.log` with daily
/// rotation. The filter comes from `RUST_LOG` when set, otherwise from the
/// `[log]` section of the config.
pub fn init(settings: &LogSettings) -> io::Result<WorkerGuard> {
    let log_dir = Path::new(&settings.directory);
    if !log_dir.exists() {
        std::fs::create_dir_all(log_dir)?;
    }

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.filter.clone()));

    let fmt_layer = fmt::layer()
        .with_writer(non_blocking)
        // No ANSI colors in log files.
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();

    tracing::info!(directory = %settings.directory, "logging initialized");
    Ok(guard)
}
