use std::{env, error::Error, io};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{ConfigPaths, LogLevel};

/// Environment variable selecting the log output format (`json` or `pretty`).
pub const LOG_FORMAT_ENV: &str = "PALETTE_LOG_FORMAT";

fn env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()))
}

fn wants_json() -> bool {
    env::var(LOG_FORMAT_ENV).is_ok_and(|format| format == "json")
}

/// Initialize tracing on stderr
///
/// Uses the RUST_LOG environment variable if set, otherwise the given level.
/// Supports both pretty console output and JSON output based on PALETTE_LOG_FORMAT.
/// Output goes to stderr so it never mixes with rendered command responses.
///
/// # Errors
/// Returns error if tracing subscriber initialization fails
pub fn init(level: LogLevel) -> Result<(), Box<dyn Error>> {
    let registry = tracing_subscriber::registry().with(env_filter(level));

    if wants_json() {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(io::stderr),
            )
            .try_init()?;
    }

    Ok(())
}

/// Initialize tracing with file output only
///
/// Keeps the interactive terminal clean by writing logs to a daily rotated
/// file in the palette log directory.
///
/// # Errors
/// Returns error if file creation or tracing subscriber initialization fails
pub fn init_with_file(level: LogLevel) -> Result<(), Box<dyn Error>> {
    const DAYS_TO_KEEP: usize = 7;

    let log_dir = ConfigPaths::log_dir()?;

    let file_appender = tracing_appender::rolling::Builder::new()
        .rotation(tracing_appender::rolling::Rotation::DAILY)
        .max_log_files(DAYS_TO_KEEP)
        .filename_prefix("palette")
        .filename_suffix("log")
        .build(&log_dir)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let registry = tracing_subscriber::registry().with(env_filter(level));

    if wants_json() {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(non_blocking)
                    .with_ansi(false),
            )
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(non_blocking)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    std::mem::forget(guard);

    Ok(())
}
