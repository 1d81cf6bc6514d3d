//! Logger initialization.
//!
//! This module provides functions to initialize the logger with custom formatting.

use std::io::Write;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use log::LevelFilter;

/// Initializes the logger with the specified level and format.
///
/// Configures `env_logger` with custom formatting. Supports both plain text
/// (colored) and JSON formats for structured logging.
///
/// `level` is the default for every module, with `sqlx` clamped to warn and
/// `hyper` to info. Directives in `RUST_LOG` are applied last, so
/// `RUST_LOG=sqlx=debug` lifts the clamp for digging into queries.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// # Per-module filtering via RUST_LOG
/// RUST_LOG=header_stats=debug,sqlx=info header_stats --db-path scan.db
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let env_filters = std::env::var("RUST_LOG").ok();
    let logger = build_logger(level, format, env_filters.as_deref());
    let max_level = logger.filter();

    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(max_level);

    Ok(())
}

/// Builds the logger without installing it.
pub(crate) fn build_logger(
    level: LevelFilter,
    format: LogFormat,
    env_filters: Option<&str>,
) -> env_logger::Logger {
    let mut builder = env_logger::Builder::new();

    builder.filter_level(level);
    builder.filter_module("sqlx", LevelFilter::Warn);
    builder.filter_module("hyper", LevelFilter::Info);
    if let Some(filters) = env_filters {
        builder.parse_filters(filters);
    }

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{{\"ts\":{},\"level\":\"{}\",\"target\":\"{}\",\"msg\":{}}}",
                    chrono::Utc::now().timestamp_millis(),
                    record.level(),
                    record.target(),
                    serde_json::to_string(&record.args().to_string())
                        .unwrap_or_else(|_| "\"\"".into())
                )
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                let level = record.level();
                let colored_level = match level {
                    log::Level::Error => level.to_string().red(),
                    log::Level::Warn => level.to_string().yellow(),
                    log::Level::Info => level.to_string().green(),
                    log::Level::Debug => level.to_string().blue(),
                    log::Level::Trace => level.to_string().purple(),
                };

                writeln!(
                    buf,
                    "{} {} [{}] {}",
                    chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
                    record.target().cyan(),
                    colored_level,
                    record.args()
                )
            });
        }
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, Log, Metadata};

    fn enabled(logger: &env_logger::Logger, target: &str, level: Level) -> bool {
        logger.enabled(&Metadata::builder().target(target).level(level).build())
    }

    #[test]
    fn test_dependency_modules_are_clamped() {
        let logger = build_logger(LevelFilter::Debug, LogFormat::Plain, None);
        assert!(enabled(&logger, "header_stats::stats", Level::Debug));
        assert!(!enabled(&logger, "sqlx::query", Level::Info));
        assert!(enabled(&logger, "sqlx::query", Level::Warn));
        assert!(!enabled(&logger, "hyper::proto", Level::Debug));
    }

    #[test]
    fn test_rust_log_overrides_the_clamp() {
        let logger = build_logger(LevelFilter::Info, LogFormat::Json, Some("sqlx=debug"));
        assert!(enabled(&logger, "sqlx::query", Level::Debug));
        assert!(enabled(&logger, "header_stats", Level::Info));
        assert!(!enabled(&logger, "header_stats", Level::Debug));
    }

    #[test]
    fn test_rust_log_raises_one_module() {
        let logger = build_logger(
            LevelFilter::Warn,
            LogFormat::Plain,
            Some("header_stats=trace"),
        );
        assert!(enabled(&logger, "header_stats::cache", Level::Trace));
        assert!(!enabled(&logger, "axum", Level::Info));
        assert_eq!(logger.filter(), LevelFilter::Trace);
    }
}
