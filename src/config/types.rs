//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DB_PATH, DEFAULT_CACHE_MAX_ENTRIES, DEFAULT_HOST, DEFAULT_MAX_CONNECTIONS, DEFAULT_PORT,
    DEFAULT_QUERY_TIMEOUT,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Service configuration.
///
/// Parsed from the command line by the binary, or constructed directly by
/// library users and tests.
///
/// # Examples
///
/// ```bash
/// # Serve an existing scan database on the default port
/// header_stats --db-path ./scan.db
///
/// # Public bind with a tighter query timeout
/// header_stats --host 0.0.0.0 --port 9000 --query-timeout-seconds 2
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "header_stats",
    about = "Serves HTTP security header adoption statistics from a scan database."
)]
pub struct Config {
    /// Database path (SQLite file)
    #[arg(long, value_parser, default_value = DB_PATH)]
    pub db_path: PathBuf,

    /// Address to bind the HTTP server to
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,

    /// HTTP server port
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Per-query timeout in seconds
    ///
    /// A dataset query that runs longer is abandoned and the request
    /// answers with 503 Service Unavailable.
    #[arg(long, default_value_t = DEFAULT_QUERY_TIMEOUT.as_secs())]
    pub query_timeout_seconds: u64,

    /// Maximum pooled database connections
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Maximum number of cached responses held in memory
    #[arg(long, default_value_t = DEFAULT_CACHE_MAX_ENTRIES)]
    pub cache_max_entries: usize,
}

impl Config {
    /// Per-query timeout as a `Duration`.
    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_seconds)
    }

    /// `host:port` string for binding the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DB_PATH),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            query_timeout_seconds: DEFAULT_QUERY_TIMEOUT.as_secs(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            cache_max_entries: DEFAULT_CACHE_MAX_ENTRIES,
        }
    }
}
