//! Error type definitions.
//!
//! This module defines the error types used throughout the service and the
//! request outcome categories tracked by [`super::ServiceStats`].

use std::time::Duration;

use log::SetLoggerError;
use strum_macros::{EnumIter as EnumIterMacro, IntoStaticStr};
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error opening the scan database.
    #[error("Database initialization error: {0}")]
    DatabaseError(#[from] DatabaseError),
}

/// Error types for database operations.
///
/// These are raw dataset-layer failures. They are translated into
/// [`StatsError::DataUnavailable`] at the service boundary and never reach
/// an HTTP response as-is.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error creating or opening the database file.
    #[error("Database file creation error: {0}")]
    FileCreationError(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),

    /// The query did not finish within the configured bound.
    #[error("Query timed out after {0:?}")]
    QueryTimeout(Duration),
}

/// Errors surfaced by the statistics engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    /// The requested header slug is not in the catalog.
    #[error("Unknown header kind: {0}")]
    UnknownHeaderKind(String),

    /// The scan dataset could not be reached or the query timed out.
    #[error("Scan data unavailable: {0}")]
    DataUnavailable(String),

    /// A computed response could not be encoded.
    #[error("Response serialization failed: {0}")]
    Serialization(String),
}

impl From<DatabaseError> for StatsError {
    fn from(err: DatabaseError) -> Self {
        log::error!("Dataset query failed: {err}");
        StatsError::DataUnavailable(err.to_string())
    }
}

/// Outcomes counted for every API request.
///
/// The string form is the Prometheus metric suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum RequestOutcome {
    /// Response served from the cache
    CacheHit,
    /// Response computed from the dataset
    CacheMiss,
    /// Header slug not in the catalog (404)
    UnknownHeaderKind,
    /// Dataset unreachable or timed out (503)
    DataUnavailable,
    /// Site lookup for an untracked site
    SiteNotFound,
    /// Site report served with at least one unavailable header entry
    DegradedReport,
}

impl RequestOutcome {
    /// Metric name suffix, e.g. `cache_hit`.
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Short description used in the Prometheus `# HELP` line.
    pub fn description(self) -> &'static str {
        match self {
            RequestOutcome::CacheHit => "Responses served from the response cache",
            RequestOutcome::CacheMiss => "Responses computed from the scan dataset",
            RequestOutcome::UnknownHeaderKind => "Requests for a header kind not in the catalog",
            RequestOutcome::DataUnavailable => "Requests failed because the dataset was unavailable",
            RequestOutcome::SiteNotFound => "Site lookups for untracked sites",
            RequestOutcome::DegradedReport => "Site reports with at least one unavailable header",
        }
    }
}

impl From<&StatsError> for RequestOutcome {
    fn from(err: &StatsError) -> Self {
        match err {
            StatsError::UnknownHeaderKind(_) => RequestOutcome::UnknownHeaderKind,
            StatsError::DataUnavailable(_) | StatsError::Serialization(_) => {
                RequestOutcome::DataUnavailable
            }
        }
    }
}
