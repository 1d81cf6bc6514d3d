//! Error handling and request statistics.
//!
//! This module provides:
//! - Error type definitions (`StatsError`, `DatabaseError`, `InitializationError`)
//! - Request outcome statistics (`ServiceStats`)
//!
//! Dataset failures are caught at the service boundary and translated into
//! `StatsError::DataUnavailable`; an untracked site is not an error at all.

mod stats;
mod types;

// Re-export public API
pub use stats::ServiceStats;
pub use types::{DatabaseError, InitializationError, RequestOutcome, StatsError};
