//! Configuration constants.
//!
//! This module defines the operational defaults used throughout the service:
//! cache lifetimes per route, dataset query timeouts and server defaults.

use std::time::Duration;

/// Default SQLite database path
pub const DB_PATH: &str = "./header_stats.db";

/// Default bind address for the HTTP server
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Default HTTP server port
pub const DEFAULT_PORT: u16 = 8080;

// Dataset access
/// Upper bound for a single dataset query.
/// Queries that exceed it are reported as `DataUnavailable`.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);
/// Maximum pooled SQLite connections
pub const DEFAULT_MAX_CONNECTIONS: u32 = 8;
/// How long SQLite waits on a locked database before giving up
pub const DB_BUSY_TIMEOUT: Duration = Duration::from_secs(3);

// Response cache lifetimes
// Site and header configuration changes slowly, so these are generous.
/// Per-site report lifetime (24 hours)
pub const SITE_REPORT_TTL: Duration = Duration::from_secs(24 * 60 * 60);
/// Per-header distribution lifetime (30 minutes)
pub const HEADER_DISTRIBUTION_TTL: Duration = Duration::from_secs(30 * 60);
/// Total tracked sites lifetime (24 hours)
pub const TOTAL_SITES_TTL: Duration = Duration::from_secs(24 * 60 * 60);
/// Maximum number of cached responses kept in memory
pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 10_000;
