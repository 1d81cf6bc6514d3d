//! Application initialization and resource setup.
//!
//! This module builds the shared resources the server is started with:
//! - Logger
//! - Database connection pool and dataset
//! - Statistics engine and response cache
//!
//! Everything is created once at startup and passed down explicitly.

mod logger;

use std::sync::Arc;

use crate::cache::MemoryCache;
use crate::config::Config;
use crate::error_handling::InitializationError;
use crate::server::AppState;
use crate::stats::StatsEngine;
use crate::storage::{init_db_pool_with_path, DbPool, SqliteDataset};

// Re-export public API
pub use logger::init_logger_with;

/// Opens the scan database and wires the application state.
///
/// Returns the pool alongside the state so the caller can close it on
/// shutdown.
///
/// # Errors
///
/// Returns `InitializationError::DatabaseError` if the database cannot be opened.
pub async fn init_app_state(config: &Config) -> Result<(AppState, DbPool), InitializationError> {
    let pool = init_db_pool_with_path(&config.db_path, config.max_connections).await?;
    let dataset = SqliteDataset::new(Arc::clone(&pool), config.query_timeout());
    let engine = StatsEngine::new(Arc::new(dataset));
    let cache = Arc::new(MemoryCache::new(config.cache_max_entries));
    Ok((AppState::new(engine, cache), pool))
}
