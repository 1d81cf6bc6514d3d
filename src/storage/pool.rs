//! Database connection pool management.
//!
//! This module opens the SQLite scan database with:
//! - Automatic database file creation (an empty dataset is still servable)
//! - Connection limits and a busy timeout
//! - Schema migrations applied at startup

use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use log::{error, info};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite, SqlitePool};

use crate::config::DB_BUSY_TIMEOUT;
use crate::error_handling::DatabaseError;

/// Shared handle to the scan database pool.
pub type DbPool = Arc<SqlitePool>;

/// Initializes and returns a database connection pool for `db_path`.
///
/// Creates the database file if it doesn't exist, enables WAL mode so that a
/// scanner can keep writing while the service reads, and applies migrations.
///
/// # Errors
///
/// Returns `DatabaseError::FileCreationError` if the file cannot be created or
/// the schema cannot be migrated, and `DatabaseError::SqlError` if the
/// connection fails.
pub async fn init_db_pool_with_path(
    db_path: &Path,
    max_connections: u32,
) -> Result<DbPool, DatabaseError> {
    let db_path_str = db_path.to_string_lossy().to_string();
    match OpenOptions::new()
        .read(true)
        .write(true)
        .create_new(true)
        .open(&db_path_str)
    {
        Ok(_) => info!("Database file created at {db_path_str} (empty dataset)."),
        Err(ref e) if e.kind() == ErrorKind::AlreadyExists => {
            info!("Using scan database at {db_path_str}.")
        }
        Err(e) => {
            error!("Failed to create database file: {e}");
            return Err(DatabaseError::FileCreationError(e.to_string()));
        }
    }

    let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", db_path_str))?
        .busy_timeout(DB_BUSY_TIMEOUT);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .connect_with(options)
        .await
        .map_err(|e| {
            error!("Failed to connect to database: {e}");
            DatabaseError::SqlError(e)
        })?;

    sqlx::query("PRAGMA journal_mode=WAL")
        .execute(&pool)
        .await
        .map_err(|e| {
            error!("Failed to set WAL mode: {e}");
            DatabaseError::SqlError(e)
        })?;

    run_migrations(&pool).await.map_err(|e| {
        error!("Failed to apply migrations: {e}");
        DatabaseError::FileCreationError(format!("migration failed: {e}"))
    })?;

    Ok(Arc::new(pool))
}

/// Runs SQLx migrations located in the `migrations/` directory.
///
/// Creates the scan dataset tables when they are missing.
pub async fn run_migrations(pool: &Pool<Sqlite>) -> Result<(), anyhow::Error> {
    let migrations_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("migrations");
    let migrator = sqlx::migrate::Migrator::new(migrations_dir.as_path()).await?;
    migrator.run(pool).await?;
    Ok(())
}
