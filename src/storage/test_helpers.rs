//! Shared test helpers for storage module tests.
//!
//! This module provides common utilities for database setup and test data creation
//! used across unit tests.

#[cfg(test)]
use sqlx::{Row, SqlitePool};

#[cfg(test)]
use crate::storage::run_migrations;

/// Creates a test database pool with migrations applied.
/// Uses an in-memory database for fast test execution.
#[cfg(test)]
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePool::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database pool");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

/// Creates a tracked site and returns its ID.
#[cfg(test)]
pub async fn insert_site(pool: &SqlitePool, site: &str) -> i64 {
    sqlx::query("INSERT INTO sites (site, scanned_at_ms) VALUES (?, ?) RETURNING id")
        .bind(site)
        .bind(1704067200000i64)
        .fetch_one(pool)
        .await
        .expect("Failed to insert test site")
        .get::<i64, _>(0)
}

/// Records one header for a site. `None` records the header as absent.
#[cfg(test)]
pub async fn insert_header(pool: &SqlitePool, site_id: i64, name: &str, value: Option<&str>) {
    sqlx::query(
        "INSERT INTO site_security_headers (site_id, header_name, header_value) VALUES (?, ?, ?)",
    )
    .bind(site_id)
    .bind(name)
    .bind(value)
    .execute(pool)
    .await
    .expect("Failed to insert test header");
}
