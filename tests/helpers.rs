// Shared test helpers for database setup and test data creation.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use sqlx::{Row, SqlitePool};
use tower::ServiceExt;

use header_stats::cache::MemoryCache;
use header_stats::{build_router, run_migrations, AppState, HeaderDataset, SqliteDataset, StatsEngine};

/// Creates a test database pool with migrations applied.
/// Uses an in-memory database for fast test execution.
#[allow(dead_code)] // Used by other test files
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
#[allow(dead_code)]
pub async fn insert_site(pool: &SqlitePool, site: &str) -> i64 {
    sqlx::query("INSERT INTO sites (site, scanned_at_ms) VALUES (?, ?) RETURNING id")
        .bind(site)
        .bind(1704067200000i64)
        .fetch_one(pool)
        .await
        .expect("Failed to insert test site")
        .get::<i64, _>(0)
}

/// Records one header for a site. `None` records the header as not sent.
#[allow(dead_code)]
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

/// Tracks `site` with the given header records.
#[allow(dead_code)]
pub async fn seed_site(pool: &SqlitePool, site: &str, headers: &[(&str, Option<&str>)]) {
    let id = insert_site(pool, site).await;
    for (name, value) in headers {
        insert_header(pool, id, name, *value).await;
    }
}

/// Engine over a SQLite pool with a generous query timeout.
#[allow(dead_code)]
pub fn sqlite_engine(pool: &SqlitePool) -> StatsEngine {
    StatsEngine::new(Arc::new(SqliteDataset::new(
        Arc::new(pool.clone()),
        Duration::from_secs(5),
    )))
}

/// Application state over any dataset with a small in-memory cache.
#[allow(dead_code)]
pub fn app_state(dataset: Arc<dyn HeaderDataset>) -> AppState {
    AppState::new(StatsEngine::new(dataset), Arc::new(MemoryCache::new(100)))
}

/// Sends one request through a fresh router over `state`.
#[allow(dead_code)]
pub async fn send(state: &AppState, request: Request<Body>) -> Response<Body> {
    build_router(state.clone())
        .oneshot(request)
        .await
        .expect("router is infallible")
}

/// GET `uri`.
#[allow(dead_code)]
pub async fn get(state: &AppState, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request");
    send(state, request).await
}

/// Collects a response body into a string.
#[allow(dead_code)]
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

/// Collects a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).expect("json body")
}
