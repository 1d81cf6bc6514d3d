//! HTTP API server.
//!
//! Endpoints:
//! - `GET /api/v1/headers` - registered header kinds
//! - `GET /api/v1/header/{kind}` - value distribution chart for one header kind
//! - `GET /api/v1/headers/total` - number of tracked sites
//! - `GET /siteinfo/{site}` - security headers of one site and their adoption
//! - `POST /search_site` - form redirect to `/siteinfo/{site}`
//! - `GET /metrics` - Prometheus-compatible request counters
//!
//! Read endpoints are served through the response cache. Responses are
//! gzip-compressed when the client accepts it.

mod handlers;
mod types;

use std::future::Future;

use axum::routing::{get, post};
use axum::Router;
use tower_http::compression::CompressionLayer;

use handlers::{
    fallback_handler, header_chart_handler, index_handler, list_headers_handler,
    metrics_handler, search_site_handler, siteinfo_handler, total_sites_handler,
};
pub use types::{json_body, AppState, ErrorResponse};

/// Builds the router with all routes bound to `state`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/v1/headers", get(list_headers_handler))
        .route("/api/v1/headers/total", get(total_sites_handler))
        .route("/api/v1/header/{kind}", get(header_chart_handler))
        .route("/siteinfo/{site}", get(siteinfo_handler))
        .route("/search_site", post(search_site_handler))
        .route("/metrics", get(metrics_handler))
        .fallback(fallback_handler)
        .layer(CompressionLayer::new())
        .with_state(state)
}

/// Binds `addr` and serves the API until `shutdown` resolves.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn start_server<F>(addr: &str, state: AppState, shutdown: F) -> Result<(), anyhow::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind API server to {}: {}", addr, e))?;

    log::info!("API server listening on http://{}/", addr);
    log::info!("  - Header charts: http://{}/api/v1/header/{{kind}}", addr);
    log::info!("  - Site reports: http://{}/siteinfo/{{site}}", addr);
    log::info!("  - Metrics: http://{}/metrics", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| anyhow::anyhow!("API server error: {}", e))?;

    log::info!("API server stopped");
    Ok(())
}
