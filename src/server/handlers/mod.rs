//! HTTP handlers.

mod header;
mod metrics;
mod siteinfo;
mod total;

use axum::{
    http::{StatusCode, Uri},
    response::{IntoResponse, Redirect, Response},
    Json,
};

use super::types::ErrorResponse;

pub use header::{header_chart_handler, list_headers_handler};
pub use metrics::metrics_handler;
pub use siteinfo::{search_site_handler, siteinfo_handler};
pub use total::total_sites_handler;

/// `/` points at the catalog listing.
pub async fn index_handler() -> Redirect {
    Redirect::to("/api/v1/headers")
}

/// JSON 404 for unknown routes.
pub async fn fallback_handler(uri: Uri) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("No route for {}", uri.path()),
        }),
    )
        .into_response()
}
