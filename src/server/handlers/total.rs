//! Total tracked sites handler.

use axum::{extract::State, response::Response};

use super::super::types::AppState;
use crate::cache::cached_json;
use crate::config::TOTAL_SITES_TTL;

/// Number of tracked sites as a bare JSON integer.
pub async fn total_sites_handler(State(state): State<AppState>) -> Response {
    let result = cached_json(
        state.cache.as_ref(),
        "/api/v1/headers/total",
        TOTAL_SITES_TTL,
        || state.engine.total_sites(),
    )
    .await;
    state.respond(result)
}
