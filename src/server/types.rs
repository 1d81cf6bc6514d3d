//! Server state and response types.

use std::sync::Arc;

use axum::{
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::cache::{Cached, ResponseCache};
use crate::error_handling::{RequestOutcome, ServiceStats, StatsError};
use crate::stats::StatsEngine;

/// Shared state for all handlers.
///
/// The dataset and cache are injected here at startup; handlers hold no
/// other state.
#[derive(Clone)]
pub struct AppState {
    pub engine: StatsEngine,
    pub cache: Arc<dyn ResponseCache>,
    pub stats: Arc<ServiceStats>,
}

impl AppState {
    pub fn new(engine: StatsEngine, cache: Arc<dyn ResponseCache>) -> Self {
        AppState {
            engine,
            cache,
            stats: Arc::new(ServiceStats::new()),
        }
    }

    /// Counts the outcome of a cache-aside call and turns it into a response.
    pub fn respond(&self, result: Result<Cached, StatsError>) -> Response {
        match result {
            Ok(cached) => {
                self.stats.increment(if cached.hit {
                    RequestOutcome::CacheHit
                } else {
                    RequestOutcome::CacheMiss
                });
                json_body(cached.body)
            }
            Err(e) => {
                self.stats.increment(RequestOutcome::from(&e));
                e.into_response()
            }
        }
    }
}

/// 200 response carrying an already serialized JSON body.
pub fn json_body(body: String) -> Response {
    (StatusCode::OK, [(CONTENT_TYPE, "application/json")], body).into_response()
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for StatsError {
    fn into_response(self) -> Response {
        let status = match &self {
            StatsError::UnknownHeaderKind(_) => StatusCode::NOT_FOUND,
            StatsError::DataUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            StatsError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Driver details stay in the log.
        let error = match &self {
            StatsError::UnknownHeaderKind(id) => format!("Unknown header kind: {id}"),
            StatsError::DataUnavailable(_) => "Scan data is temporarily unavailable".to_string(),
            StatsError::Serialization(_) => "Internal server error".to_string(),
        };
        (status, Json(ErrorResponse { error })).into_response()
    }
}
