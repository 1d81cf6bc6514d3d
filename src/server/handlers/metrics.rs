//! Prometheus metrics handler.

use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
};
use std::fmt::Write;
use strum::IntoEnumIterator;

use super::super::types::AppState;
use crate::error_handling::RequestOutcome;

/// Prometheus-compatible metrics endpoint
pub async fn metrics_handler(State(state): State<AppState>) -> Response {
    let mut metrics = String::new();
    for outcome in RequestOutcome::iter() {
        let name = format!("header_stats_{}_total", outcome.as_str());
        // Writing to a String cannot fail.
        let _ = write!(
            metrics,
            "# HELP {name} {}\n# TYPE {name} counter\n{name} {}\n\n",
            outcome.description(),
            state.stats.get_count(outcome)
        );
    }
    let _ = write!(
        metrics,
        "# HELP header_stats_errors_total Requests answered with an error status\n\
         # TYPE header_stats_errors_total counter\n\
         header_stats_errors_total {}\n",
        state.stats.total_errors()
    );

    (
        StatusCode::OK,
        [(CONTENT_TYPE, "text/plain; version=0.0.4")],
        metrics,
    )
        .into_response()
}
