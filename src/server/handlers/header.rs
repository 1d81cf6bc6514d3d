//! Header catalog and distribution chart handlers.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};

use super::super::types::AppState;
use crate::cache::cached_json;
use crate::catalog::{self, KindSummary};
use crate::config::HEADER_DISTRIBUTION_TTL;
use crate::error_handling::RequestOutcome;

/// Lists every registered header kind.
pub async fn list_headers_handler() -> Json<Vec<KindSummary>> {
    Json(
        catalog::list_kinds()
            .into_iter()
            .map(|kind| kind.summary())
            .collect(),
    )
}

/// Global value distribution of one header kind as a chart payload.
pub async fn header_chart_handler(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Response {
    let header = match catalog::resolve(&kind) {
        Ok(header) => header,
        Err(e) => {
            log::debug!("Rejected header slug {kind:?}");
            state.stats.increment(RequestOutcome::UnknownHeaderKind);
            return e.into_response();
        }
    };

    let key = format!("/api/v1/header/{}", header.id());
    let result = cached_json(state.cache.as_ref(), &key, HEADER_DISTRIBUTION_TTL, || {
        state.engine.header_chart(header)
    })
    .await;
    state.respond(result)
}
