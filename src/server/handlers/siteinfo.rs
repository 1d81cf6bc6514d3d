//! Site report handlers.

use axum::{
    extract::{Path, State},
    response::{Redirect, Response},
    Form,
};
use serde::Deserialize;

use super::super::types::AppState;
use crate::cache::cached_json;
use crate::config::SITE_REPORT_TTL;
use crate::error_handling::{RequestOutcome, StatsError};
use crate::stats::normalize_site;

/// Security headers of one site with the population share of each value.
///
/// An untracked site answers 200 with `found: false` and a `not_found` notice.
pub async fn siteinfo_handler(State(state): State<AppState>, Path(site): Path<String>) -> Response {
    let site = normalize_site(&site);
    let key = format!("/siteinfo/{site}");

    let result = cached_json(state.cache.as_ref(), &key, SITE_REPORT_TTL, || async {
        let report = state.engine.site_report(&site).await?;
        if !report.found {
            state.stats.increment(RequestOutcome::SiteNotFound);
        }
        if report.is_degraded() {
            state.stats.increment(RequestOutcome::DegradedReport);
        }
        Ok::<_, StatsError>(report)
    })
    .await;
    state.respond(result)
}

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    pub site: String,
}

/// Redirects a search form submission to the site report.
pub async fn search_site_handler(Form(form): Form<SearchForm>) -> Redirect {
    let site = normalize_site(&form.site);
    if site.is_empty() {
        return Redirect::to("/");
    }
    Redirect::to(&format!("/siteinfo/{}", urlencoding::encode(&site)))
}
