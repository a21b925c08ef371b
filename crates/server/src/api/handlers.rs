//! HTTP request handlers and shared application state.

use crate::api::errors::ApiError;
use crate::api::metrics;
use crate::api::models::*;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use metrics_exporter_prometheus::PrometheusHandle;
use sift_core::config;
use sift_core::{CorpusType, SearchService};
use std::sync::Arc;
use std::time::Instant;

/// Shared application state passed to every handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SearchService>,
    pub prometheus_handle: PrometheusHandle,
    pub start_time: Instant,
}

/// `GET /search?type=&term=&start=`
///
/// `term` is checked before `type`. Results are paged by [`config::PAGE_SIZE`]
/// starting at `start`; `total` counts every ranked result.
pub async fn search(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let term = params
        .term
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Term is required".to_string()))?;
    if term.len() > config::MAX_TERM_LEN {
        return Err(ApiError::BadRequest(format!(
            "Term exceeds maximum of {} bytes",
            config::MAX_TERM_LEN
        )));
    }
    let corpus: CorpusType = params
        .search_type
        .as_deref()
        .unwrap_or_default()
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid search type".to_string()))?;
    let start = params.start.unwrap_or(0);

    // Retrieval and re-ranking are CPU-bound and a lazy index may build on first use.
    let service = Arc::clone(&state.service);
    let results = tokio::task::spawn_blocking(move || service.search_corpus(corpus, &term))
        .await
        .map_err(|e| {
            tracing::error!("Search task failed: {}", e);
            ApiError::Internal("Search failed".to_string())
        })??;

    metrics::record_search(corpus, results.len());
    Ok(Json(paginate(results, start, config::PAGE_SIZE)))
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        documents: DocumentCounts {
            news: state.service.document_count(CorpusType::News),
            jobs: state.service.document_count(CorpusType::Jobs),
        },
    })
}

/// `GET /metrics` in Prometheus text exposition format.
pub async fn metrics_endpoint(State(state): State<AppState>) -> String {
    state.prometheus_handle.render()
}
