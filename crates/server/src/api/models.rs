//! Request and response data transfer objects for the REST API.

use serde::{Deserialize, Serialize};
use sift_core::SearchResults;

/// Query string of `GET /search`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Corpus name: `news` or `jobs`.
    #[serde(rename = "type")]
    pub search_type: Option<String>,
    pub term: Option<String>,
    /// Offset of the first returned result.
    pub start: Option<usize>,
}

/// Response body for `GET /search`.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    /// One page of results.
    pub results: SearchResults,
    /// Number of results before pagination.
    pub total: usize,
}

/// Per-corpus document counts reported by `/health`.
#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentCounts {
    pub news: usize,
    pub jobs: usize,
}

/// Response body for `GET /health`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub documents: DocumentCounts,
}

fn page<T>(items: Vec<T>, start: usize, size: usize) -> Vec<T> {
    items.into_iter().skip(start).take(size).collect()
}

/// Slice one page out of `results` and report the full count alongside it.
pub fn paginate(results: SearchResults, start: usize, size: usize) -> SearchResponse {
    let total = results.len();
    let results = match results {
        SearchResults::News(items) => SearchResults::News(page(items, start, size)),
        SearchResults::Jobs(items) => SearchResults::Jobs(page(items, start, size)),
    };
    SearchResponse { results, total }
}
