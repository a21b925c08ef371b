//! Prometheus metrics recording.

use metrics::{counter, histogram};
use sift_core::CorpusType;
use std::time::Duration;

/// Records HTTP request metrics.
pub fn record_request(method: &str, path: &str, status: u16, duration: Duration) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];
    counter!("http_requests_total", &labels).increment(1);
    histogram!("http_request_duration_seconds", &labels).record(duration.as_secs_f64());
}

/// Records a completed search and its result count before pagination.
pub fn record_search(corpus: CorpusType, results: usize) {
    counter!("sift_search_total", "corpus" => corpus.as_str()).increment(1);
    histogram!("sift_search_results", "corpus" => corpus.as_str()).record(results as f64);
}
