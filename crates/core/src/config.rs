//! Global configuration constants for sift.
//!
//! Retrieval tuning, ranking constants, and server defaults are defined here.
//! These are compile-time constants; the overridable subset is collected into
//! [`RankingConfig`] and [`FilterConfig`], which the server fills from CLI
//! arguments and environment variables in `main.rs`.

use serde::{Deserialize, Serialize};

/// BM25 Okapi term frequency saturation parameter.
///
/// Controls how quickly term frequency saturates. Higher values allow TF to grow more.
/// Standard value is 1.2 (range: 1.0–2.0).
pub const BM25_K1: f32 = 1.2;

/// BM25 Okapi document length normalization parameter.
///
/// 0.0 = no normalization, 1.0 = full normalization. Standard value is 0.75.
pub const BM25_B: f32 = 0.75;

/// Maximum number of candidates the retrieval engine returns per query.
pub const RETRIEVAL_DEPTH: usize = 1_000;

/// Title similarity ratio above which a job candidate is boosted.
///
/// The comparison is strict: a ratio of exactly 0.6 is not boosted.
pub const TITLE_MATCH_THRESHOLD: f64 = 0.6;

/// Multiplier applied to a job candidate whose title closely matches the residual query.
pub const TITLE_WEIGHT: f64 = 10.0;

/// Multiplier applied when the query asks for entry level and the posting is not entry level.
pub const ENTRY_LEVEL_PENALTY: f64 = 0.7;

/// Number of results per page at the HTTP boundary.
pub const PAGE_SIZE: usize = 10;

/// Default HTTP server port.
pub const DEFAULT_PORT: u16 = 5000;

/// Default directory for persisted indices.
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Default news snapshot path.
pub const DEFAULT_NEWS_CSV: &str = "./data/news.csv";

/// Default jobs snapshot path.
pub const DEFAULT_JOBS_CSV: &str = "./data/jobs.csv";

/// Per-request timeout in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum number of concurrent in-flight requests.
pub const MAX_CONCURRENT_REQUESTS: usize = 256;

/// Maximum accepted length of the `term` query parameter in bytes.
pub const MAX_TERM_LEN: usize = 1_024;

/// Overridable re-ranking parameters for the jobs pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Ratio a title must exceed to receive the boost.
    pub title_match_threshold: f64,
    /// Boost multiplier for close title matches.
    pub title_weight: f64,
    /// Multiplier for non-entry postings when the query asks for entry level.
    pub entry_level_penalty: f64,
    /// Candidates requested from the retrieval engine.
    pub retrieval_depth: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            title_match_threshold: TITLE_MATCH_THRESHOLD,
            title_weight: TITLE_WEIGHT,
            entry_level_penalty: ENTRY_LEVEL_PENALTY,
            retrieval_depth: RETRIEVAL_DEPTH,
        }
    }
}

impl RankingConfig {
    /// Rejects parameters that would make final scores non-finite or reorder
    /// candidates against their retrieval score.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.title_match_threshold) {
            return Err("title_match_threshold must be within 0.0-1.0".into());
        }
        for (name, value) in [
            ("title_weight", self.title_weight),
            ("entry_level_penalty", self.entry_level_penalty),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{name} must be a finite, non-negative number"));
            }
        }
        if self.retrieval_depth == 0 {
            return Err("retrieval_depth must be > 0".into());
        }
        Ok(())
    }
}

/// How a keyword is located inside a query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Raw substring containment / removal. Can match inside longer words
    /// ("contract" in "subcontractor").
    Substring,
    /// Whole-word matching on regex word boundaries.
    WordBoundary,
}

/// Matching strategies used by filter extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// How employment-type keywords are detected in the query.
    pub employment_match: MatchStrategy,
    /// How extracted filter words are removed when building the residual query.
    pub residual_removal: MatchStrategy,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            employment_match: MatchStrategy::WordBoundary,
            residual_removal: MatchStrategy::Substring,
        }
    }
}
