//! # sift-core
//!
//! Query understanding, BM25 retrieval and re-ranking for a news and job-posting
//! search service.
//!
//! This is the core library crate with no async dependencies. The HTTP boundary
//! lives in `sift-server`.

/// BM25 full-text search: inverted index, Okapi BM25 scoring, and tokenizer.
pub mod bm25;
/// Global configuration constants and overridable ranking/filter parameters.
pub mod config;
/// Corpus identifiers and per-corpus document records.
pub mod document;
/// Error types for snapshot loading and search.
pub mod error;
/// Query normalization, synonym expansion and filter extraction.
pub mod query;
/// Retrieval client trait and index handles.
pub mod retrieval;
/// Result types, job re-ranking, and the search service.
pub mod search;
/// Corpus snapshots and persisted indices.
pub mod storage;

pub use document::CorpusType;
pub use error::{CorpusError, SearchError};
pub use search::{IndexMode, SearchResults, SearchService};
