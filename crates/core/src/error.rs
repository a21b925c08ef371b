//! Error types for the search core.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading a corpus snapshot.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// The snapshot file does not exist.
    #[error("corpus snapshot not found: {0}")]
    Missing(PathBuf),
    /// The snapshot lacks a column the corpus schema requires.
    #[error("corpus snapshot {path} is missing required column '{column}'")]
    MissingColumn { path: PathBuf, column: &'static str },
    /// Malformed CSV.
    #[error("failed to read corpus snapshot: {0}")]
    Csv(#[from] csv::Error),
    /// Any other I/O fault.
    #[error("failed to open corpus snapshot: {0}")]
    Io(#[from] io::Error),
}

/// Errors surfaced by [`SearchService`](crate::search::SearchService).
#[derive(Debug, Error)]
pub enum SearchError {
    /// The requested corpus is neither `news` nor `jobs`.
    #[error("invalid corpus type '{0}'")]
    InvalidCorpusType(String),
    /// The retrieval index could not be built, loaded, or read.
    #[error("index error: {0}")]
    Index(#[from] io::Error),
    /// The corpus snapshot could not be loaded.
    #[error(transparent)]
    Corpus(#[from] CorpusError),
}
