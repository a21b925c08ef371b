//! Storage layer: corpus snapshots and persisted indices.
//!
//! Corpora are loaded from CSV once at startup and never mutated. Each corpus has
//! one BM25 index persisted as a bincode file (atomic temp-file + rename, CRC32
//! footer) and reused across restarts.

/// CSV snapshot loading into immutable corpora.
pub mod corpus;
/// Index save/load and the build-or-load lifecycle.
pub mod persistence;

pub use corpus::{load_jobs, load_news, Corpus, SnapshotPaths};
pub use persistence::{build_or_load, index_path, load_index, rebuild, save_index};
