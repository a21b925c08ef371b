//! Retrieval client: the boundary between query understanding and the BM25 engine.
//!
//! The core only depends on [`RetrievalClient`]. [`IndexHandle`] serves an index
//! built or loaded at startup; [`LazyIndex`] defers build-or-load to the first
//! query, with concurrent first queries blocking on a single construction.

use crate::bm25::{bm25_search, InvertedIndex};
use crate::document::{CorpusDocument, CorpusType};
use crate::search::ScoredCandidate;
use crate::storage::{build_or_load, Corpus};
use once_cell::sync::OnceCell;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Ranked retrieval over one corpus.
///
/// Implementations return candidates highest score first and must be
/// deterministic for a given index. Errors propagate to the caller unchanged.
pub trait RetrievalClient: Send + Sync {
    /// Corpus this client serves.
    fn corpus(&self) -> CorpusType;

    /// At most `depth` candidates for `query`, score descending. May be empty.
    fn search(&self, query: &str, depth: usize) -> io::Result<Vec<ScoredCandidate>>;
}

/// Shared, read-only handle to a loaded index.
#[derive(Debug, Clone)]
pub struct IndexHandle {
    corpus: CorpusType,
    index: Arc<InvertedIndex>,
}

impl IndexHandle {
    pub fn new(corpus: CorpusType, index: InvertedIndex) -> Self {
        Self {
            corpus,
            index: Arc::new(index),
        }
    }

    /// Load the persisted index for `corpus` from `dir`, or build and persist it.
    pub fn build_or_load<D: CorpusDocument>(dir: &Path, corpus: &Corpus<D>) -> io::Result<Self> {
        Ok(Self::new(corpus.kind(), build_or_load(dir, corpus)?))
    }

    /// Number of documents in the index.
    pub fn doc_count(&self) -> usize {
        self.index.doc_count as usize
    }
}

impl RetrievalClient for IndexHandle {
    fn corpus(&self) -> CorpusType {
        self.corpus
    }

    fn search(&self, query: &str, depth: usize) -> io::Result<Vec<ScoredCandidate>> {
        Ok(bm25_search(&self.index, query, depth)
            .into_iter()
            .map(|(doc_id, score)| ScoredCandidate::new(doc_id, score as f64))
            .collect())
    }
}

/// An index that is built or loaded on first use.
pub struct LazyIndex<D> {
    dir: PathBuf,
    corpus: Corpus<D>,
    cell: OnceCell<IndexHandle>,
}

impl<D: CorpusDocument> LazyIndex<D> {
    pub fn new(dir: impl Into<PathBuf>, corpus: Corpus<D>) -> Self {
        Self {
            dir: dir.into(),
            corpus,
            cell: OnceCell::new(),
        }
    }

    /// Returns `true` once the index has been built or loaded.
    pub fn is_ready(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Build or load the index if that has not happened yet.
    ///
    /// Concurrent callers block until the single in-flight construction
    /// finishes. A failed attempt leaves the cell empty so a later call retries.
    pub fn handle(&self) -> io::Result<&IndexHandle> {
        self.cell
            .get_or_try_init(|| IndexHandle::build_or_load(&self.dir, &self.corpus))
    }
}

impl<D: CorpusDocument + Send + Sync> RetrievalClient for LazyIndex<D> {
    fn corpus(&self) -> CorpusType {
        self.corpus.kind()
    }

    fn search(&self, query: &str, depth: usize) -> io::Result<Vec<ScoredCandidate>> {
        self.handle()?.search(query, depth)
    }
}
