//! BM25 full-text search engine.
//!
//! Implements Okapi BM25 scoring over an inverted index. Documents are tokenized
//! by splitting on non-alphanumeric characters with English stop word removal.
//! No stemming is applied.

/// Inverted index data structure with postings lists.
pub mod inverted_index;
/// BM25 Okapi scoring and query execution.
pub mod scorer;
/// Tokenizer with stop word filtering.
pub mod tokenizer;

pub use inverted_index::InvertedIndex;
pub use scorer::bm25_search;
