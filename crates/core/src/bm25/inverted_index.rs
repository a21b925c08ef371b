//! Inverted index for BM25 full-text search.
//!
//! Maps terms to postings lists (document ID + term frequency). Document IDs are
//! the corpus snapshot's 0-based ids.

use crate::bm25::tokenizer::tokenize;
use crate::document::CorpusDocument;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single entry in a term's postings list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    /// Document ID.
    pub doc_id: u32,
    /// Number of times the term appears in this document.
    pub term_frequency: u32,
}

/// Inverted index mapping terms to postings lists.
///
/// Built once from an immutable corpus snapshot. Document lengths are tracked
/// for BM25 length normalization.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct InvertedIndex {
    /// term → list of postings, in ascending doc id order
    pub index: HashMap<String, Vec<Posting>>,
    /// doc_id → document length (number of tokens).
    pub doc_lengths: Vec<u32>,
    /// Total number of documents indexed
    pub doc_count: u32,
    /// Sum of all document lengths (for average calculation)
    pub total_doc_length: u64,
}

impl InvertedIndex {
    /// Creates a new empty inverted index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every document of a corpus snapshot.
    pub fn build<D: CorpusDocument>(documents: &[D]) -> Self {
        let mut index = Self::new();
        for doc in documents {
            index.add_document(doc.id(), &doc.index_text());
        }
        index
    }

    /// Index a document's text under `doc_id`.
    pub fn add_document(&mut self, doc_id: u32, text: &str) {
        let tokens = tokenize(text);
        let doc_len = tokens.len() as u32;

        let idx = doc_id as usize;
        if idx >= self.doc_lengths.len() {
            self.doc_lengths.resize(idx + 1, 0);
        }
        self.doc_lengths[idx] = doc_len;
        self.doc_count += 1;
        self.total_doc_length += doc_len as u64;

        let mut tf_map: HashMap<&str, u32> = HashMap::new();
        for token in tokens.iter() {
            *tf_map.entry(token).or_insert(0) += 1;
        }

        for (term, tf) in tf_map {
            self.index.entry(term.to_string()).or_default().push(Posting {
                doc_id,
                term_frequency: tf,
            });
        }
    }

    /// Returns the average document length across all indexed documents.
    pub fn average_doc_length(&self) -> f32 {
        if self.doc_count == 0 {
            return 0.0;
        }
        self.total_doc_length as f32 / self.doc_count as f32
    }

    /// Check internal invariants after deserialization.
    pub fn validate(&self) -> Result<(), String> {
        if self.doc_lengths.len() != self.doc_count as usize {
            return Err(format!(
                "doc_lengths length {} != doc_count {}",
                self.doc_lengths.len(),
                self.doc_count
            ));
        }
        let summed: u64 = self.doc_lengths.iter().map(|&l| l as u64).sum();
        if summed != self.total_doc_length {
            return Err(format!(
                "sum of doc_lengths {} != total_doc_length {}",
                summed, self.total_doc_length
            ));
        }
        for (term, postings) in &self.index {
            if let Some(p) = postings.iter().find(|p| p.doc_id >= self.doc_count) {
                return Err(format!(
                    "term '{}' posts doc {} out of bounds (doc_count={})",
                    term, p.doc_id, self.doc_count
                ));
            }
        }
        Ok(())
    }
}
