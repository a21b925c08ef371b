//! Query understanding: normalization, synonym expansion, and filter extraction.

/// Structured filter extraction and residual-query construction.
pub mod filters;
/// Lowercasing, technical-term rewrites, punctuation cleanup, synonym rules.
pub mod normalize;

pub use filters::{EmploymentType, FilterExtractor, ParsedQuery, Seniority};
pub use normalize::{apply_synonyms, clean_query, normalize_query, normalize_text};
