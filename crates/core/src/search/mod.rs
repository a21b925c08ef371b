//! Search primitives: result types, job filtering and re-ranking, and the
//! orchestrating [`SearchService`].

/// Hard attribute filter for job candidates.
pub mod filter;
/// Title boost, seniority penalty and stable score ordering.
pub mod ranking;
/// Per-corpus search pipelines over explicit service state.
pub mod service;
/// Ratcliff/Obershelp similarity ratio.
pub mod similarity;
/// Scored candidates and corpus-specific result projections.
pub mod types;

pub use ranking::{sort_by_score, RankedJob, RankingEngine};
pub use service::{IndexMode, SearchService};
pub use similarity::similarity_ratio;
pub use types::{JobResult, NewsResult, ScoredCandidate, SearchResults};
