//! Scored candidate and result view types.
//!
//! Scores are `f64` from retrieval onward; boosts and penalties are plain
//! multiplications on that value.

use crate::document::{JobPosting, NewsArticle};
use serde::Serialize;

/// A retrieval hit before hydration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredCandidate {
    /// Stable 0-based id in the corpus snapshot.
    pub doc_id: u32,
    /// Relevance score (BM25 from retrieval, adjusted by re-ranking for jobs).
    pub score: f64,
}

impl ScoredCandidate {
    pub fn new(doc_id: u32, score: f64) -> Self {
        Self { doc_id, score }
    }
}

/// News result projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsResult {
    pub title: String,
    pub description: String,
    pub link: String,
    pub date: String,
    pub score: f64,
}

impl NewsResult {
    pub fn project(article: &NewsArticle, score: f64) -> Self {
        Self {
            title: article.title.clone(),
            description: article.description.clone(),
            link: article.link.clone(),
            date: article.date.clone(),
            score,
        }
    }
}

/// Job result projection. Wire names follow the jobs snapshot columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobResult {
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(rename = "job_seniority_level")]
    pub seniority_level: String,
    #[serde(rename = "job_employment_type")]
    pub employment_type: String,
    pub score: f64,
    pub url: String,
    pub description: String,
}

impl JobResult {
    pub fn project(job: &JobPosting, score: f64) -> Self {
        Self {
            title: job.title.clone(),
            company: job.company.clone(),
            location: job.location.clone(),
            seniority_level: job.seniority_level.clone(),
            employment_type: job.employment_type.clone(),
            score,
            url: job.url.clone(),
            description: job.description.clone(),
        }
    }
}

/// Ordered results for one corpus.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SearchResults {
    News(Vec<NewsResult>),
    Jobs(Vec<JobResult>),
}

impl SearchResults {
    pub fn len(&self) -> usize {
        match self {
            SearchResults::News(r) => r.len(),
            SearchResults::Jobs(r) => r.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
