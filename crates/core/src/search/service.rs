//! Search orchestration over both corpora.
//!
//! [`SearchService`] is built once at startup and shared read-only by every
//! request. It owns the corpus snapshots, one [`RetrievalClient`] per corpus, and
//! the query and ranking configuration.

use crate::config::{FilterConfig, RankingConfig};
use crate::document::{CorpusType, JobPosting, NewsArticle};
use crate::error::SearchError;
use crate::query::{normalize_query, FilterExtractor, ParsedQuery};
use crate::retrieval::{IndexHandle, LazyIndex, RetrievalClient};
use crate::search::ranking::{sort_by_score, RankingEngine};
use crate::search::{JobResult, NewsResult, SearchResults};
use crate::storage::{load_jobs, load_news, rebuild, Corpus, SnapshotPaths};
use std::path::Path;
use std::sync::Arc;

/// How indices are obtained when the service is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexMode {
    /// Load persisted indices, building any that are missing.
    #[default]
    BuildOrLoad,
    /// Discard persisted indices and build both from the snapshots.
    Rebuild,
    /// Defer build-or-load of each index to its first query.
    Lazy,
}

pub struct SearchService {
    news: Corpus<NewsArticle>,
    jobs: Corpus<JobPosting>,
    news_index: Arc<dyn RetrievalClient>,
    jobs_index: Arc<dyn RetrievalClient>,
    extractor: FilterExtractor,
    ranking: RankingEngine,
}

impl SearchService {
    /// Assemble a service from loaded corpora and their retrieval clients.
    pub fn new(
        news: Corpus<NewsArticle>,
        jobs: Corpus<JobPosting>,
        news_index: Arc<dyn RetrievalClient>,
        jobs_index: Arc<dyn RetrievalClient>,
    ) -> Self {
        Self {
            news,
            jobs,
            news_index,
            jobs_index,
            extractor: FilterExtractor::default(),
            ranking: RankingEngine::default(),
        }
    }

    pub fn with_filter_config(mut self, config: FilterConfig) -> Self {
        self.extractor = FilterExtractor::new(config);
        self
    }

    pub fn with_ranking_config(mut self, config: RankingConfig) -> Self {
        self.ranking = RankingEngine::new(config);
        self
    }

    /// Load both snapshots and their indices under `data_dir`.
    ///
    /// Fails if either snapshot is missing or an index cannot be built.
    pub fn open(data_dir: &Path, snapshots: &SnapshotPaths, mode: IndexMode) -> Result<Self, SearchError> {
        snapshots.check()?;
        let news = load_news(&snapshots.news)?;
        let jobs = load_jobs(&snapshots.jobs)?;

        let news_index: Arc<dyn RetrievalClient>;
        let jobs_index: Arc<dyn RetrievalClient>;
        match mode {
            IndexMode::BuildOrLoad => {
                news_index = Arc::new(IndexHandle::build_or_load(data_dir, &news)?);
                jobs_index = Arc::new(IndexHandle::build_or_load(data_dir, &jobs)?);
            }
            IndexMode::Rebuild => {
                news_index = Arc::new(IndexHandle::new(CorpusType::News, rebuild(data_dir, &news)?));
                jobs_index = Arc::new(IndexHandle::new(CorpusType::Jobs, rebuild(data_dir, &jobs)?));
            }
            IndexMode::Lazy => {
                news_index = Arc::new(LazyIndex::new(data_dir, news.clone()));
                jobs_index = Arc::new(LazyIndex::new(data_dir, jobs.clone()));
            }
        }

        Ok(Self::new(news, jobs, news_index, jobs_index))
    }

    pub fn ranking_config(&self) -> &RankingConfig {
        self.ranking.config()
    }

    /// Number of documents in the given corpus snapshot.
    pub fn document_count(&self, corpus: CorpusType) -> usize {
        match corpus {
            CorpusType::News => self.news.len(),
            CorpusType::Jobs => self.jobs.len(),
        }
    }

    /// Parse a job query without running it.
    pub fn parse(&self, raw: &str) -> ParsedQuery {
        self.extractor.parse(raw)
    }

    /// Run `raw` against the corpus named `corpus_type` (`news` or `jobs`).
    pub fn search(&self, corpus_type: &str, raw: &str) -> Result<SearchResults, SearchError> {
        self.search_corpus(corpus_type.parse()?, raw)
    }

    pub fn search_corpus(&self, corpus: CorpusType, raw: &str) -> Result<SearchResults, SearchError> {
        match corpus {
            CorpusType::News => self.search_news(raw).map(SearchResults::News),
            CorpusType::Jobs => self.search_jobs(raw).map(SearchResults::Jobs),
        }
    }

    /// Normalize, retrieve, and order news articles by retrieval score.
    pub fn search_news(&self, raw: &str) -> Result<Vec<NewsResult>, SearchError> {
        let normalized = normalize_query(raw);
        let mut candidates = self
            .news_index
            .search(&normalized, self.ranking.config().retrieval_depth)?;
        sort_by_score(&mut candidates);

        let docs = self.news.fetch(candidates.iter().map(|c| c.doc_id));
        let results: Vec<NewsResult> = candidates
            .iter()
            .filter_map(|c| docs.get(&c.doc_id).map(|a| NewsResult::project(a, c.score)))
            .collect();
        tracing::debug!(query = %normalized, results = results.len(), "news search");
        Ok(results)
    }

    /// Parse filters, retrieve on the residual query, then filter, rescore and sort.
    pub fn search_jobs(&self, raw: &str) -> Result<Vec<JobResult>, SearchError> {
        let parsed = self.extractor.parse(raw);
        tracing::debug!(
            residual = %parsed.residual_query,
            seniority = ?parsed.seniority,
            employment_type = ?parsed.employment_type,
            location = ?parsed.location,
            company = ?parsed.company,
            "parsed job query"
        );

        let candidates = self
            .jobs_index
            .search(&parsed.residual_query, self.ranking.config().retrieval_depth)?;
        let results: Vec<JobResult> = self
            .ranking
            .rank_jobs(&candidates, &self.jobs, &parsed)
            .into_iter()
            .map(|r| JobResult::project(r.job, r.score))
            .collect();
        tracing::debug!(
            candidates = candidates.len(),
            results = results.len(),
            "job search"
        );
        Ok(results)
    }
}
