//! Job re-ranking: hard filter, title boost, seniority penalty, sort.
//!
//! Boost and penalty are multiplications on the retrieval score and never change
//! which candidates survive; only the hard filter does that. Sorting is stable,
//! so candidates with equal final scores keep their retrieval order.

use crate::config::RankingConfig;
use crate::document::JobPosting;
use crate::query::{ParsedQuery, Seniority};
use crate::search::filter::matches_job_filters;
use crate::search::similarity::similarity_ratio;
use crate::search::ScoredCandidate;
use crate::storage::Corpus;

/// Order candidates by score descending, keeping retrieval order on ties.
///
/// Uses the IEEE total order, so a NaN score sorts first instead of
/// breaking the comparator.
pub fn sort_by_score(candidates: &mut [ScoredCandidate]) {
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
}

/// A surviving job candidate with its final score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedJob<'a> {
    pub job: &'a JobPosting,
    pub score: f64,
}

/// Applies the jobs re-ranking pipeline with a fixed [`RankingConfig`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RankingEngine {
    config: RankingConfig,
}

impl RankingEngine {
    pub fn new(config: RankingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    /// Multiplier for a title similarity ratio. The threshold is exclusive.
    pub fn boost_for_ratio(&self, ratio: f64) -> f64 {
        if ratio > self.config.title_match_threshold {
            self.config.title_weight
        } else {
            1.0
        }
    }

    /// Multiplier from comparing the lowercased title with the lowercased residual query.
    pub fn title_boost(&self, title: &str, residual_query: &str) -> f64 {
        let ratio = similarity_ratio(&title.to_lowercase(), &residual_query.to_lowercase());
        self.boost_for_ratio(ratio)
    }

    /// Multiplier for a posting whose seniority field lacks "entry" when the query asks for entry level.
    pub fn seniority_penalty(&self, requested: Option<Seniority>, job_seniority: &str) -> f64 {
        match requested {
            Some(Seniority::Entry) if !job_seniority.to_lowercase().contains("entry") => {
                self.config.entry_level_penalty
            }
            _ => 1.0,
        }
    }

    /// Final score of `job` for `query`: boost first, then penalty.
    pub fn rescore(&self, job: &JobPosting, query: &ParsedQuery, score: f64) -> f64 {
        let boosted = score * self.title_boost(&job.title, &query.residual_query);
        boosted * self.seniority_penalty(query.seniority, &job.seniority_level)
    }

    /// Hydrate, filter, rescore and sort job candidates.
    ///
    /// Candidates whose id is not in `corpus` are skipped.
    pub fn rank_jobs<'a>(
        &self,
        candidates: &[ScoredCandidate],
        corpus: &'a Corpus<JobPosting>,
        query: &ParsedQuery,
    ) -> Vec<RankedJob<'a>> {
        let docs = corpus.fetch(candidates.iter().map(|c| c.doc_id));

        let mut ranked: Vec<RankedJob<'a>> = candidates
            .iter()
            .filter_map(|c| docs.get(&c.doc_id).map(|job| (*job, c.score)))
            .filter(|(job, _)| matches_job_filters(job, query))
            .map(|(job, score)| RankedJob {
                job,
                score: self.rescore(job, query, score),
            })
            .collect();

        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::CorpusType;

    fn posting(id: u32, title: &str, location: &str, seniority: &str) -> JobPosting {
        JobPosting {
            id,
            title: title.into(),
            description: String::new(),
            company: "Acme".into(),
            location: location.into(),
            seniority_level: seniority.into(),
            employment_type: "Full-time".into(),
            url: format!("https://j/{id}"),
            logo: String::new(),
        }
    }

    fn corpus(jobs: Vec<JobPosting>) -> Corpus<JobPosting> {
        Corpus::new(CorpusType::Jobs, jobs)
    }

    #[test]
    fn test_boost_threshold_is_exclusive() {
        let engine = RankingEngine::default();
        assert_eq!(engine.boost_for_ratio(0.9), 10.0);
        assert_eq!(engine.boost_for_ratio(0.3), 1.0);
        assert_eq!(engine.boost_for_ratio(0.6), 1.0);
    }

    #[test]
    fn test_equal_scores_split_by_title_ratio() {
        // Against "abcdefghij": "abcdefghik" scores 0.9, "abcyyyyyyy" scores 0.3.
        let corpus = corpus(vec![
            posting(0, "abcyyyyyyy", "Leeds", ""),
            posting(1, "abcdefghik", "Leeds", ""),
        ]);
        let query = ParsedQuery {
            residual_query: "abcdefghij".into(),
            ..Default::default()
        };
        let candidates = [ScoredCandidate::new(0, 3.0), ScoredCandidate::new(1, 3.0)];

        let ranked = RankingEngine::default().rank_jobs(&candidates, &corpus, &query);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].job.id, 1);
        assert_eq!(ranked[0].score, 30.0);
        assert_eq!(ranked[1].job.id, 0);
        assert_eq!(ranked[1].score, 3.0);
    }

    #[test]
    fn test_penalty_is_exact() {
        let engine = RankingEngine::default();
        let job = posting(0, "Warehouse Operative", "Leeds", "Mid-Senior level");
        let query = ParsedQuery {
            residual_query: "react developer".into(),
            seniority: Some(Seniority::Entry),
            ..Default::default()
        };
        assert_eq!(engine.rescore(&job, &query, 2.0), 2.0 * 0.7);

        // Composes with the boost.
        let job = posting(0, "React Developer", "Leeds", "Associate");
        assert_eq!(engine.rescore(&job, &query, 2.0), 2.0 * 10.0 * 0.7);

        let job = posting(0, "React Developer", "Leeds", "Entry level");
        assert_eq!(engine.rescore(&job, &query, 2.0), 20.0);
    }

    #[test]
    fn test_penalty_only_for_entry_requests() {
        let engine = RankingEngine::default();
        assert_eq!(engine.seniority_penalty(Some(Seniority::Senior), "Internship"), 1.0);
        assert_eq!(engine.seniority_penalty(None, "Director"), 1.0);
        assert_eq!(engine.seniority_penalty(Some(Seniority::Entry), "ENTRY LEVEL"), 1.0);
    }

    #[test]
    fn test_filtering_is_a_subset() {
        let corpus = corpus(vec![
            posting(0, "React Developer", "London, UK", "Senior level"),
            posting(1, "React Developer", "Manchester", "Senior level"),
            posting(2, "Rust Engineer", "Greater London", "Senior level"),
        ]);
        let query = ParsedQuery {
            residual_query: "react developer".into(),
            location: Some("london".into()),
            ..Default::default()
        };
        let candidates: Vec<ScoredCandidate> =
            (0..3).map(|id| ScoredCandidate::new(id, 1.0)).collect();

        let ranked = RankingEngine::default().rank_jobs(&candidates, &corpus, &query);
        assert_eq!(ranked.len(), 2);
        assert!(ranked
            .iter()
            .all(|r| r.job.location.to_lowercase().contains("london")));
        assert!(ranked.iter().all(|r| candidates.iter().any(|c| c.doc_id == r.job.id)));
    }

    #[test]
    fn test_ties_keep_retrieval_order() {
        let corpus = corpus((0..4).map(|id| posting(id, "Barista", "Leeds", "")).collect());
        let query = ParsedQuery {
            residual_query: "software architect".into(),
            ..Default::default()
        };
        let candidates = [
            ScoredCandidate::new(2, 1.0),
            ScoredCandidate::new(0, 1.0),
            ScoredCandidate::new(3, 1.5),
            ScoredCandidate::new(1, 1.0),
        ];

        let ranked = RankingEngine::default().rank_jobs(&candidates, &corpus, &query);
        let ids: Vec<u32> = ranked.iter().map(|r| r.job.id).collect();
        assert_eq!(ids, vec![3, 2, 0, 1]);
    }

    #[test]
    fn test_unknown_ids_skipped() {
        let corpus = corpus(vec![posting(0, "Barista", "Leeds", "")]);
        let candidates = [ScoredCandidate::new(0, 1.0), ScoredCandidate::new(9, 5.0)];
        let ranked = RankingEngine::default().rank_jobs(&candidates, &corpus, &ParsedQuery::default());
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn test_custom_weights() {
        let engine = RankingEngine::new(RankingConfig {
            title_weight: 2.0,
            entry_level_penalty: 0.5,
            ..Default::default()
        });
        let job = posting(0, "React Developer", "Leeds", "Mid level");
        let query = ParsedQuery {
            residual_query: "react developer".into(),
            seniority: Some(Seniority::Entry),
            ..Default::default()
        };
        assert_eq!(engine.rescore(&job, &query, 4.0), 4.0);
    }

    #[test]
    fn test_sort_by_score_is_stable() {
        let mut candidates = vec![
            ScoredCandidate::new(5, 0.5),
            ScoredCandidate::new(1, 2.0),
            ScoredCandidate::new(4, 0.5),
            ScoredCandidate::new(3, 2.0),
        ];
        sort_by_score(&mut candidates);
        let ids: Vec<u32> = candidates.iter().map(|c| c.doc_id).collect();
        assert_eq!(ids, vec![1, 3, 5, 4]);
    }

    #[test]
    fn test_sort_by_score_total_order_with_nan() {
        let mut candidates = vec![
            ScoredCandidate::new(1, 1.0),
            ScoredCandidate::new(2, f64::NAN),
            ScoredCandidate::new(3, 3.0),
            ScoredCandidate::new(4, 1.0),
        ];
        sort_by_score(&mut candidates);
        let ids: Vec<u32> = candidates.iter().map(|c| c.doc_id).collect();
        assert_eq!(ids, vec![2, 3, 1, 4]);
    }
}
