//! Core document types for sift.
//!
//! Each corpus has its own record type. Ids are stable, 0-based positions in the
//! loaded snapshot and double as the internal document id of the BM25 index, so a
//! retrieval hit indexes straight into the snapshot slice.

use crate::error::SearchError;
use crate::query::normalize::normalize_text;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two independent document collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorpusType {
    News,
    Jobs,
}

impl CorpusType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CorpusType::News => "news",
            CorpusType::Jobs => "jobs",
        }
    }
}

impl fmt::Display for CorpusType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CorpusType {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "news" => Ok(CorpusType::News),
            "jobs" => Ok(CorpusType::Jobs),
            other => Err(SearchError::InvalidCorpusType(other.to_string())),
        }
    }
}

/// A record that can be fed to the inverted index.
pub trait CorpusDocument {
    /// Stable 0-based id within the corpus.
    fn id(&self) -> u32;

    /// Text handed to the tokenizer at index time.
    fn index_text(&self) -> String;
}

/// A news article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub link: String,
    pub date: String,
}

impl CorpusDocument for NewsArticle {
    fn id(&self) -> u32 {
        self.id
    }

    fn index_text(&self) -> String {
        normalize_text(&format!("{} {}", self.title, self.description))
    }
}

/// A job posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub company: String,
    pub location: String,
    pub seniority_level: String,
    pub employment_type: String,
    pub url: String,
    pub logo: String,
}

impl CorpusDocument for JobPosting {
    fn id(&self) -> u32 {
        self.id
    }

    /// Every attribute goes into the index so that free text such as a company
    /// name still retrieves the posting after filter extraction.
    fn index_text(&self) -> String {
        normalize_text(&format!(
            "{} {} {} {} {} {} {}",
            self.title,
            self.description,
            self.seniority_level,
            self.employment_type,
            self.company,
            self.location,
            self.logo
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corpus_type_parse() {
        assert_eq!("news".parse::<CorpusType>().unwrap(), CorpusType::News);
        assert_eq!("jobs".parse::<CorpusType>().unwrap(), CorpusType::Jobs);
        let err = "books".parse::<CorpusType>().unwrap_err();
        assert!(matches!(err, SearchError::InvalidCorpusType(ref t) if t == "books"));
    }

    #[test]
    fn test_corpus_type_is_case_sensitive() {
        assert!("Jobs".parse::<CorpusType>().is_err());
    }

    #[test]
    fn test_job_index_text_is_normalized() {
        let job = JobPosting {
            id: 0,
            title: "Senior C++ Engineer".into(),
            description: "Node.js services".into(),
            company: "Acme".into(),
            location: "London".into(),
            seniority_level: "Mid-Senior level".into(),
            employment_type: "Full-time".into(),
            url: "https://example.com/1".into(),
            logo: "acme.png".into(),
        };
        let text = job.index_text();
        assert!(text.contains("cpp"));
        assert!(text.contains("nodejs node"));
        assert!(text.contains("acme"));
        assert!(!text.contains("Senior"));
    }
}
