//! Structured filter extraction for job queries.
//!
//! A normalized query is decomposed into a seniority bucket, an employment type,
//! a location, a company, and the residual free text that goes to retrieval.
//! Extraction is total: a missing match means "no filter", never an error.

use crate::config::{FilterConfig, MatchStrategy};
use crate::query::normalize::normalize_query;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

static LOCATION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"in ([\w\s]+)").expect("valid location pattern"));
static COMPANY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"at ([\w\s]+)").expect("valid company pattern"));
static MARKER_TOKENS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(in|at)\b").expect("valid marker pattern"));

/// Canonical experience-level bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Seniority {
    Entry,
    Mid,
    Senior,
}

impl Seniority {
    /// Buckets in detection order.
    pub const ALL: [Seniority; 3] = [Seniority::Entry, Seniority::Mid, Seniority::Senior];

    /// Canonical bucket name, also the substring a posting's seniority field must contain.
    pub fn bucket_name(&self) -> &'static str {
        match self {
            Seniority::Entry => "entry level",
            Seniority::Mid => "mid level",
            Seniority::Senior => "senior level",
        }
    }

    /// Synonyms that select this bucket, in detection order.
    pub fn synonyms(&self) -> &'static [&'static str] {
        match self {
            Seniority::Entry => &["graduate", "junior", "intern", "new grad"],
            Seniority::Mid => &["mid", "intermediate"],
            Seniority::Senior => &["senior", "lead", "principal"],
        }
    }
}

impl fmt::Display for Seniority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.bucket_name())
    }
}

/// Employment type filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentType {
    FullTime,
    PartTime,
    Contract,
    Internship,
    Temporary,
}

impl EmploymentType {
    /// Types in detection order.
    pub const ALL: [EmploymentType; 5] = [
        EmploymentType::FullTime,
        EmploymentType::PartTime,
        EmploymentType::Contract,
        EmploymentType::Internship,
        EmploymentType::Temporary,
    ];

    /// Canonical keyword, matched against a posting's employment-type field.
    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentType::FullTime => "full-time",
            EmploymentType::PartTime => "part-time",
            EmploymentType::Contract => "contract",
            EmploymentType::Internship => "internship",
            EmploymentType::Temporary => "temporary",
        }
    }

    /// The keyword as it appears in a cleaned query, where hyphens are already spaces.
    pub fn query_form(&self) -> &'static str {
        match self {
            EmploymentType::FullTime => "full time",
            EmploymentType::PartTime => "part time",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A job query decomposed into filters and residual free text.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedQuery {
    /// Query after normalization and synonym expansion.
    pub normalized_text: String,
    /// Free text handed to retrieval once filter words are removed.
    pub residual_query: String,
    pub seniority: Option<Seniority>,
    pub employment_type: Option<EmploymentType>,
    pub location: Option<String>,
    pub company: Option<String>,
}

impl ParsedQuery {
    /// Returns `true` if no structured filter was extracted.
    pub fn has_no_filters(&self) -> bool {
        self.seniority.is_none()
            && self.employment_type.is_none()
            && self.location.is_none()
            && self.company.is_none()
    }
}

/// Word-boundary patterns for every fixed filter keyword.
static KEYWORD_PATTERNS: Lazy<HashMap<&'static str, Regex>> = Lazy::new(|| {
    let seniority_words = Seniority::ALL
        .into_iter()
        .flat_map(|bucket| {
            std::iter::once(bucket.bucket_name()).chain(bucket.synonyms().iter().copied())
        });
    let employment_words = EmploymentType::ALL.into_iter().map(|etype| etype.query_form());
    seniority_words
        .chain(employment_words)
        .map(|keyword| (keyword, compile_word_pattern(keyword)))
        .collect()
});

fn compile_word_pattern(keyword: &str) -> Regex {
    Regex::new(&format!(r"\b{}\b", regex::escape(keyword))).expect("escaped literal is valid")
}

/// Run `f` with the word-boundary pattern for `keyword`. Location and company
/// captures are free text and get compiled on demand.
fn with_word_pattern<R>(keyword: &str, f: impl FnOnce(&Regex) -> R) -> R {
    match KEYWORD_PATTERNS.get(keyword) {
        Some(re) => f(re),
        None => f(&compile_word_pattern(keyword)),
    }
}

fn contains_keyword(text: &str, keyword: &str, strategy: MatchStrategy) -> bool {
    match strategy {
        MatchStrategy::Substring => text.contains(keyword),
        MatchStrategy::WordBoundary => with_word_pattern(keyword, |re| re.is_match(text)),
    }
}

fn remove_keyword(text: &str, keyword: &str, strategy: MatchStrategy) -> String {
    match strategy {
        MatchStrategy::Substring => text.replace(keyword, ""),
        MatchStrategy::WordBoundary => {
            with_word_pattern(keyword, |re| re.replace_all(text, "").into_owned())
        }
    }
}

/// First seniority bucket whose name or any synonym is a substring of `query`.
///
/// Buckets are checked in [`Seniority::ALL`] order; within a bucket the
/// canonical name is checked before the synonyms.
pub fn normalize_seniority(query: &str) -> Option<Seniority> {
    Seniority::ALL.into_iter().find(|bucket| {
        query.contains(bucket.bucket_name())
            || bucket.synonyms().iter().any(|syn| query.contains(syn))
    })
}

/// First employment type in [`EmploymentType::ALL`] order found in `query`.
pub fn extract_employment_type(query: &str, strategy: MatchStrategy) -> Option<EmploymentType> {
    EmploymentType::ALL
        .into_iter()
        .find(|etype| contains_keyword(query, etype.query_form(), strategy))
}

fn capture_after(pattern: &Regex, query: &str) -> Option<String> {
    pattern
        .captures(query)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Text following the first `in ` marker, up to the first non word/space character.
pub fn extract_location(query: &str) -> Option<String> {
    capture_after(&LOCATION_PATTERN, query)
}

/// Text following the first `at ` marker, up to the first non word/space character.
pub fn extract_company(query: &str) -> Option<String> {
    capture_after(&COMPANY_PATTERN, query)
}

/// Strip extracted filter words from `normalized` to obtain the residual query.
///
/// Removal order: the seniority bucket name and its full synonym list, the
/// employment keyword, the location, the company. Standalone `in` / `at` tokens
/// are then removed and the ends trimmed. Interior whitespace is left as is.
pub fn build_residual_query(
    normalized: &str,
    seniority: Option<Seniority>,
    employment_type: Option<EmploymentType>,
    location: Option<&str>,
    company: Option<&str>,
    strategy: MatchStrategy,
) -> String {
    let mut words: Vec<&str> = Vec::new();
    if let Some(bucket) = seniority {
        words.push(bucket.bucket_name());
        words.extend_from_slice(bucket.synonyms());
    }
    if let Some(etype) = employment_type {
        words.push(etype.query_form());
    }
    words.extend(location);
    words.extend(company);

    let mut residual = normalized.to_string();
    for word in words.into_iter().filter(|w| !w.is_empty()) {
        residual = remove_keyword(&residual, &word.to_lowercase(), strategy);
    }
    MARKER_TOKENS.replace_all(&residual, "").trim().to_string()
}

/// Parses raw job queries into [`ParsedQuery`] values.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterExtractor {
    config: FilterConfig,
}

impl FilterExtractor {
    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> FilterConfig {
        self.config
    }

    /// Normalize `raw` and extract filters plus the residual query.
    pub fn parse(&self, raw: &str) -> ParsedQuery {
        self.parse_normalized(normalize_query(raw))
    }

    /// Extract filters from an already normalized query.
    pub fn parse_normalized(&self, normalized_text: String) -> ParsedQuery {
        let seniority = normalize_seniority(&normalized_text);
        let employment_type =
            extract_employment_type(&normalized_text, self.config.employment_match);
        let location = extract_location(&normalized_text);
        let company = extract_company(&normalized_text);
        let residual_query = build_residual_query(
            &normalized_text,
            seniority,
            employment_type,
            location.as_deref(),
            company.as_deref(),
            self.config.residual_removal,
        );
        ParsedQuery {
            normalized_text,
            residual_query,
            seniority,
            employment_type,
            location,
            company,
        }
    }
}
