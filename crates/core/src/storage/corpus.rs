//! Corpus snapshots loaded from CSV.
//!
//! A snapshot is read once at startup and held as an `Arc<[T]>`. Ids are
//! assigned densely from 0 in row order over the retained rows, so a document
//! id indexes straight into the slice.

use crate::document::{CorpusType, JobPosting, NewsArticle};
use crate::error::CorpusError;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// News snapshot columns, in the order [`NewsArticle`] fields are filled.
const NEWS_COLUMNS: [&str; 4] = ["headlines", "read_more", "text", "date"];

/// Jobs snapshot columns, in the order [`JobPosting`] fields are filled.
const JOBS_COLUMNS: [&str; 8] = [
    "url",
    "job_title",
    "company_name",
    "job_location",
    "job_summary",
    "job_seniority_level",
    "job_employment_type",
    "company_logo",
];

/// An immutable, shareable corpus snapshot.
#[derive(Debug)]
pub struct Corpus<T> {
    kind: CorpusType,
    documents: Arc<[T]>,
}

impl<T> Clone for Corpus<T> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            documents: Arc::clone(&self.documents),
        }
    }
}

impl<T> Corpus<T> {
    pub fn new(kind: CorpusType, documents: Vec<T>) -> Self {
        Self {
            kind,
            documents: documents.into(),
        }
    }

    pub fn kind(&self) -> CorpusType {
        self.kind
    }

    pub fn documents(&self) -> &[T] {
        &self.documents
    }

    pub fn get(&self, id: u32) -> Option<&T> {
        self.documents.get(id as usize)
    }

    /// Hydrate candidate ids into records. Ids outside the snapshot are skipped.
    pub fn fetch(&self, ids: impl IntoIterator<Item = u32>) -> HashMap<u32, &T> {
        ids.into_iter()
            .filter_map(|id| self.get(id).map(|doc| (id, doc)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Reads the named columns of every row. A cell that is absent or blank is `None`.
fn read_columns<R: io::Read, const N: usize>(
    reader: R,
    source: &Path,
    columns: [&'static str; N],
) -> Result<Vec<[Option<String>; N]>, CorpusError> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr.headers()?.clone();

    let mut positions = [0usize; N];
    for (slot, column) in positions.iter_mut().zip(columns) {
        *slot = headers
            .iter()
            .position(|h| h.trim() == column)
            .ok_or_else(|| CorpusError::MissingColumn {
                path: source.to_path_buf(),
                column,
            })?;
    }

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(positions.map(|pos| {
            record
                .get(pos)
                .filter(|cell| !cell.trim().is_empty())
                .map(str::to_string)
        }));
    }
    Ok(rows)
}

fn open(path: &Path) -> Result<std::fs::File, CorpusError> {
    if !path.exists() {
        return Err(CorpusError::Missing(path.to_path_buf()));
    }
    Ok(std::fs::File::open(path)?)
}

/// Parse a news snapshot. Every row is kept; blank cells become empty strings.
pub fn read_news<R: io::Read>(reader: R, source: &Path) -> Result<Corpus<NewsArticle>, CorpusError> {
    let rows = read_columns(reader, source, NEWS_COLUMNS)?;
    let documents = rows
        .into_iter()
        .enumerate()
        .map(|(id, [title, link, description, date])| NewsArticle {
            id: id as u32,
            title: title.unwrap_or_default(),
            description: description.unwrap_or_default(),
            link: link.unwrap_or_default(),
            date: date.unwrap_or_default(),
        })
        .collect();
    Ok(Corpus::new(CorpusType::News, documents))
}

/// Parse a jobs snapshot. Rows missing any required value are dropped before ids are assigned.
pub fn read_jobs<R: io::Read>(reader: R, source: &Path) -> Result<Corpus<JobPosting>, CorpusError> {
    let rows = read_columns(reader, source, JOBS_COLUMNS)?;
    let total = rows.len();
    let documents: Vec<JobPosting> = rows
        .into_iter()
        .filter_map(|row| {
            let [url, title, company, location, description, seniority_level, employment_type, logo] =
                row;
            Some(JobPosting {
                id: 0,
                title: title?,
                description: description?,
                company: company?,
                location: location?,
                seniority_level: seniority_level?,
                employment_type: employment_type?,
                url: url?,
                logo: logo?,
            })
        })
        .enumerate()
        .map(|(id, job)| JobPosting {
            id: id as u32,
            ..job
        })
        .collect();

    let dropped = total - documents.len();
    if dropped > 0 {
        tracing::warn!(
            "Dropped {} of {} job rows with missing values in {:?}",
            dropped,
            total,
            source
        );
    }
    Ok(Corpus::new(CorpusType::Jobs, documents))
}

/// Load the news snapshot at `path`.
pub fn load_news(path: &Path) -> Result<Corpus<NewsArticle>, CorpusError> {
    let corpus = read_news(open(path)?, path)?;
    tracing::info!("Loaded {} news articles from {:?}", corpus.len(), path);
    Ok(corpus)
}

/// Load the jobs snapshot at `path`.
pub fn load_jobs(path: &Path) -> Result<Corpus<JobPosting>, CorpusError> {
    let corpus = read_jobs(open(path)?, path)?;
    tracing::info!("Loaded {} job postings from {:?}", corpus.len(), path);
    Ok(corpus)
}

/// Paths to both snapshots. Both must exist for the service to start.
#[derive(Debug, Clone)]
pub struct SnapshotPaths {
    pub news: PathBuf,
    pub jobs: PathBuf,
}

impl SnapshotPaths {
    /// Fails with [`CorpusError::Missing`] on the first snapshot that does not exist.
    pub fn check(&self) -> Result<(), CorpusError> {
        for path in [&self.news, &self.jobs] {
            if !path.exists() {
                return Err(CorpusError::Missing(path.clone()));
            }
        }
        Ok(())
    }
}
