//! Hard attribute filtering of job candidates.
//!
//! Each filter present in a [`ParsedQuery`] must be contained, case-insensitively,
//! in the matching posting field. Absent filters impose no constraint.

use crate::document::JobPosting;
use crate::query::ParsedQuery;

fn contains_ignore_case(field: &str, needle: &str) -> bool {
    field.to_lowercase().contains(&needle.to_lowercase())
}

/// Check if a posting satisfies every filter present in `query`.
pub fn matches_job_filters(job: &JobPosting, query: &ParsedQuery) -> bool {
    if let Some(bucket) = query.seniority {
        if !contains_ignore_case(&job.seniority_level, bucket.bucket_name()) {
            return false;
        }
    }
    if let Some(etype) = query.employment_type {
        if !contains_ignore_case(&job.employment_type, etype.as_str()) {
            return false;
        }
    }
    if let Some(ref location) = query.location {
        if !contains_ignore_case(&job.location, location) {
            return false;
        }
    }
    if let Some(ref company) = query.company {
        if !contains_ignore_case(&job.company, company) {
            return false;
        }
    }
    true
}
