//! Feature vector construction from raw profile records.
//!
//! [`build_features`] maps a [`ProfileRecord`] onto the fixed, ordered
//! schema of a [`Task`]:
//!
//! | task       | slots                                                                                  |
//! |------------|----------------------------------------------------------------------------------------|
//! | quality    | stars_per_repo, followers, repo_count, language_count, bio_score, commit_recency_score |
//! | complexity | total_stars, repo_count, followers, stars_per_repo, language_count                     |
//!
//! Missing fields fall back to zero. A record carrying none of the fields a
//! task reads is rejected, as is any field holding a value of the wrong kind.

use std::ops::Deref;

use serde::{Deserialize, Serialize};

use super::record::{FieldValue, ProfileRecord};
use super::task::Task;
use crate::error::SchemaError;

/// Commit recency is reported in days; anything at or beyond this is "never".
pub const COMMIT_RECENCY_HORIZON_DAYS: f64 = 999.0;

/// Source fields read by each task. A record must carry at least one.
const QUALITY_SOURCES: [&str; 9] = [
    "stars_per_repo",
    "total_stars",
    "followers",
    "public_repos",
    "language_score",
    "languages",
    "bio_relevance_score",
    "bio",
    "commit_recency_days",
];

const COMPLEXITY_SOURCES: [&str; 6] = [
    "total_stars",
    "public_repos",
    "followers",
    "stars_per_repo",
    "language_score",
    "languages",
];

// =============================================================================
// FeatureVector
// =============================================================================

/// Immutable, fixed-length numeric feature vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector(Box<[f64]>);

impl FeatureVector {
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.0.into_vec()
    }
}

impl Deref for FeatureVector {
    type Target = [f64];

    #[inline]
    fn deref(&self) -> &[f64] {
        &self.0
    }
}

impl AsRef<[f64]> for FeatureVector {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(values: Vec<f64>) -> Self {
        Self(values.into_boxed_slice())
    }
}

impl From<&[f64]> for FeatureVector {
    fn from(values: &[f64]) -> Self {
        Self(values.into())
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Build the feature vector of `task` for a record.
pub fn build_features(record: &ProfileRecord, task: Task) -> Result<FeatureVector, SchemaError> {
    let sources: &[&str] = match task {
        Task::Quality => &QUALITY_SOURCES,
        Task::Complexity => &COMPLEXITY_SOURCES,
    };
    if !sources.iter().any(|field| record.has(field)) {
        return Err(SchemaError::MissingFields { task });
    }

    let values = match task {
        Task::Quality => vec![
            stars_per_repo(record)?,
            count(record, "followers")?,
            count(record, "public_repos")?,
            language_count(record)?,
            bio_score(record)?,
            commit_recency_score(record)?,
        ],
        Task::Complexity => vec![
            count(record, "total_stars")?,
            count(record, "public_repos")?,
            count(record, "followers")?,
            stars_per_repo(record)?,
            language_count(record)?,
        ],
    };
    debug_assert_eq!(values.len(), task.n_features());
    Ok(FeatureVector::from(values))
}

/// Build features for a task given by name.
///
/// # Errors
///
/// [`SchemaError::UnknownTask`] if `task` is not `quality` or `complexity`.
pub fn build_features_for(record: &ProfileRecord, task: &str) -> Result<FeatureVector, SchemaError> {
    build_features(record, task.parse()?)
}

// =============================================================================
// Field extraction
// =============================================================================

/// Read an optional finite number.
fn number(record: &ProfileRecord, field: &str) -> Result<Option<f64>, SchemaError> {
    match record.get(field) {
        None | Some(FieldValue::Null) => Ok(None),
        Some(FieldValue::Number(v)) if v.is_finite() => Ok(Some(*v)),
        Some(FieldValue::Number(v)) => {
            Err(SchemaError::invalid_field(field, format!("non-finite value {v}")))
        }
        Some(other) => Err(SchemaError::invalid_field(
            field,
            format!("expected a number, got {}", other.kind()),
        )),
    }
}

/// Read an optional non-negative number.
fn non_negative(record: &ProfileRecord, field: &str) -> Result<Option<f64>, SchemaError> {
    match number(record, field)? {
        Some(v) if v < 0.0 => Err(SchemaError::invalid_field(field, format!("negative value {v}"))),
        other => Ok(other),
    }
}

pub(super) fn count(record: &ProfileRecord, field: &str) -> Result<f64, SchemaError> {
    Ok(non_negative(record, field)?.unwrap_or(0.0))
}

pub(super) fn stars_per_repo(record: &ProfileRecord) -> Result<f64, SchemaError> {
    if let Some(v) = non_negative(record, "stars_per_repo")? {
        return Ok(v);
    }
    let stars = count(record, "total_stars")?;
    let repos = count(record, "public_repos")?;
    Ok(if repos > 0.0 { stars / repos } else { 0.0 })
}

fn language_count(record: &ProfileRecord) -> Result<f64, SchemaError> {
    if let Some(v) = non_negative(record, "language_score")? {
        return Ok(v);
    }
    match record.get("languages") {
        None | Some(FieldValue::Null) => Ok(0.0),
        Some(FieldValue::List(langs)) => Ok(langs.iter().filter(|v| !v.is_null()).count() as f64),
        Some(other) => Err(SchemaError::invalid_field(
            "languages",
            format!("expected a list, got {}", other.kind()),
        )),
    }
}

fn bio_score(record: &ProfileRecord) -> Result<f64, SchemaError> {
    if let Some(v) = non_negative(record, "bio_relevance_score")? {
        return Ok(v);
    }
    match record.get("bio") {
        None | Some(FieldValue::Null) => Ok(0.0),
        Some(FieldValue::Text(bio)) => Ok(if bio.trim().is_empty() { 0.0 } else { 1.0 }),
        Some(other) => Err(SchemaError::invalid_field(
            "bio",
            format!("expected a string, got {}", other.kind()),
        )),
    }
}

/// Recent activity scores high: `999 - days`, clamped to the horizon.
fn commit_recency_score(record: &ProfileRecord) -> Result<f64, SchemaError> {
    let days = non_negative(record, "commit_recency_days")?.unwrap_or(COMMIT_RECENCY_HORIZON_DAYS);
    Ok(COMMIT_RECENCY_HORIZON_DAYS - days.min(COMMIT_RECENCY_HORIZON_DAYS))
}
