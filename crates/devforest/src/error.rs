//! Crate-wide error types.
//!
//! Every failure kind is a distinct [`Error`] variant so callers can react to
//! it without string matching. Feature extraction failures carry a
//! [`SchemaError`] describing which part of the record was rejected.

use crate::data::Task;

/// Errors raised while turning a raw profile record into a feature vector.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    /// The requested task name is not one of the known tasks.
    #[error("unknown task `{0}` (expected `quality` or `complexity`)")]
    UnknownTask(String),

    /// A field is present but holds a value of the wrong kind or range.
    #[error("field `{field}`: {reason}")]
    InvalidField { field: String, reason: String },

    /// The record carries none of the fields the task reads.
    #[error("record has none of the fields required by the {task} task")]
    MissingFields { task: Task },
}

impl SchemaError {
    pub(crate) fn invalid_field(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidField { field: field.to_string(), reason: reason.into() }
    }
}

/// Errors returned by training, inference and scoring.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Feature extraction failed for a record.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// A feature vector does not match the length the model was trained on.
    #[error("shape mismatch: expected {expected} features, got {actual}")]
    Shape { expected: usize, actual: usize },

    /// A training feature value is NaN or infinite.
    #[error("non-finite value at sample {sample}, feature {feature}")]
    NonFiniteFeature { sample: usize, feature: usize },

    /// Training was attempted on a dataset with no samples.
    #[error("training dataset is empty")]
    EmptyDataset,

    /// A training hyperparameter is out of range.
    #[error("invalid hyperparameter `{name}`: {reason}")]
    InvalidHyperparameter { name: &'static str, reason: String },

    /// Inference was attempted on a forest without trees.
    #[error("model has no trained trees")]
    UntrainedModel,

    /// A class label falls outside the task's label enumeration.
    #[error("class label {label} out of range for {n_classes} classes")]
    InvalidLabel { label: u32, n_classes: usize },

    /// Too few usable records to train a task model.
    #[error("need at least {required} training records, got {actual}")]
    InsufficientData { required: usize, actual: usize },
}

impl Error {
    pub(crate) fn hyperparameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidHyperparameter { name, reason: reason.into() }
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
