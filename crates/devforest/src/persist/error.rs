//! Errors raised while reading persisted models.

/// Failure to restore a model from its serialized form.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// The input is not valid JSON for the schema.
    #[error("malformed model json: {0}")]
    Json(#[from] serde_json::Error),

    /// The input parsed but describes an inconsistent model.
    #[error("invalid model: {0}")]
    Validation(String),

    /// The schema version is not one this build can read.
    #[error("unsupported schema version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
}
