//! Parameter groups shared by tree and forest training.
//!
//! - [`TreeParams`]: stopping criteria for a single tree
//! - [`FeatureSubsample`]: per-tree feature bagging
//!
//! Each group validates itself; violations surface as [`ParamValidationError`]
//! and convert into [`Error::InvalidHyperparameter`].

use crate::error::Error;

// =============================================================================
// TreeParams
// =============================================================================

/// Stopping criteria for tree induction.
///
/// # Example
///
/// ```
/// use devforest::training::TreeParams;
///
/// let params = TreeParams::new(8, 4);
/// assert!(params.validate().is_ok());
/// assert!(TreeParams::new(0, 2).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeParams {
    /// Nodes at this depth become leaves. Must be `>= 1`. Default: 5.
    pub max_depth: usize,
    /// Nodes with fewer samples become leaves. Must be `>= 2`. Default: 2.
    pub min_samples_split: usize,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self { max_depth: 5, min_samples_split: 2 }
    }
}

impl TreeParams {
    pub fn new(max_depth: usize, min_samples_split: usize) -> Self {
        Self { max_depth, min_samples_split }
    }

    /// Default stopping rules with a custom depth limit.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth, ..Default::default() }
    }

    pub fn validate(&self) -> Result<(), ParamValidationError> {
        if self.max_depth < 1 {
            return Err(ParamValidationError::InvalidMaxDepth(self.max_depth));
        }
        if self.min_samples_split < 2 {
            return Err(ParamValidationError::InvalidMinSamplesSplit(self.min_samples_split));
        }
        Ok(())
    }
}

// =============================================================================
// FeatureSubsample
// =============================================================================

/// How many features each tree may split on.
///
/// The subset is drawn once per tree, without replacement, from the tree's
/// own random stream.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FeatureSubsample {
    /// Every tree sees every feature.
    #[default]
    All,
    /// `floor(sqrt(n_features))`, at least 1.
    Sqrt,
    /// Exactly this many features.
    Count(usize),
    /// `round(fraction * n_features)`, at least 1. Fraction in (0, 1].
    Fraction(f64),
}

impl FeatureSubsample {
    /// Number of features per tree for a dataset with `n_features` columns.
    pub fn resolve(self, n_features: usize) -> Result<usize, ParamValidationError> {
        match self {
            FeatureSubsample::All => Ok(n_features),
            FeatureSubsample::Sqrt => Ok(((n_features as f64).sqrt() as usize).max(1).min(n_features)),
            FeatureSubsample::Count(k) if k == 0 || k > n_features => {
                Err(ParamValidationError::InvalidFeatureCount { requested: k, n_features })
            }
            FeatureSubsample::Count(k) => Ok(k),
            FeatureSubsample::Fraction(x) if !(x > 0.0 && x <= 1.0) => {
                Err(ParamValidationError::InvalidFeatureFraction(x))
            }
            FeatureSubsample::Fraction(x) => {
                Ok(((x * n_features as f64).round() as usize).max(1).min(n_features))
            }
        }
    }
}

// =============================================================================
// Validation errors
// =============================================================================

/// Parameter validation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParamValidationError {
    /// max_depth must be >= 1.
    #[error("max_depth must be >= 1, got {0}")]
    InvalidMaxDepth(usize),

    /// min_samples_split must be >= 2.
    #[error("min_samples_split must be >= 2, got {0}")]
    InvalidMinSamplesSplit(usize),

    /// n_trees must be >= 1.
    #[error("n_trees must be >= 1, got {0}")]
    InvalidNTrees(usize),

    /// bootstrap_fraction must be in (0, 1].
    #[error("bootstrap_fraction must be in (0, 1], got {0}")]
    InvalidBootstrapFraction(f64),

    /// Feature count must be in [1, n_features].
    #[error("feature subsample of {requested} is outside [1, {n_features}]")]
    InvalidFeatureCount { requested: usize, n_features: usize },

    /// Feature fraction must be in (0, 1].
    #[error("feature fraction must be in (0, 1], got {0}")]
    InvalidFeatureFraction(f64),
}

impl ParamValidationError {
    /// Name of the offending hyperparameter.
    pub fn param_name(&self) -> &'static str {
        match self {
            Self::InvalidMaxDepth(_) => "max_depth",
            Self::InvalidMinSamplesSplit(_) => "min_samples_split",
            Self::InvalidNTrees(_) => "n_trees",
            Self::InvalidBootstrapFraction(_) => "bootstrap_fraction",
            Self::InvalidFeatureCount { .. } | Self::InvalidFeatureFraction(_) => "feature_subsample",
        }
    }
}

impl From<ParamValidationError> for Error {
    fn from(e: ParamValidationError) -> Self {
        Error::InvalidHyperparameter { name: e.param_name(), reason: e.to_string() }
    }
}
