//! High-level forest configuration with builder pattern.
//!
//! [`ForestConfig`] is the one place users set training hyperparameters.
//! It uses the `bon` crate for the builder and validates at build time.
//!
//! # Example
//!
//! ```
//! use devforest::model::ForestConfig;
//! use devforest::training::{FeatureSubsample, TreeParams};
//!
//! // All defaults: 50 trees, depth 5, seed 42
//! let config = ForestConfig::builder().build().unwrap();
//! assert_eq!(config.n_trees, 50);
//!
//! let config = ForestConfig::builder()
//!     .n_trees(200)
//!     .tree(TreeParams::with_max_depth(8))
//!     .feature_subsample(FeatureSubsample::Sqrt)
//!     .bootstrap_fraction(0.8)
//!     .seed(7)
//!     .build()
//!     .unwrap();
//! ```

use bon::Builder;

use crate::error::Error;
use crate::training::{FeatureSubsample, ForestParams, ParamValidationError, TreeParams, Verbosity};

// =============================================================================
// ConfigError
// =============================================================================

/// Errors that can occur during configuration validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Number of trees must be at least 1.
    #[error("n_trees must be at least 1")]
    InvalidNTrees,

    /// Bootstrap fraction must be in (0, 1].
    #[error("bootstrap_fraction must be in (0, 1], got {0}")]
    InvalidBootstrapFraction(f64),

    /// A tree-level parameter is out of range.
    #[error("{field}: {reason}")]
    InvalidTree { field: &'static str, reason: String },

    /// Feature subsample can never be satisfied.
    #[error("feature_subsample {0:?} selects no features")]
    InvalidFeatureSubsample(FeatureSubsample),
}

impl ConfigError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidNTrees => "n_trees",
            Self::InvalidBootstrapFraction(_) => "bootstrap_fraction",
            Self::InvalidTree { field, .. } => field,
            Self::InvalidFeatureSubsample(_) => "feature_subsample",
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::InvalidHyperparameter { name: e.field(), reason: e.to_string() }
    }
}

// =============================================================================
// ForestConfig
// =============================================================================

/// Configuration for random forest training.
///
/// # Structure
///
/// - **Ensemble**: `n_trees`, `bootstrap_fraction`, `feature_subsample`
/// - **Tree**: stopping criteria via [`TreeParams`]
/// - **Resources**: `n_threads`
/// - **Reproducibility**: `seed`
#[derive(Debug, Clone, PartialEq, Builder)]
#[builder(
    derive(Clone, Debug),
    finish_fn(vis = "", name = __build_internal)
)]
pub struct ForestConfig {
    // === Ensemble ===
    /// Number of trees. Default: 50.
    #[builder(default = 50)]
    pub n_trees: usize,

    /// Bootstrap resample size as a fraction of the dataset. Default: 1.0.
    #[builder(default = 1.0)]
    pub bootstrap_fraction: f64,

    /// Per-tree feature bagging. Default: every feature.
    #[builder(default)]
    pub feature_subsample: FeatureSubsample,

    // === Tree ===
    /// Tree stopping criteria. Default: depth 5, min split 2.
    #[builder(default)]
    pub tree: TreeParams,

    // === Resource control ===
    /// Worker threads. 0 = all cores, 1 = sequential. Default: 0.
    ///
    /// The trained forest does not depend on this value.
    #[builder(default = 0)]
    pub n_threads: usize,

    // === Reproducibility ===
    /// Random seed. Default: 42.
    #[builder(default = 42)]
    pub seed: u64,

    // === Logging ===
    /// Verbosity level. Default: `Silent`.
    #[builder(default)]
    pub verbosity: Verbosity,
}

/// Custom finishing function that validates the config.
impl<S: forest_config_builder::IsComplete> ForestConfigBuilder<S> {
    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any parameter is invalid:
    /// - `n_trees == 0`
    /// - `bootstrap_fraction` outside (0, 1]
    /// - `max_depth == 0` or `min_samples_split < 2`
    /// - a feature subsample of zero features
    pub fn build(self) -> Result<ForestConfig, ConfigError> {
        let config = self.__build_internal();
        config.validate()?;
        Ok(config)
    }
}

impl ForestConfig {
    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.n_trees == 0 {
            return Err(ConfigError::InvalidNTrees);
        }
        if !(self.bootstrap_fraction > 0.0 && self.bootstrap_fraction <= 1.0) {
            return Err(ConfigError::InvalidBootstrapFraction(self.bootstrap_fraction));
        }
        self.tree.validate().map_err(Self::convert_param_error)?;

        // Counts above the feature width are only known at training time.
        match self.feature_subsample {
            FeatureSubsample::Count(0) => Err(ConfigError::InvalidFeatureSubsample(self.feature_subsample)),
            FeatureSubsample::Fraction(x) if !(x > 0.0 && x <= 1.0) => {
                Err(ConfigError::InvalidFeatureSubsample(self.feature_subsample))
            }
            _ => Ok(()),
        }
    }

    fn convert_param_error(e: ParamValidationError) -> ConfigError {
        ConfigError::InvalidTree { field: e.param_name(), reason: e.to_string() }
    }

    /// Trainer parameters for this configuration.
    pub fn to_trainer_params(&self) -> ForestParams {
        ForestParams {
            n_trees: self.n_trees,
            bootstrap_fraction: self.bootstrap_fraction,
            tree: self.tree,
            feature_subsample: self.feature_subsample,
            seed: self.seed,
            verbosity: self.verbosity,
        }
    }
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self::builder().build().expect("default config is valid")
    }
}

// =============================================================================
// Tests
// =============================================================================
