//! devforest: random forest scoring of developer profiles.
//!
//! Trains Gini-split decision tree ensembles on developer profile features
//! and classifies profiles by quality and project complexity.
//!
//! # Key Types
//!
//! - [`ProfileRecord`] / [`Task`] - Raw profile fields and the classification tasks
//! - [`ForestConfig`] - Configuration builder
//! - [`RandomForest`] / [`DecisionTree`] - Trained models
//! - [`TaskModel`] - A forest bound to a task's feature schema
//! - [`BatchScorer`] - Per-record scoring with isolated failures
//!
//! # Training
//!
//! Use `ForestConfig::builder()` to configure, then `RandomForest::train()`
//! on a [`LabeledDataset`], or `TaskModel::train()` on raw records.
//!
//! ```
//! use devforest::{ForestConfig, Task, TaskModel};
//! use devforest::testing::synthetic_profiles;
//!
//! let records = synthetic_profiles(40, 42);
//! let config = ForestConfig::builder().n_trees(10).seed(42).build().unwrap();
//! let model = TaskModel::train(Task::Quality, &records, &config).unwrap();
//!
//! let prediction = model.predict_record(&records[0]).unwrap();
//! println!("{} ({:.2})", model.label_name(prediction.class).unwrap(), prediction.confidence());
//! ```
//!
//! # Persistence
//!
//! See the [`persist`] module for the JSON model format.

pub mod data;
pub mod error;
pub mod model;
pub mod persist;
pub mod repr;
pub mod scoring;
pub mod testing;
pub mod training;
pub mod utils;

// =============================================================================
// Convenience Re-exports
// =============================================================================

// Errors
pub use error::{Error, Result, SchemaError};

// Data types
pub use data::{build_features, FeatureVector, LabeledDataset, LabeledSample, ProfileRecord, Task};

// Models and configuration
pub use model::{ConfigError, ForestConfig, TaskModel};
pub use repr::{DecisionTree, Prediction, RandomForest};

// Scoring
pub use scoring::{BatchReport, BatchScorer, ScorerConfig};

// Training knobs most users need
pub use training::{FeatureSubsample, TreeParams, Verbosity};

// Shared utilities
pub use utils::{run_with_threads, Parallelism};
