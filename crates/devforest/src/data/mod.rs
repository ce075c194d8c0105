//! Profile records, feature schemas and labeled training data.
//!
//! - [`ProfileRecord`]: raw named fields from the profile source
//! - [`Task`]: classification task and its label enumeration
//! - [`build_features`]: record → [`FeatureVector`] for a task
//! - [`LabeledDataset`]: training matrix plus class indices
//! - [`heuristic_label`]: threshold labels used to assemble training sets

mod dataset;
mod features;
mod labels;
mod record;
mod task;

pub use dataset::{LabeledDataset, LabeledSample};
pub use features::{build_features, build_features_for, FeatureVector, COMMIT_RECENCY_HORIZON_DAYS};
pub use labels::{complexity_label, heuristic_label, quality_label};
pub use record::{FieldValue, ProfileRecord};
pub use task::{ComplexityLabel, QualityLabel, Task};
