//! Schema types for model serialization.
//!
//! These types provide a stable serialization format independent of runtime
//! types. Keeping them separate lets the runtime representation change without
//! breaking stored models, and gives deserialization a single place to validate.

use serde::{Deserialize, Serialize};

/// Schema version written by this build.
pub const SCHEMA_VERSION: u32 = 1;

/// Serialized random forest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestSchema {
    /// Format version, see [`SCHEMA_VERSION`].
    pub version: u32,
    pub n_features: usize,
    pub n_classes: usize,
    /// Must equal `trees.len()`.
    pub n_trees: usize,
    pub bootstrap_fraction: f64,
    pub trees: Vec<TreeSchema>,
}

/// Serialized decision tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeSchema {
    pub max_depth: usize,
    pub min_samples_split: usize,
    pub n_features: usize,
    pub root: NodeSchema,
}

/// Serialized tree node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeSchema {
    Leaf {
        class: u32,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<NodeSchema>,
        right: Box<NodeSchema>,
    },
}
