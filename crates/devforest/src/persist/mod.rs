//! Model persistence.
//!
//! Forests are written through version-tagged schema types (see
//! [`ForestSchema`]) rather than the runtime representation. The helpers below
//! work on in-memory JSON strings; callers own files and databases.
//!
//! ```
//! use devforest::persist::{from_json_str, to_json_string};
//! use devforest::testing::synthetic_dataset;
//! use devforest::{ForestConfig, RandomForest};
//!
//! let dataset = synthetic_dataset(20, 3, 2, 1);
//! let config = ForestConfig::builder().n_trees(3).build().unwrap();
//! let forest = RandomForest::train(&dataset, &config).unwrap();
//!
//! let json = to_json_string(&forest).unwrap();
//! assert_eq!(from_json_str(&json).unwrap(), forest);
//! ```

mod convert;
mod error;
mod schema;

pub use error::ReadError;
pub use schema::{ForestSchema, NodeSchema, TreeSchema, SCHEMA_VERSION};

use crate::repr::RandomForest;

/// Serialize a forest to compact JSON.
pub fn to_json_string(forest: &RandomForest) -> serde_json::Result<String> {
    serde_json::to_string(&ForestSchema::from(forest))
}

/// Serialize a forest to indented JSON.
pub fn to_json_string_pretty(forest: &RandomForest) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&ForestSchema::from(forest))
}

/// Parse and validate a forest written by [`to_json_string`].
pub fn from_json_str(json: &str) -> Result<RandomForest, ReadError> {
    let schema: ForestSchema = serde_json::from_str(json)?;
    RandomForest::try_from(schema)
}
