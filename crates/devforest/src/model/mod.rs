//! High-level model API.
//!
//! - [`ForestConfig`]: validated training configuration (`bon` builder)
//! - [`TaskModel`]: a forest bound to a task's feature schema and labels

mod config;
mod task_model;

pub use config::{ConfigError, ForestConfig};
pub use task_model::{training_samples, RejectedRecord, TaskModel, MIN_TRAINING_RECORDS};
