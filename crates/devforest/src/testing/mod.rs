//! Synthetic data generators for tests and benchmarks.
//!
//! Everything here is seeded and deterministic.

mod data;
mod profiles;

pub use data::{random_dense, synthetic_dataset};
pub use profiles::{synthetic_profile, synthetic_profiles};
