//! Batch scoring of profile records against trained task models.

mod batch;

pub use batch::{BatchReport, BatchScorer, RecordError, ScoreRecord, ScorerConfig};
