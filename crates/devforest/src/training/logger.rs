//! Verbosity-gated training log events.
//!
//! [`TrainingLogger`] turns training milestones into `tracing` events. The
//! configured [`Verbosity`] decides which milestones are emitted at all; the
//! subscriber installed by the application decides where they go.

use std::time::Duration;

use tracing::{debug, info, warn};

/// How much the trainer reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    /// Nothing.
    #[default]
    Silent,
    /// Warnings only.
    Warning,
    /// Start/finish, class distribution, accuracy.
    Info,
    /// Per-tree details.
    Debug,
}

/// Emits training progress as `tracing` events.
#[derive(Debug, Clone, Copy)]
pub struct TrainingLogger {
    verbosity: Verbosity,
}

impl TrainingLogger {
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    #[inline]
    pub fn enabled(&self, level: Verbosity) -> bool {
        level != Verbosity::Silent && self.verbosity >= level
    }

    pub fn start_training(&self, n_trees: usize, n_samples: usize, n_features: usize, n_threads: usize) {
        if self.enabled(Verbosity::Info) {
            info!(n_trees, n_samples, n_features, n_threads, "training random forest");
        }
    }

    pub fn class_distribution(&self, class_names: &[&str], counts: &[usize]) {
        if !self.enabled(Verbosity::Info) {
            return;
        }
        for (class, &count) in counts.iter().enumerate() {
            let label = class_names.get(class).copied().unwrap_or("?");
            info!(class, label, count, "class distribution");
        }
    }

    pub fn tree_built(&self, tree_index: usize, n_draws: usize, n_features: usize, depth: usize, n_leaves: usize) {
        if self.enabled(Verbosity::Debug) {
            debug!(tree_index, n_draws, n_features, depth, n_leaves, "tree built");
        }
    }

    pub fn finish_training(&self, n_trees: usize, elapsed: Duration) {
        if self.enabled(Verbosity::Info) {
            info!(n_trees, elapsed_ms = elapsed.as_millis() as u64, "random forest trained");
        }
    }

    pub fn training_accuracy(&self, accuracy: f64) {
        if self.enabled(Verbosity::Info) {
            info!(accuracy, "training accuracy");
        }
    }

    pub fn warning(&self, message: &str) {
        if self.enabled(Verbosity::Warning) {
            warn!("{message}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_gates_levels() {
        let logger = TrainingLogger::new(Verbosity::Info);
        assert!(logger.enabled(Verbosity::Warning));
        assert!(logger.enabled(Verbosity::Info));
        assert!(!logger.enabled(Verbosity::Debug));
        assert!(!logger.enabled(Verbosity::Silent));

        let silent = TrainingLogger::new(Verbosity::default());
        assert!(!silent.enabled(Verbosity::Warning));
    }
}
