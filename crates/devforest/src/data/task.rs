//! Classification tasks and their label enumerations.
//!
//! Each task has a fixed feature schema and a closed set of four classes.
//! A class is stored as its index in the enumeration; every tie-break in
//! training and voting resolves towards the lowest index.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// A profile classification task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Task {
    /// Code/profile quality: Low, Medium, High, Excellent.
    Quality,
    /// Project complexity: Simple, Medium, Complex, Advanced.
    Complexity,
}

const QUALITY_FEATURES: [&str; 6] = [
    "stars_per_repo",
    "followers",
    "repo_count",
    "language_count",
    "bio_score",
    "commit_recency_score",
];

const COMPLEXITY_FEATURES: [&str; 5] =
    ["total_stars", "repo_count", "followers", "stars_per_repo", "language_count"];

impl Task {
    /// All tasks, in a stable order.
    pub const ALL: [Task; 2] = [Task::Quality, Task::Complexity];

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Task::Quality => "quality",
            Task::Complexity => "complexity",
        }
    }

    /// Ordered feature slot names of this task's schema.
    pub fn feature_names(self) -> &'static [&'static str] {
        match self {
            Task::Quality => &QUALITY_FEATURES,
            Task::Complexity => &COMPLEXITY_FEATURES,
        }
    }

    /// Length of this task's feature vector.
    #[inline]
    pub fn n_features(self) -> usize {
        self.feature_names().len()
    }

    /// Display names of the classes, indexed by class.
    pub fn class_names(self) -> &'static [&'static str; 4] {
        match self {
            Task::Quality => &QualityLabel::NAMES,
            Task::Complexity => &ComplexityLabel::NAMES,
        }
    }

    /// Number of classes in the label enumeration.
    #[inline]
    pub fn n_classes(self) -> usize {
        self.class_names().len()
    }

    /// Display name for a class index, if in range.
    pub fn class_name(self, class: u32) -> Option<&'static str> {
        self.class_names().get(class as usize).copied()
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Task {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quality" => Ok(Task::Quality),
            "complexity" => Ok(Task::Complexity),
            other => Err(SchemaError::UnknownTask(other.to_string())),
        }
    }
}

// =============================================================================
// Label enumerations
// =============================================================================

/// Quality class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u32)]
pub enum QualityLabel {
    Low = 0,
    Medium = 1,
    High = 2,
    Excellent = 3,
}

impl QualityLabel {
    pub const ALL: [QualityLabel; 4] =
        [QualityLabel::Low, QualityLabel::Medium, QualityLabel::High, QualityLabel::Excellent];

    const NAMES: [&'static str; 4] = ["Low", "Medium", "High", "Excellent"];

    #[inline]
    pub fn index(self) -> u32 {
        self as u32
    }

    pub fn from_index(class: u32) -> Option<Self> {
        Self::ALL.get(class as usize).copied()
    }

    pub fn name(self) -> &'static str {
        Self::NAMES[self as usize]
    }

    /// Normalized score for storage: Low 0.0, Medium 0.33, High 0.67, Excellent 1.0.
    pub fn score(self) -> f64 {
        match self {
            QualityLabel::Low => 0.0,
            QualityLabel::Medium => 0.33,
            QualityLabel::High => 0.67,
            QualityLabel::Excellent => 1.0,
        }
    }
}

/// Complexity class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u32)]
pub enum ComplexityLabel {
    Simple = 0,
    Medium = 1,
    Complex = 2,
    Advanced = 3,
}

impl ComplexityLabel {
    pub const ALL: [ComplexityLabel; 4] = [
        ComplexityLabel::Simple,
        ComplexityLabel::Medium,
        ComplexityLabel::Complex,
        ComplexityLabel::Advanced,
    ];

    const NAMES: [&'static str; 4] = ["Simple", "Medium", "Complex", "Advanced"];

    #[inline]
    pub fn index(self) -> u32 {
        self as u32
    }

    pub fn from_index(class: u32) -> Option<Self> {
        Self::ALL.get(class as usize).copied()
    }

    pub fn name(self) -> &'static str {
        Self::NAMES[self as usize]
    }
}
