//! Labeled training data.
//!
//! [`LabeledDataset`] stores features as a sample-major `Array2<f64>`
//! (`[n_samples, n_features]`) next to one class index per sample. Trees
//! train on index subsets of the dataset, so bootstrap resamples never copy
//! feature rows.

use ndarray::{Array2, ArrayView1, ArrayView2};

use super::features::FeatureVector;
use crate::error::{Error, Result};

/// A feature vector paired with its class index.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledSample {
    pub features: FeatureVector,
    pub class: u32,
}

impl LabeledSample {
    pub fn new(features: impl Into<FeatureVector>, class: u32) -> Self {
        Self { features: features.into(), class }
    }
}

/// Training set: feature matrix, class indices and the size of the label enumeration.
#[derive(Debug, Clone)]
pub struct LabeledDataset {
    features: Array2<f64>,
    labels: Vec<u32>,
    n_classes: usize,
}

impl LabeledDataset {
    /// Create a dataset from a sample-major feature matrix.
    ///
    /// # Errors
    ///
    /// - [`Error::Shape`] if `labels.len()` differs from the number of rows
    /// - [`Error::InvalidLabel`] if a label is `>= n_classes`
    /// - [`Error::InvalidHyperparameter`] if `n_classes == 0`
    /// - [`Error::NonFiniteFeature`] if any value is NaN or infinite
    pub fn new(features: Array2<f64>, labels: Vec<u32>, n_classes: usize) -> Result<Self> {
        if n_classes == 0 {
            return Err(Error::hyperparameter("n_classes", "must be at least 1"));
        }
        if labels.len() != features.nrows() {
            return Err(Error::Shape { expected: features.nrows(), actual: labels.len() });
        }
        if let Some(&label) = labels.iter().find(|&&l| l as usize >= n_classes) {
            return Err(Error::InvalidLabel { label, n_classes });
        }
        // Split thresholds are midpoints of observed values and must stay finite.
        if let Some(((sample, feature), _)) = features.indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(Error::NonFiniteFeature { sample, feature });
        }
        Ok(Self { features, labels, n_classes })
    }

    /// Create a dataset from labeled samples.
    ///
    /// Every sample must have the length of the first one. An empty slice yields
    /// an empty dataset; training on it fails with [`Error::EmptyDataset`].
    pub fn from_samples(samples: &[LabeledSample], n_classes: usize) -> Result<Self> {
        let n_features = samples.first().map_or(0, |s| s.features.len());
        let mut flat = Vec::with_capacity(samples.len() * n_features);
        let mut labels = Vec::with_capacity(samples.len());
        for sample in samples {
            if sample.features.len() != n_features {
                return Err(Error::Shape { expected: n_features, actual: sample.features.len() });
            }
            flat.extend_from_slice(&sample.features);
            labels.push(sample.class);
        }
        let features = Array2::from_shape_vec((samples.len(), n_features), flat)
            .map_err(|_| Error::Shape { expected: n_features, actual: 0 })?;
        Self::new(features, labels, n_classes)
    }

    /// Create a dataset from row vectors.
    pub fn from_rows(rows: &[Vec<f64>], labels: Vec<u32>, n_classes: usize) -> Result<Self> {
        if rows.len() != labels.len() {
            return Err(Error::Shape { expected: rows.len(), actual: labels.len() });
        }
        let samples: Vec<LabeledSample> = rows
            .iter()
            .zip(&labels)
            .map(|(row, &class)| LabeledSample::new(row.as_slice(), class))
            .collect();
        Self::from_samples(&samples, n_classes)
    }

    #[inline]
    pub fn n_samples(&self) -> usize {
        self.features.nrows()
    }

    #[inline]
    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    #[inline]
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n_samples() == 0
    }

    /// Feature matrix view, `[n_samples, n_features]`.
    pub fn features(&self) -> ArrayView2<'_, f64> {
        self.features.view()
    }

    pub fn labels(&self) -> &[u32] {
        &self.labels
    }

    #[inline]
    pub fn label(&self, sample: usize) -> u32 {
        self.labels[sample]
    }

    #[inline]
    pub fn value(&self, sample: usize, feature: usize) -> f64 {
        self.features[[sample, feature]]
    }

    pub fn row(&self, sample: usize) -> ArrayView1<'_, f64> {
        self.features.row(sample)
    }

    /// Number of samples per class, indexed by class.
    pub fn class_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.n_classes];
        for &label in &self.labels {
            counts[label as usize] += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_samples_builds_row_major_matrix() {
        let samples = vec![
            LabeledSample::new(vec![1.0, 2.0], 0),
            LabeledSample::new(vec![3.0, 4.0], 2),
            LabeledSample::new(vec![5.0, 6.0], 2),
        ];
        let ds = LabeledDataset::from_samples(&samples, 3).unwrap();
        assert_eq!(ds.n_samples(), 3);
        assert_eq!(ds.n_features(), 2);
        assert_eq!(ds.value(1, 0), 3.0);
        assert_eq!(ds.row(2).to_vec(), vec![5.0, 6.0]);
        assert_eq!(ds.class_counts(), vec![1, 0, 2]);
    }

    #[test]
    fn ragged_samples_are_rejected() {
        let samples = vec![LabeledSample::new(vec![1.0, 2.0], 0), LabeledSample::new(vec![3.0], 1)];
        let err = LabeledDataset::from_samples(&samples, 2).unwrap_err();
        assert_eq!(err, Error::Shape { expected: 2, actual: 1 });
    }

    #[test]
    fn labels_must_fit_the_enumeration() {
        let err = LabeledDataset::from_rows(&[vec![0.0]], vec![4], 4).unwrap_err();
        assert_eq!(err, Error::InvalidLabel { label: 4, n_classes: 4 });
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let rows = [vec![0.0, 1.0], vec![f64::NEG_INFINITY, 2.0]];
        let err = LabeledDataset::from_rows(&rows, vec![0, 1], 2).unwrap_err();
        assert_eq!(err, Error::NonFiniteFeature { sample: 1, feature: 0 });

        let rows = [vec![0.0, f64::NAN]];
        let err = LabeledDataset::from_rows(&rows, vec![0], 2).unwrap_err();
        assert_eq!(err, Error::NonFiniteFeature { sample: 0, feature: 1 });
    }

    #[test]
    fn empty_sample_list_gives_empty_dataset() {
        let ds = LabeledDataset::from_samples(&[], 4).unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.class_counts(), vec![0; 4]);
    }
}
