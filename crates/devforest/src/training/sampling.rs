//! Seeded bootstrap and feature sampling.
//!
//! Each tree owns an independent random stream derived from the forest seed
//! and the tree's position, so a tree's resample does not depend on how many
//! trees were trained before it or on which thread trains it.

use rand::prelude::*;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

/// Golden-ratio increment used to spread per-tree seeds.
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Random stream for the tree at `tree_index` of a forest trained with `seed`.
pub fn tree_rng(seed: u64, tree_index: usize) -> Xoshiro256PlusPlus {
    Xoshiro256PlusPlus::seed_from_u64(seed ^ (tree_index as u64 + 1).wrapping_mul(SEED_STRIDE))
}

/// Number of draws for a bootstrap resample: `round(fraction * n_samples)`, at least 1.
#[inline]
pub fn bootstrap_size(n_samples: usize, fraction: f64) -> usize {
    ((fraction * n_samples as f64).round() as usize).max(1)
}

/// Draw `bootstrap_size(n_samples, fraction)` indices uniformly with replacement.
///
/// Indices are returned in draw order; duplicates are expected.
pub fn bootstrap_indices<R: Rng + ?Sized>(n_samples: usize, fraction: f64, rng: &mut R) -> Vec<u32> {
    debug_assert!(n_samples > 0);
    let size = bootstrap_size(n_samples, fraction);
    (0..size).map(|_| rng.gen_range(0..n_samples) as u32).collect()
}

/// Pick `k` of `n_features` feature indices without replacement, sorted ascending.
///
/// Returns all features without touching the generator when `k >= n_features`.
pub fn feature_subset<R: Rng + ?Sized>(n_features: usize, k: usize, rng: &mut R) -> Vec<usize> {
    let mut features: Vec<usize> = (0..n_features).collect();
    if k >= n_features {
        return features;
    }
    // Partial Fisher-Yates shuffle
    for i in 0..k {
        let j = rng.gen_range(i..n_features);
        features.swap(i, j);
    }
    features.truncate(k);
    features.sort_unstable();
    features
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn bootstrap_draws_exactly_n_for_full_fraction() {
        let mut rng = tree_rng(42, 0);
        let indices = bootstrap_indices(100, 1.0, &mut rng);
        assert_eq!(indices.len(), 100);
        assert!(indices.iter().all(|&i| i < 100));
    }

    #[test]
    fn bootstrap_size_rounds_and_is_never_empty() {
        assert_eq!(bootstrap_size(10, 0.25), 3);
        assert_eq!(bootstrap_size(10, 0.24), 2);
        assert_eq!(bootstrap_size(3, 0.01), 1);
        assert_eq!(bootstrap_size(7, 1.0), 7);
    }

    #[test]
    fn bootstrap_covers_about_63_percent_on_average() {
        let n_seeds = 200;
        let total_unique: usize = (0..n_seeds)
            .map(|seed| {
                let mut rng = tree_rng(seed, 0);
                let indices = bootstrap_indices(100, 1.0, &mut rng);
                indices.iter().collect::<HashSet<_>>().len()
            })
            .sum();
        let mean = total_unique as f64 / (n_seeds as f64 * 100.0);
        // 1 - (1 - 1/100)^100 ≈ 0.634
        assert!((0.60..0.67).contains(&mean), "mean unique fraction {mean}");
    }

    #[test]
    fn same_seed_and_tree_give_same_stream() {
        let a = bootstrap_indices(50, 1.0, &mut tree_rng(7, 3));
        let b = bootstrap_indices(50, 1.0, &mut tree_rng(7, 3));
        let c = bootstrap_indices(50, 1.0, &mut tree_rng(7, 4));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn feature_subset_is_sorted_and_distinct() {
        let mut rng = tree_rng(1, 0);
        for _ in 0..50 {
            let subset = feature_subset(10, 4, &mut rng);
            assert_eq!(subset.len(), 4);
            assert!(subset.windows(2).all(|w| w[0] < w[1]));
            assert!(subset.iter().all(|&f| f < 10));
        }
        assert_eq!(feature_subset(5, 5, &mut rng), vec![0, 1, 2, 3, 4]);
    }
}
