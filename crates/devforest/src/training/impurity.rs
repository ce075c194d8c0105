//! Gini impurity over class counts.

/// Gini impurity `1 - Σ p_c²` of a node with the given class counts.
///
/// Returns 0.0 for an empty node.
#[inline]
pub fn gini(counts: &[usize], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let n = total as f64;
    let sum_sq: f64 = counts
        .iter()
        .map(|&c| {
            let p = c as f64 / n;
            p * p
        })
        .sum();
    1.0 - sum_sq
}

/// Size-weighted impurity of a two-way partition.
#[inline]
pub fn weighted_gini(left: &[usize], n_left: usize, right: &[usize], n_right: usize) -> f64 {
    let total = (n_left + n_right) as f64;
    if total == 0.0 {
        return 0.0;
    }
    (n_left as f64 / total) * gini(left, n_left) + (n_right as f64 / total) * gini(right, n_right)
}

/// Most frequent class; ties resolve to the lowest class index.
#[inline]
pub fn majority_class(counts: &[usize]) -> u32 {
    let mut best = 0;
    for (class, &count) in counts.iter().enumerate() {
        if count > counts[best] {
            best = class;
        }
    }
    best as u32
}

/// Returns `true` if at most one class is present.
#[inline]
pub fn is_pure(counts: &[usize]) -> bool {
    counts.iter().filter(|&&c| c > 0).count() <= 1
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn pure_node_has_zero_impurity() {
        assert_eq!(gini(&[0, 7, 0], 7), 0.0);
        assert!(is_pure(&[0, 7, 0]));
        assert!(is_pure(&[0, 0, 0]));
    }

    #[test]
    fn uniform_node_reaches_upper_bound() {
        // k classes evenly mixed: 1 - 1/k
        assert_abs_diff_eq!(gini(&[5, 5], 10), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(gini(&[3, 3, 3, 3], 12), 0.75, epsilon = 1e-12);
    }

    #[test]
    fn weighted_gini_of_perfect_split_is_zero() {
        assert_eq!(weighted_gini(&[4, 0], 4, &[0, 6], 6), 0.0);
        // one side mixed, the other pure
        assert_abs_diff_eq!(weighted_gini(&[2, 2], 4, &[0, 4], 4), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn majority_breaks_ties_towards_lowest_class() {
        assert_eq!(majority_class(&[1, 3, 3, 0]), 1);
        assert_eq!(majority_class(&[2, 2, 2, 2]), 0);
        assert_eq!(majority_class(&[0, 0, 0, 1]), 3);
        assert_eq!(majority_class(&[0, 0]), 0);
    }
}
