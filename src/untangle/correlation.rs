//! Pearson correlation of matched leaf positions, the tangle score.
//!
//! Leaves are matched across two trees by strain. A correlation of `1.0`
//! means the matched leaves appear in the same relative order (and spacing)
//! on both sides, i.e. no connecting lines cross.

use crate::model::TangleTree;

/// Running sums over matched `(y1, y2)` pairs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CorrelationSums {
    count: usize,
    sum_y1: f64,
    sum_y2: f64,
    sum_sq_y1: f64,
    sum_sq_y2: f64,
    sum_y1_y2: f64,
}

impl CorrelationSums {
    /// Adds one matched pair.
    pub fn add(&mut self, y1: f64, y2: f64) {
        self.count += 1;
        self.sum_y1 += y1;
        self.sum_y2 += y2;
        self.sum_sq_y1 += y1 * y1;
        self.sum_sq_y2 += y2 * y2;
        self.sum_y1_y2 += y1 * y2;
    }

    /// Returns the number of pairs added so far.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns the Pearson correlation coefficient of the pairs added so far.
    ///
    /// `NaN` if no pair was added or either side has zero variance.
    pub fn coefficient(&self) -> f64 {
        let n = self.count as f64;
        let mean_y1 = self.sum_y1 / n;
        let mean_y2 = self.sum_y2 / n;
        let mean_sq_y1 = self.sum_sq_y1 / n;
        let mean_sq_y2 = self.sum_sq_y2 / n;
        let mean_y1_y2 = self.sum_y1_y2 / n;

        let covariance = mean_y1_y2 - mean_y1 * mean_y2;
        let variance_y1 = mean_sq_y1 - mean_y1 * mean_y1;
        let variance_y2 = mean_sq_y2 - mean_y2 * mean_y2;
        let denominator = (variance_y1 * variance_y2).sqrt();
        if denominator == 0.0 {
            return f64::NAN;
        }

        covariance / denominator
    }
}

/// Computes the Pearson correlation between the y-values of leaves present
/// (by strain) in both trees.
///
/// Iterates the leaves of `second` and looks each one up in `first`;
/// leaves of either tree without a partner are ignored.
///
/// # Returns
/// A value in `[-1, 1]`, or `NaN` if fewer than two strains match
/// (or matched y-values do not vary). Callers must treat `NaN` as
/// "no information", never as an improvement.
///
/// # Example
/// ```
/// use tanglegram::newick::parse_str;
/// use tanglegram::untangle::correlation::pearson_correlation;
///
/// let left = parse_str("((A,B),C);").unwrap();
/// let right = parse_str("(C,(B,A));").unwrap();
/// assert!((pearson_correlation(&left, &right) + 1.0).abs() < 1e-12);
/// ```
pub fn pearson_correlation(first: &TangleTree, second: &TangleTree) -> f64 {
    matched_sums(first, second).coefficient()
}

/// Accumulates [CorrelationSums] over all strains shared by both trees.
pub fn matched_sums(first: &TangleTree, second: &TangleTree) -> CorrelationSums {
    let mut sums = CorrelationSums::default();
    for &index in second.nodes() {
        let vertex = &second[index];
        let Some(strain) = vertex.strain() else {
            continue;
        };
        if let Some(partner) = first.leaf_for_strain(strain) {
            sums.add(partner.y_value(), vertex.y_value());
        }
    }
    sums
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfectly_linear_pairs() {
        let mut sums = CorrelationSums::default();
        for (y1, y2) in [(1.0, 2.0), (2.0, 4.0), (3.0, 6.0)] {
            sums.add(y1, y2);
        }
        assert_eq!(sums.count(), 3);
        assert!((sums.coefficient() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_partial_correlation() {
        let mut sums = CorrelationSums::default();
        for (y1, y2) in [(1.0, 2.0), (2.0, 3.0), (3.0, 1.0)] {
            sums.add(y1, y2);
        }
        assert!((sums.coefficient() + 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_empty_is_nan() {
        assert!(CorrelationSums::default().coefficient().is_nan());
    }

    #[test]
    fn test_zero_variance_is_nan() {
        let mut sums = CorrelationSums::default();
        sums.add(3.0, 1.0);
        assert!(sums.coefficient().is_nan());
        sums.add(3.0, 2.0);
        assert!(sums.coefficient().is_nan());
    }
}
