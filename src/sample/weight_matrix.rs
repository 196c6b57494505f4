use rayon::prelude::*;
use rayon::slice::ChunksExactMut;

use crate::constants::MIN_WEIGHT;


/// Weights on the pairs `(sample, class)`.
/// The weights of a sample are stored contiguously,
/// so `weights[i * n_classes + c]` is the weight of sample `i` on class `c`.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightMatrix {
    n_classes: usize,
    weights: Vec<f64>,
}


impl WeightMatrix {
    /// Construct a matrix whose weights are all `1`.
    pub fn new(n_samples: usize, n_classes: usize) -> Self {
        Self {
            n_classes,
            weights: vec![1f64; n_samples * n_classes],
        }
    }


    /// Returns the number of samples.
    #[inline]
    pub fn n_samples(&self) -> usize {
        if self.n_classes == 0 { 0 } else { self.weights.len() / self.n_classes }
    }


    /// Returns the number of classes.
    #[inline]
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }


    /// Returns the weights of the `i`-th sample.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        let start = i * self.n_classes;
        &self.weights[start..start + self.n_classes]
    }


    /// Returns an iterator over the rows.
    #[inline]
    pub fn rows(&self) -> std::slice::ChunksExact<'_, f64> {
        self.weights.chunks_exact(self.n_classes)
    }


    /// Returns a parallel iterator over the mutable rows.
    #[inline]
    pub(crate) fn par_rows_mut(&mut self) -> ChunksExactMut<'_, f64> {
        self.weights.par_chunks_exact_mut(self.n_classes)
    }


    /// Returns the sum of all weights.
    pub fn total(&self) -> f64 {
        self.weights.par_iter().sum::<f64>()
    }


    /// Returns `true` if every weight is finite.
    pub fn is_finite(&self) -> bool {
        self.weights.par_iter().all(|w| w.is_finite())
    }


    /// Multiplies every weight by the same constant
    /// so that the mean weight becomes `1`.
    /// The fitted `(a, b)` and the bias are ratios and do not depend on the scale.
    /// The split tolerance is absolute, though,
    /// so rescaling decayed weights may keep splits that would be skipped otherwise.
    pub fn normalize(&mut self) {
        let n = self.weights.len() as f64;
        let z = self.total() / n;
        if z <= 0f64 || !z.is_finite() {
            return;
        }

        self.weights.par_iter_mut()
            .for_each(|w| { *w = (*w / z).max(MIN_WEIGHT); });
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_matrix_01() {
        let weights = WeightMatrix::new(3, 2);
        assert_eq!(weights.n_samples(), 3);
        assert_eq!(weights.n_classes(), 2);
        assert_eq!(weights.row(2), &[1.0, 1.0]);
        assert_eq!(weights.rows().count(), 3);
        assert_eq!(weights.total(), 6.0);
    }

    #[test]
    fn test_normalize_01() {
        let mut weights = WeightMatrix::new(2, 2);
        weights.par_rows_mut()
            .for_each(|row| row.iter_mut().for_each(|w| *w *= 0.25));
        weights.normalize();
        assert!((weights.total() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_02() {
        // Decayed weights below the split tolerance are scaled back up;
        // only their ratios are kept.
        let mut weights = WeightMatrix::new(2, 1);
        weights.par_rows_mut()
            .enumerate()
            .for_each(|(i, row)| row[0] = 1e-12 * (i + 1) as f64);
        assert!(weights.total() < crate::constants::SPLIT_TOLERANCE);

        weights.normalize();
        assert!((weights.row(0)[0] - 2.0 / 3.0).abs() < 1e-12);
        assert!((weights.row(1)[0] - 4.0 / 3.0).abs() < 1e-12);
    }
}
