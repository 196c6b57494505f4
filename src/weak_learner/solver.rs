//! The closed-form threshold solver.
//!
//! For a fixed candidate and a fixed sharing mask `S`,
//! the response of class `c` on sample `i` is
//! ```txt
//! h(i, c) = a + b   if c in S and the rule fires on i,
//!           b       if c in S and the rule does not fire on i,
//!           kc[c]   if c not in S.
//! ```
//! For every threshold, the optimal `(a, b)` and the weighted squared error
//! `sum_i sum_c w[i][c] (z[i][c] - h(i, c))^2` have closed forms
//! in terms of suffix sums of the histogram,
//! so all thresholds are evaluated in a single sweep.
use crate::constants::{SPLIT_TOLERANCE, ALWAYS_FIRES};
use crate::sample::ClassStats;
use super::{SharingMask, WeightedHistogram};


/// The optimal threshold and response for a sharing mask.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Split {
    /// `0` means the rule fires on every sample.
    /// Otherwise, the rule fires iff the response exceeds
    /// the threshold `threshold_id - 1` of the candidate.
    pub threshold_id: usize,
    /// Boost added when the rule fires.
    pub a: f64,
    /// Response of the shared classes when the rule does not fire.
    pub b: f64,
    /// Weighted squared error over all classes.
    pub error: f64,
}


impl Split {
    /// Returns the threshold this split stands for.
    #[inline]
    pub fn threshold(&self, thresholds: &[f64]) -> f64 {
        match self.threshold_id {
            0 => ALWAYS_FIRES,
            id => thresholds[id - 1],
        }
    }
}


/// Returns the split of minimum weighted squared error for `mask`.
///
/// Splits leaving at most [`SPLIT_TOLERANCE`] of the shared weight
/// on either side are skipped.
/// If every split is skipped, the rule fires on every sample
/// and `a` is the weighted mean sign of the shared classes.
/// Ties are broken toward the smaller threshold.
pub fn optimize_weak(
    hist: &WeightedHistogram,
    stats: &ClassStats,
    mask: &SharingMask,
) -> Split
{
    let num = stats.num();
    let den = stats.den();

    let mut sum_wi = 0f64;
    let mut sum_wizi = 0f64;
    let mut unshared_error = 0f64;
    for c in 0..stats.n_classes() {
        if mask.contains(c) {
            sum_wi += den[c];
            sum_wizi += num[c];
        } else {
            unshared_error += stats.constant_error(c);
        }
    }


    // The error of `(a, b)`, where `active_wi` and `active_wizi`
    // are the shared sums over the samples on which the rule fires.
    let error_of = |a: f64, b: f64, active_wi: f64, active_wizi: f64| {
        let shared = sum_wi
            - 2f64 * a * active_wizi
            - 2f64 * b * sum_wizi
            + a * (a + 2f64 * b) * active_wi
            + b * b * sum_wi;
        (shared + unshared_error).max(0f64)
    };


    let mut best: Option<Split> = None;
    let mut b_num = 0f64;
    let mut b_den = 0f64;
    for t in 0..hist.n_bins().saturating_sub(1) {
        let wi = hist.wi(t);
        let wizi = hist.wizi(t);
        mask.classes()
            .for_each(|c| {
                b_num += wizi[c];
                b_den += wi[c];
            });

        let active_wi = sum_wi - b_den;
        let active_wizi = sum_wizi - b_num;
        if active_wi <= SPLIT_TOLERANCE || b_den <= SPLIT_TOLERANCE {
            continue;
        }

        let b = b_num / b_den;
        let a = active_wizi / active_wi - b;
        let error = error_of(a, b, active_wi, active_wizi);

        if best.map_or(true, |s| error < s.error) {
            best = Some(Split { threshold_id: t + 1, a, b, error });
        }
    }


    best.unwrap_or_else(|| {
        let a = if sum_wi > 0f64 { sum_wizi / sum_wi } else { 0f64 };
        let error = error_of(a, 0f64, sum_wi, sum_wizi);
        Split { threshold_id: 0, a, b: 0f64, error }
    })
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::WeightMatrix;
    use rayon::prelude::*;

    fn setup(values: &[f64], thresholds: &[f64], classes: &[usize], n_classes: usize)
        -> (WeightedHistogram, ClassStats)
    {
        let weights = WeightMatrix::new(values.len(), n_classes);
        let hist = WeightedHistogram::build(values, thresholds, classes, &weights);
        let stats = ClassStats::from_weights(&weights, classes);
        (hist, stats)
    }


    // Brute force error of `(a, b, kc)` on unit weights.
    fn brute_error(
        values: &[f64],
        classes: &[usize],
        n_classes: usize,
        threshold: f64,
        mask: &SharingMask,
        split: &Split,
        stats: &ClassStats,
    ) -> f64
    {
        let mut error = 0f64;
        for (&v, &y) in values.iter().zip(classes) {
            for c in 0..n_classes {
                let z = if y == c { 1f64 } else { -1f64 };
                let h = if !mask.contains(c) {
                    stats.bias()[c]
                } else if v > threshold {
                    split.a + split.b
                } else {
                    split.b
                };
                error += (z - h).powi(2);
            }
        }
        error
    }


    #[test]
    fn test_optimize_weak_two_bins_01() {
        // Bin 0: samples 0, 1 (class 0), bin 1: samples 2, 3 (class 1).
        let values = [0.0, 1.0, 2.0, 3.0];
        let classes = [0, 0, 1, 1];
        let (hist, stats) = setup(&values, &[1.5], &classes, 2);

        let mask = SharingMask::from_classes(2, [0]);
        let split = optimize_weak(&hist, &stats, &mask);

        // Inactive side: z = +1 for class 0, active side: z = -1.
        assert_eq!(split.threshold_id, 1);
        assert!((split.b - 1.0).abs() < 1e-12);
        assert!((split.a + 2.0).abs() < 1e-12);
        // Class 0 is fit perfectly, class 1 keeps its constant error 4.
        assert!((split.error - 4.0).abs() < 1e-12);
        assert_eq!(split.threshold(&[1.5]), 1.5);
    }


    #[test]
    fn test_optimize_weak_two_bins_02() {
        // Weighted, unbalanced bins.
        // Bin 0: one class-0 sample with weight 3, bin 1: one class-1 sample.
        let mut weights = WeightMatrix::new(2, 1);
        weights.par_rows_mut()
            .enumerate()
            .for_each(|(i, row)| row[0] = if i == 0 { 3.0 } else { 1.0 });

        let classes = [0, 1];
        let hist = WeightedHistogram::build(&[0.0, 1.0], &[0.5], &classes, &weights);
        let stats = ClassStats::from_weights(&weights, &classes);

        let split = optimize_weak(&hist, &stats, &SharingMask::full(1));
        // b = 3 / 3 = 1, a + b = -1 / 1
        assert_eq!(split.threshold_id, 1);
        assert!((split.b - 1.0).abs() < 1e-12);
        assert!((split.a + 2.0).abs() < 1e-12);
        assert!(split.error.abs() < 1e-12);
    }


    #[test]
    fn test_optimize_weak_non_negative_01() {
        let values = [0.3, -1.0, 2.0, 0.7, 5.0, 1.1, 0.0];
        let classes = [0, 1, 2, 0, 2, 1, 1];
        let thresholds = [-0.5, 0.5, 1.0, 3.0];
        let (hist, stats) = setup(&values, &thresholds, &classes, 3);

        for bits in 1u32..8 {
            let mask = SharingMask::from_classes(3, (0..3).filter(|&c| (bits >> c) & 1 == 1));
            let split = optimize_weak(&hist, &stats, &mask);
            assert!(split.error >= 0.0);

            let threshold = split.threshold(&thresholds);
            let brute = brute_error(&values, &classes, 3, threshold, &mask, &split, &stats);
            assert!((split.error - brute).abs() < 1e-9, "{mask}: {} vs {brute}", split.error);
        }
    }


    #[test]
    fn test_optimize_weak_fallback_01() {
        // All responses fall in the last bin.
        let values = [2.0, 3.0, 4.0];
        let classes = [0, 1, 1];
        let (hist, stats) = setup(&values, &[0.5, 1.0], &classes, 2);

        let mask = SharingMask::full(2);
        let split = optimize_weak(&hist, &stats, &mask);

        assert_eq!(split.threshold_id, 0);
        assert_eq!(split.b, 0.0);
        // (1 - 2) + (-1 + 2) over 6 weights.
        assert!(split.a.abs() < 1e-12);
        assert!((split.error - 6.0).abs() < 1e-12);
        assert_eq!(split.threshold(&[0.5, 1.0]), ALWAYS_FIRES);
    }
}
