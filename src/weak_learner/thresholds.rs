//! Threshold families tested for a single candidate.
use rand::Rng;

use crate::constants::EXP_GROWTH_FACTOR;


/// Returns the thresholds tested for the response `values`
/// in ascending order.
/// `min` and `max` are the extremes of `values`.
///
/// The set concatenates three families:
/// 1. `n - 1` uniformly spaced thresholds strictly inside `(min, max)`,
/// 2. `n` thresholds resampled from `values`,
/// 3. `n` thresholds whose gaps grow geometrically
///     by [`EXP_GROWTH_FACTOR`], the last one being `max`.
///
/// Duplicates are kept; they only produce empty bins.
pub fn candidate_thresholds<R>(
    values: &[f64],
    min: f64,
    max: f64,
    n: usize,
    rng: &mut R,
) -> Vec<f64>
    where R: Rng + ?Sized,
{
    let mut thresholds = Vec::with_capacity(3 * n);
    let width = max - min;

    // Uniform
    thresholds.extend(
        (1..n).map(|i| min + width * i as f64 / n as f64)
    );


    // Resampled
    if !values.is_empty() {
        thresholds.extend(
            (0..n).map(|_| values[rng.gen_range(0..values.len())])
        );
    }


    // Exponentially growing gaps
    let total = (0..n).map(|i| EXP_GROWTH_FACTOR.powi(i as i32))
        .sum::<f64>();
    let step = width / total;
    let mut gap = 1f64;
    let mut position = 1f64;
    for _ in 0..n {
        thresholds.push(min + step * position);
        gap *= EXP_GROWTH_FACTOR;
        position += gap;
    }


    thresholds.sort_by(|a, b| a.total_cmp(b));
    thresholds
}
