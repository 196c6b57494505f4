//! This file provides some common functions
//! such as the softmax normalization.


/// Normalizes `scores` into a probability distribution in place.
/// The maximum is subtracted before exponentiating,
/// so large scores do not overflow.
#[inline(always)]
pub fn softmax(scores: &mut [f64]) {
    let max = scores.iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);

    if !max.is_finite() {
        return;
    }

    scores.iter_mut()
        .for_each(|s| { *s = (*s - max).exp(); });

    let z = scores.iter().sum::<f64>();
    scores.iter_mut()
        .for_each(|s| { *s /= z; });
}


/// Returns the index of the largest element.
/// Ties are broken toward the smaller index.
#[inline(always)]
pub fn argmax(scores: &[f64]) -> usize {
    scores.iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |(bi, bv), (i, &v)| {
            if v > bv { (i, v) } else { (bi, bv) }
        })
        .0
}


/// Relative discrepancy `|x - y| / (|x| + |y|)` of two values.
/// The denominator is at least `1`,
/// so values close to zero are compared in absolute terms.
#[inline(always)]
pub fn relative_discrepancy(x: f64, y: f64) -> f64 {
    let scale = (x.abs() + y.abs()).max(1f64);
    (x - y).abs() / scale
}


/// Returns the pair `(min, max)` of the given values.
/// Returns `None` if `values` is empty or has a non-finite value.
#[inline(always)]
pub(crate) fn finite_min_max(values: &[f64]) -> Option<(f64, f64)> {
    let mut iter = values.iter().copied();
    let first = iter.next()?;
    if !first.is_finite() {
        return None;
    }

    let mut min = first;
    let mut max = first;
    for v in iter {
        if !v.is_finite() {
            return None;
        }
        min = min.min(v);
        max = max.max(v);
    }
    Some((min, max))
}
