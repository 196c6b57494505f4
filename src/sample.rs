//! Labels, per-class weights and the weighted view of a training sample.
//!
//! The samples themselves are opaque to this crate.
//! A weak rule only needs to evaluate its response on them
//! (see [`WeakRule`](crate::WeakRule)).

// Provides class labels with the exclusion sentinel.
pub(crate) mod labels;
// Provides the `(sample, class)` weight matrix.
pub(crate) mod weight_matrix;
// Provides per-class bias statistics.
pub(crate) mod class_stats;
// Provides the read-only view handed to weak learners.
pub(crate) mod weighted_sample;


pub use labels::Labels;
pub use weight_matrix::WeightMatrix;
pub use class_stats::ClassStats;
pub use weighted_sample::WeightedSample;


/// Returns `+1` if `label == class`, `-1` otherwise.
#[inline(always)]
pub fn sign(label: usize, class: usize) -> f64 {
    if label == class { 1f64 } else { -1f64 }
}
