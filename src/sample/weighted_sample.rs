use super::{ClassStats, WeightMatrix};


/// A read-only view of the training sample in a boosting round.
/// [`JointBoost`](crate::JointBoost) builds this view once per round
/// and hands it to the weak learner.
/// Excluded samples are not part of the view.
pub struct WeightedSample<'a, D> {
    data: &'a [&'a D],
    classes: &'a [usize],
    weights: &'a WeightMatrix,
    stats: &'a ClassStats,
}


impl<'a, D> WeightedSample<'a, D> {
    /// Construct a new view.
    /// `data`, `classes` and the rows of `weights` must be aligned.
    pub fn new(
        data: &'a [&'a D],
        classes: &'a [usize],
        weights: &'a WeightMatrix,
        stats: &'a ClassStats,
    ) -> Self
    {
        debug_assert_eq!(data.len(), classes.len());
        debug_assert_eq!(data.len(), weights.n_samples());
        Self { data, classes, weights, stats }
    }


    /// Returns the number of samples.
    #[inline]
    pub fn n_samples(&self) -> usize {
        self.data.len()
    }


    /// Returns the number of classes.
    #[inline]
    pub fn n_classes(&self) -> usize {
        self.weights.n_classes()
    }


    /// Returns the samples.
    #[inline]
    pub fn data(&self) -> &'a [&'a D] {
        self.data
    }


    /// Returns the class of each sample.
    #[inline]
    pub fn classes(&self) -> &'a [usize] {
        self.classes
    }


    /// Returns the current weights.
    #[inline]
    pub fn weights(&self) -> &'a WeightMatrix {
        self.weights
    }


    /// Returns the per-class statistics of the current weights.
    #[inline]
    pub fn stats(&self) -> &'a ClassStats {
        self.stats
    }
}
