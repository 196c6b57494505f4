use serde::{Serialize, Deserialize};

use crate::common::utils;


/// The output of [`Ensemble`](crate::Ensemble) inference.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// The additive scores of the rounds.
    #[default]
    Raw,
    /// The softmax of the additive scores.
    Probability,
}


/// Per-pixel, per-class scores.
/// The scores of a pixel are stored contiguously.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreMap {
    n_classes: usize,
    scores: Vec<f64>,
}


impl ScoreMap {
    /// Construct a new score map.
    /// `scores.len()` must be a multiple of `n_classes`.
    pub fn new(n_classes: usize, scores: Vec<f64>) -> Self {
        debug_assert!(n_classes > 0 && scores.len() % n_classes == 0);
        Self { n_classes, scores }
    }


    /// Returns the number of pixels.
    #[inline]
    pub fn n_pixels(&self) -> usize {
        self.scores.len() / self.n_classes.max(1)
    }


    /// Returns the number of classes.
    #[inline]
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }


    /// Returns the scores of pixel `i`.
    #[inline]
    pub fn pixel(&self, i: usize) -> &[f64] {
        let start = i * self.n_classes;
        &self.scores[start..start + self.n_classes]
    }


    /// Returns an iterator over the scores of each pixel.
    #[inline]
    pub fn pixels(&self) -> std::slice::ChunksExact<'_, f64> {
        self.scores.chunks_exact(self.n_classes.max(1))
    }


    /// Returns the class of maximum score for each pixel.
    pub fn labels(&self) -> Vec<usize> {
        self.pixels()
            .map(utils::argmax)
            .collect()
    }


    /// Returns the scores as a flat vector.
    pub fn into_vec(self) -> Vec<f64> {
        self.scores
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_map_01() {
        let map = ScoreMap::new(2, vec![0.1, 0.9, 0.7, 0.3, 0.5, 0.5]);
        assert_eq!(map.n_pixels(), 3);
        assert_eq!(map.pixel(1), &[0.7, 0.3]);
        assert_eq!(map.labels(), vec![1, 0, 0]);
    }
}
