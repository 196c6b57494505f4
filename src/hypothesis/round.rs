use serde::{Serialize, Deserialize};

use crate::SharingMask;


/// A boosting round: one weak rule with its fitted response.
///
/// The score of class `c` is
/// `a + b` if `c` shares the rule and the rule fires,
/// `b` if `c` shares the rule and the rule does not fire,
/// and `bias[c]` otherwise.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Round<R> {
    rule: R,
    mask: SharingMask,
    a: f64,
    b: f64,
    bias: Vec<f64>,
    error: f64,
}


impl<R> Round<R> {
    /// Construct a new round.
    pub fn new(
        rule: R,
        mask: SharingMask,
        a: f64,
        b: f64,
        bias: Vec<f64>,
        error: f64,
    ) -> Self
    {
        Self { rule, mask, a, b, bias, error }
    }


    /// Returns the weak rule.
    #[inline]
    pub fn rule(&self) -> &R {
        &self.rule
    }


    /// Returns the classes sharing the rule.
    #[inline]
    pub fn mask(&self) -> &SharingMask {
        &self.mask
    }


    /// Returns the boost added when the rule fires.
    #[inline]
    pub fn a(&self) -> f64 {
        self.a
    }


    /// Returns the response of the shared classes
    /// when the rule does not fire.
    #[inline]
    pub fn b(&self) -> f64 {
        self.b
    }


    /// Returns the per-class bias of the classes outside the mask.
    #[inline]
    pub fn bias(&self) -> &[f64] {
        &self.bias
    }


    /// Returns the weighted squared error on the training sample.
    #[inline]
    pub fn error(&self) -> f64 {
        self.error
    }


    /// Returns the number of classes of this round.
    #[inline]
    pub fn n_classes(&self) -> usize {
        self.bias.len()
    }


    /// Returns the score of `class`.
    #[inline(always)]
    pub fn class_score(&self, fires: bool, class: usize) -> f64 {
        if !self.mask.contains(class) {
            self.bias[class]
        } else if fires {
            self.a + self.b
        } else {
            self.b
        }
    }


    /// Adds the score of every class to `scores`.
    #[inline]
    pub fn accumulate(&self, fires: bool, scores: &mut [f64]) {
        scores.iter_mut()
            .enumerate()
            .for_each(|(c, s)| { *s += self.class_score(fires, c); });
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_score_01() {
        let mask = SharingMask::from_classes(3, [1]);
        let round = Round::new((), mask, 2.0, -0.5, vec![0.1, 0.2, 0.3], 1.0);

        assert_eq!(round.class_score(true, 0), 0.1);
        assert_eq!(round.class_score(true, 1), 1.5);
        assert_eq!(round.class_score(false, 1), -0.5);
        assert_eq!(round.class_score(false, 2), 0.3);

        let mut scores = vec![0.0; 3];
        round.accumulate(true, &mut scores);
        round.accumulate(false, &mut scores);
        assert_eq!(scores, vec![0.2, 1.0, 0.6]);
    }
}
