use rand::Rng;

use crate::{
    WeakRule,
    WeightedSample,
    common::utils,
};
use super::{
    SharingMask,
    WeightedHistogram,
    SharedSplit,
    select_sharing,
    thresholds::candidate_thresholds,
};


/// A weak rule with its fitted response.
/// This is the outcome of a single trial of the rule search.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<R> {
    /// The rule, with its threshold set.
    pub rule: R,
    /// The classes sharing `(a, b)`.
    pub mask: SharingMask,
    /// Boost added to the shared classes when the rule fires.
    pub a: f64,
    /// Response of the shared classes when the rule does not fire.
    pub b: f64,
    /// Weighted squared error of the fitted response.
    pub error: f64,
}


impl<R> Candidate<R> {
    /// Construct a candidate that can never win a round.
    pub fn rejected(rule: R, n_classes: usize) -> Self {
        Self {
            rule,
            mask: SharingMask::empty(n_classes),
            a: 0f64,
            b: 0f64,
            error: f64::INFINITY,
        }
    }


    /// Returns `true` if this candidate has a finite error.
    #[inline]
    pub fn is_viable(&self) -> bool {
        self.error.is_finite()
    }
}


/// Draws a single random rule and fits it to a weighted sample.
pub struct CandidateSampler<'a, R: WeakRule> {
    config: &'a R::Config,
    n_thresholds: usize,
}


impl<'a, R: WeakRule> CandidateSampler<'a, R> {
    /// Construct a new sampler.
    /// Each candidate tests about `3 * n_thresholds` thresholds.
    pub fn new(config: &'a R::Config, n_thresholds: usize) -> Self {
        Self { config, n_thresholds }
    }


    /// Draws a rule with `rng` and fits its threshold, `(a, b)`
    /// and sharing classes.
    /// A rule whose responses are all equal or are not all finite
    /// is rejected.
    pub fn sample<G>(
        &self,
        view: &WeightedSample<'_, R::Data>,
        rng: &mut G,
    ) -> Candidate<R>
        where G: Rng + ?Sized,
    {
        let n_classes = view.n_classes();
        let mut rule = R::sample(self.config, rng);

        let values = view.data()
            .iter()
            .map(|&x| rule.response(x))
            .collect::<Vec<_>>();

        let (min, max) = match utils::finite_min_max(&values) {
            Some((min, max)) if min < max => (min, max),
            _ => return Candidate::rejected(rule, n_classes),
        };

        let thresholds = candidate_thresholds(
            &values, min, max, self.n_thresholds, rng
        );
        let hist = WeightedHistogram::build(
            &values, &thresholds, view.classes(), view.weights()
        );

        match select_sharing(&hist, view.stats()) {
            Some(SharedSplit { mask, split }) => {
                rule.set_threshold(split.threshold(&thresholds));
                Candidate {
                    rule,
                    mask,
                    a: split.a,
                    b: split.b,
                    error: split.error,
                }
            },
            None => Candidate::rejected(rule, n_classes),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;
    use crate::{ChannelRule, ChannelConfig, WeightMatrix, ClassStats};

    #[test]
    fn test_candidate_sampler_01() {
        let values = [0.0, 1.0, 2.0, 3.0];
        let data = values.iter().collect::<Vec<_>>();
        let classes = [0, 0, 1, 1];
        let weights = WeightMatrix::new(4, 2);
        let stats = ClassStats::from_weights(&weights, &classes);
        let view = WeightedSample::new(&data, &classes, &weights, &stats);

        let config = ChannelConfig::new(vec![0..1]);
        let sampler = CandidateSampler::<ChannelRule<f64>>::new(&config, 4);
        let mut rng = StdRng::seed_from_u64(1234);
        let candidate = sampler.sample(&view, &mut rng);

        // Threshold 1.5 separates the classes.
        assert!(candidate.is_viable());
        assert!((candidate.error - 4.0).abs() < 1e-12);
        assert_eq!(candidate.mask.len(), 1);
        assert!(values.iter().take(2).all(|x| !candidate.rule.fires(x)));
        assert!(values.iter().skip(2).all(|x| candidate.rule.fires(x)));
    }


    #[test]
    fn test_candidate_sampler_degenerate_01() {
        let values = [2.0, 2.0, 2.0];
        let data = values.iter().collect::<Vec<_>>();
        let classes = [0, 1, 1];
        let weights = WeightMatrix::new(3, 2);
        let stats = ClassStats::from_weights(&weights, &classes);
        let view = WeightedSample::new(&data, &classes, &weights, &stats);

        let config = ChannelConfig::new(vec![0..1]);
        let sampler = CandidateSampler::<ChannelRule<f64>>::new(&config, 10);
        let mut rng = StdRng::seed_from_u64(1234);
        let candidate = sampler.sample(&view, &mut rng);

        assert!(!candidate.is_viable());
        assert_eq!(candidate.error, f64::INFINITY);
        assert!(candidate.mask.is_empty());
    }
}
