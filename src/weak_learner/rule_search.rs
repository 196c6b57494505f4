use rand::prelude::*;
use rayon::prelude::*;

use crate::{
    WeakRule,
    WeightedSample,
    common::checker,
    constants::{DEFAULT_CANDIDATES, DEFAULT_THRESHOLDS},
};
use crate::error::Result;
use super::{
    WeakLearner,
    Candidate,
    CandidateSampler,
};


/// The best-of-N random rule search.
///
/// Each call of [`WeakLearner::produce`] draws
/// `n_candidates` random rules in parallel,
/// fits each of them with [`CandidateSampler`]
/// and returns the one of minimum weighted squared error.
///
/// Trial `k` draws from its own generator,
/// seeded with the `k`-th value of [`trial_seeds`].
/// Ties are broken toward the smaller `k`,
/// so the result does not depend on the number of threads.
///
/// # Example
/// ```no_run
/// use sharedboost::prelude::*;
///
/// let config = RectangleConfig::new(vec![0..400])
///     .min_size(5)
///     .max_size(200)
///     .subsample(5);
///
/// let weak_learner = RuleSearch::<RectangleRule<MyIntegralImagePixel>>::new(config)
///     .candidates(500)
///     .thresholds(50);
/// # struct MyIntegralImagePixel;
/// # impl RegionSource for MyIntegralImagePixel {
/// #     fn region_mean(&self, _: &Rect, _: usize) -> f64 { 0.0 }
/// # }
/// ```
pub struct RuleSearch<R: WeakRule> {
    config: R::Config,
    n_candidates: usize,
    n_thresholds: usize,
}


impl<R: WeakRule> RuleSearch<R> {
    /// Construct a new search drawing rules with `config`.
    pub fn new(config: R::Config) -> Self {
        Self {
            config,
            n_candidates: DEFAULT_CANDIDATES,
            n_thresholds: DEFAULT_THRESHOLDS,
        }
    }


    /// Set the number of random rules drawn per round.
    pub fn candidates(mut self, n_candidates: usize) -> Self {
        self.n_candidates = n_candidates;
        self
    }


    /// Set the size of each threshold family.
    pub fn thresholds(mut self, n_thresholds: usize) -> Self {
        self.n_thresholds = n_thresholds;
        self
    }


    /// Returns the configuration of the random rules.
    pub fn config(&self) -> &R::Config {
        &self.config
    }


    /// Returns the number of random rules drawn per round.
    pub fn n_candidates(&self) -> usize {
        self.n_candidates
    }


    /// Returns the size of each threshold family.
    pub fn n_thresholds(&self) -> usize {
        self.n_thresholds
    }
}


/// Derives `n` trial seeds from `seed`.
pub fn trial_seeds(seed: u64, n: usize) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen::<u64>())
        .collect()
}


// Minimum by `(error, trial)`.
#[inline]
fn pick_better<R>(x: (usize, Candidate<R>), y: (usize, Candidate<R>))
    -> (usize, Candidate<R>)
{
    let y_wins = y.1.error < x.1.error
        || (y.1.error == x.1.error && y.0 < x.0);
    if y_wins { y } else { x }
}


impl<R: WeakRule> WeakLearner for RuleSearch<R> {
    type Rule = R;


    fn name(&self) -> &str {
        "Random Rule Search"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let info = Vec::from([
            ("# of candidates", format!("{}", self.n_candidates)),
            ("# of thresholds", format!("{}", self.n_thresholds)),
        ]);
        Some(info)
    }


    fn validate(&self) -> Result<()> {
        checker::search_parameters(self.n_candidates, self.n_thresholds)?;
        R::validate(&self.config)
    }


    fn validate_data(&self, data: &[&R::Data]) -> Result<()> {
        data.iter()
            .try_for_each(|x| R::check_data(&self.config, x))
    }


    fn produce(
        &self,
        sample: &WeightedSample<'_, R::Data>,
        seed: u64,
    ) -> Option<Candidate<R>>
    {
        let sampler = CandidateSampler::<R>::new(&self.config, self.n_thresholds);

        trial_seeds(seed, self.n_candidates)
            .into_par_iter()
            .enumerate()
            .map(|(k, s)| {
                let mut rng = StdRng::seed_from_u64(s);
                (k, sampler.sample(sample, &mut rng))
            })
            .filter(|(_, candidate)| candidate.is_viable())
            .reduce_with(pick_better)
            .map(|(_, candidate)| candidate)
    }
}
