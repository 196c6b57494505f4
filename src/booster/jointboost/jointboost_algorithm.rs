//! Provides [`JointBoost`], the shared-feature boosting.
use rand::prelude::*;
use rayon::prelude::*;

use crate::{
    Booster,
    WeakRule,
    WeakLearner,
    Labels,
    WeightMatrix,
    ClassStats,
    WeightedSample,
    SharingMask,
    Round,
    Ensemble,

    common::{checker, utils},
    research::Research,
    sample::sign,
    weak_learner::Candidate,
};
use crate::constants::{
    DEFAULT_ROUNDS,
    DEFAULT_SEED,
    DRIFT_TOLERANCE,
    MIN_WEIGHT,
};
use crate::error::{BoostError, Result};
use super::RoundReport;

use std::ops::ControlFlow;
use std::time::Instant;


/// The phase of the boosting process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Before the first round.
    Initializing,
    /// Searching the rule of the current round.
    RunningRound,
    /// Updating the weights with the rule of the current round.
    Reweighting,
    /// All rounds are finished.
    Done,
}


/// Defines `JointBoost`, the shared-feature boosting
/// for multi-class problems.
///
/// `JointBoost` keeps a weight on every pair `(sample, class)`.
/// Each round, the weak learner returns a rule, a set of classes
/// sharing it, and the response `(a, b)` of the shared classes.
/// Then, for every sample `i` and class `c`, the weight is updated as
/// ```txt
/// w[i][c] <- w[i][c] * exp(-z[i][c] * h(i, c)),
/// ```
/// where `z[i][c]` is `+1` if the label of `i` is `c`, `-1` otherwise,
/// and `h(i, c)` is the score of the round (see [`Round`]).
///
/// Samples whose label is excluded
/// (see [`Labels::from_signed`]) are dropped at initialization.
///
/// # Example
/// ```no_run
/// use sharedboost::prelude::*;
///
/// let data: Vec<Vec<f64>> = vec![
///     vec![0.0, 1.0], vec![1.0, 0.5], vec![2.0, 0.1], vec![3.0, 0.0],
/// ];
/// let labels = Labels::from_signed(&[0_i8, 0, 1, 1], 2).unwrap();
///
/// // Run 20 rounds and stop earlier
/// // if the error decreases less than 0.1% in a round.
/// let mut booster = JointBoost::<ChannelRule<Vec<f64>>>::init(&data, &labels)
///     .unwrap()
///     .rounds(20)
///     .tolerance(0.001)
///     .seed(1);
///
/// let weak_learner = RuleSearch::<ChannelRule<Vec<f64>>>::new(ChannelConfig::new(vec![0..2]))
///     .candidates(100)
///     .thresholds(10);
///
/// let ensemble = booster.run(&weak_learner).unwrap();
/// let predictions = ensemble.predict_all(&data);
///
/// let n_sample = data.len() as f64;
/// let training_loss = predictions.iter()
///     .zip(0..)
///     .map(|(&p, i)| if Some(p) == labels.get(i) { 0.0 } else { 1.0 })
///     .sum::<f64>()
///     / n_sample;
///
/// println!("Training Loss is: {training_loss}");
/// ```
pub struct JointBoost<'a, R: WeakRule> {
    // Included training samples.
    data: Vec<&'a R::Data>,

    // Class of each sample in `data`.
    classes: Vec<usize>,

    n_classes: usize,

    // Weights on the pairs `(sample, class)`.
    weights: WeightMatrix,

    n_rounds: usize,

    // Seed of the generator drawing the per-round seeds.
    seed: u64,
    rng: StdRng,

    // Optional. If this value is `Some(tol)`,
    // the algorithm terminates when the relative decrease
    // of the round error falls below `tol`.
    tolerance: Option<f64>,

    // Rescale the weights to mean `1` after each round.
    normalize_weights: bool,

    state: State,

    ensemble: Ensemble<R>,
    reports: Vec<RoundReport>,

    // Terminated iteration.
    terminated: usize,
}


impl<'a, R: WeakRule> JointBoost<'a, R> {
    /// Initialize the `JointBoost`.
    /// Samples with an excluded label are dropped.
    ///
    /// Fails if `data` and `labels` have different lengths,
    /// if there is no sample, no class,
    /// or if every label is excluded.
    pub fn init(data: &'a [R::Data], labels: &Labels) -> Result<Self> {
        checker::sample(data.len(), labels.len())?;
        checker::n_classes(labels.n_classes())?;

        let (data, classes): (Vec<_>, Vec<_>) = labels.included()
            .map(|(i, c)| (&data[i], c))
            .unzip();

        if data.is_empty() {
            return Err(BoostError::AllExcluded);
        }

        let n_classes = labels.n_classes();
        let weights = WeightMatrix::new(data.len(), n_classes);

        Ok(Self {
            data,
            classes,
            n_classes,
            weights,

            n_rounds: DEFAULT_ROUNDS,
            seed: DEFAULT_SEED,
            rng: StdRng::seed_from_u64(DEFAULT_SEED),
            tolerance: None,
            normalize_weights: false,

            state: State::Initializing,
            ensemble: Ensemble::new(n_classes),
            reports: Vec::new(),
            terminated: usize::MAX,
        })
    }


    /// Set the number of boosting rounds.
    pub fn rounds(mut self, n_rounds: usize) -> Self {
        self.n_rounds = n_rounds;
        self
    }


    /// Set the seed of the rule search.
    /// Two runs with the same seed and the same inputs
    /// return the same ensemble, regardless of the number of threads.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }


    /// Set the tolerance parameter.
    /// The boosting stops when the relative decrease
    /// of the round error is less than `tolerance`.
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }


    /// If `true`, the weights are rescaled to mean `1` after each round.
    pub fn normalize_weights(mut self, normalize: bool) -> Self {
        self.normalize_weights = normalize;
        self
    }


    /// Returns the current phase.
    pub fn state(&self) -> State {
        self.state
    }


    /// Returns the current weights.
    pub fn weights(&self) -> &WeightMatrix {
        &self.weights
    }


    /// Returns the classes of the included samples.
    pub fn classes(&self) -> &[usize] {
        &self.classes
    }


    /// Returns the reports of the finished rounds.
    pub fn reports(&self) -> &[RoundReport] {
        &self.reports
    }


    /// Returns the number of finished rounds.
    pub fn terminated(&self) -> usize {
        self.terminated
    }


    /// Recomputes `(a, b)` from the weights of the shared classes,
    /// split by the firing pattern of the rule.
    fn recompute(&self, fires: &[bool], mask: &SharingMask) -> (f64, f64) {
        let mut ab_num = 0f64;
        let mut ab_den = 0f64;
        let mut b_num = 0f64;
        let mut b_den = 0f64;

        self.weights.rows()
            .zip(fires)
            .zip(&self.classes)
            .for_each(|((row, &fire), &label)| {
                mask.classes()
                    .for_each(|c| {
                        let wz = sign(label, c) * row[c];
                        if fire {
                            ab_num += wz;
                            ab_den += row[c];
                        } else {
                            b_num += wz;
                            b_den += row[c];
                        }
                    });
            });

        let b = if b_den > 0f64 { b_num / b_den } else { 0f64 };
        let a = if ab_den > 0f64 { ab_num / ab_den - b } else { 0f64 };
        (a, b)
    }


    /// Multiplies each weight by `exp(-z h)` and
    /// returns the weighted squared error `sum w (z - h)^2`
    /// measured with the weights before the update.
    fn reweight(
        &mut self,
        fires: &[bool],
        candidate: &Candidate<R>,
        bias: &[f64],
    ) -> f64
    {
        let mask = &candidate.mask;
        let (a, b) = (candidate.a, candidate.b);

        self.weights.par_rows_mut()
            .zip(fires.par_iter())
            .zip(self.classes.par_iter())
            .map(|((row, &fire), &label)| {
                let shared = if fire { a + b } else { b };
                row.iter_mut()
                    .enumerate()
                    .map(|(c, w)| {
                        let h = if mask.contains(c) { shared } else { bias[c] };
                        let z = sign(label, c);
                        let error = *w * (z - h).powi(2);

                        let updated = *w * (-z * h).exp();
                        *w = if updated < MIN_WEIGHT { MIN_WEIGHT } else { updated };
                        error
                    })
                    .sum::<f64>()
            })
            .collect::<Vec<_>>()
            .into_iter()
            .sum::<f64>()
    }
}


impl<R: WeakRule> Booster<R> for JointBoost<'_, R> {
    type Output = Ensemble<R>;


    fn name(&self) -> &str {
        "JointBoost"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let tolerance = self.tolerance
            .map(|t| format!("{t}"))
            .unwrap_or_else(|| "-".into());
        let info = Vec::from([
            ("# of examples", format!("{}", self.data.len())),
            ("# of classes", format!("{}", self.n_classes)),
            ("# of rounds", format!("{}", self.n_rounds)),
            ("Seed", format!("{}", self.seed)),
            ("Tolerance", tolerance),
            ("Normalize weights", format!("{}", self.normalize_weights)),
        ]);
        Some(info)
    }


    fn preprocess<W>(&mut self, weak_learner: &W) -> Result<()>
        where W: WeakLearner<Rule = R>
    {
        checker::n_rounds(self.n_rounds)?;
        weak_learner.validate()?;
        weak_learner.validate_data(&self.data)?;

        self.weights = WeightMatrix::new(self.data.len(), self.n_classes);
        self.rng = StdRng::seed_from_u64(self.seed);
        self.ensemble = Ensemble::new(self.n_classes);
        self.reports = Vec::with_capacity(self.n_rounds);
        self.terminated = usize::MAX;
        self.state = State::Initializing;

        tracing::info!(
            n_samples = self.data.len(),
            n_classes = self.n_classes,
            n_rounds = self.n_rounds,
            weak_learner = weak_learner.name(),
            "start boosting"
        );
        Ok(())
    }


    fn boost<W>(
        &mut self,
        weak_learner: &W,
        iteration: usize,
    ) -> Result<ControlFlow<usize>>
        where W: WeakLearner<Rule = R>
    {
        if self.n_rounds < iteration {
            self.terminated = self.n_rounds;
            self.state = State::Done;
            return Ok(ControlFlow::Break(self.n_rounds));
        }

        let now = Instant::now();
        self.state = State::RunningRound;


        // Per-class bias of the current weights.
        let stats = ClassStats::from_weights(&self.weights, &self.classes);


        // Get the best rule of this round.
        let seed = self.rng.gen::<u64>();
        let view = WeightedSample::new(&self.data, &self.classes, &self.weights, &stats);
        let candidate = weak_learner.produce(&view, seed)
            .ok_or(BoostError::NoViableCandidate { round: iteration })?;


        // Recompute `(a, b)` from the firing pattern.
        let fires = self.data.par_iter()
            .map(|&x| candidate.rule.fires(x))
            .collect::<Vec<bool>>();
        let (a, b) = self.recompute(&fires, &candidate.mask);


        self.state = State::Reweighting;
        let recomputed_error = self.reweight(&fires, &candidate, stats.bias());
        if !self.weights.is_finite() {
            return Err(BoostError::NonFiniteWeight { round: iteration });
        }
        if self.normalize_weights {
            self.weights.normalize();
        }


        let drift = utils::relative_discrepancy(candidate.a, a)
            .max(utils::relative_discrepancy(candidate.b, b))
            .max(utils::relative_discrepancy(candidate.error, recomputed_error));
        if drift > DRIFT_TOLERANCE {
            tracing::warn!(
                round = iteration,
                a = candidate.a,
                recomputed_a = a,
                b = candidate.b,
                recomputed_b = b,
                error = candidate.error,
                recomputed_error,
                "recomputed response drifts from the searched one"
            );
        }


        let Candidate { mut rule, mask, a, b, error } = candidate;
        tracing::debug!(
            round = iteration,
            mask = %mask,
            a,
            b,
            error,
            threshold = rule.threshold(),
            "round finished"
        );

        // Finalize the rule [upsample, ...]
        rule.finalize();
        let shared_classes = mask.len();
        let round = Round::new(rule, mask, a, b, stats.bias().to_vec(), error);
        self.ensemble.push(round)?;

        let previous = self.reports.last().map(|r| r.error);
        self.reports.push(RoundReport {
            iteration,
            error,
            recomputed_error,
            drift,
            shared_classes,
            millis: now.elapsed().as_millis(),
        });


        if let (Some(tolerance), Some(previous)) = (self.tolerance, previous) {
            let decrease = (previous - error) / previous.max(f64::MIN_POSITIVE);
            if decrease < tolerance {
                tracing::info!(round = iteration, decrease, "error stopped decreasing");
                self.terminated = iteration;
                self.state = State::Done;
                return Ok(ControlFlow::Break(iteration));
            }
        }

        Ok(ControlFlow::Continue(()))
    }


    fn postprocess(&mut self) -> Result<Self::Output> {
        self.state = State::Done;
        if self.terminated == usize::MAX {
            self.terminated = self.ensemble.n_rounds();
        }

        tracing::info!(
            n_rounds = self.ensemble.n_rounds(),
            "boosting finished"
        );
        Ok(self.ensemble.clone())
    }
}


impl<R: WeakRule> Research for JointBoost<'_, R> {
    fn last_report(&self) -> Option<&RoundReport> {
        self.reports.last()
    }
}
