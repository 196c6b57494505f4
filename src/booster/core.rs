//! Provides `Booster` trait.

use crate::{
    WeakRule,
    WeakLearner,
};
use crate::error::Result;

use std::ops::ControlFlow;


/// The trait [`Booster`] defines the standard framework of Boosting.
/// Here, the **standard framework** is defined as
/// a repeated game between **Booster** and **Weak Learner**
/// of the following form:
///
/// In each round `t = 1, 2, ...`,
/// 1. Booster chooses weights on the pairs of
///    training instances and classes.
/// 2. Weak Learner chooses a rule that achieves
///    small weighted error with respect to the weights.
///
/// # Required Methods
/// - [`Booster::name`]
/// - [`Booster::preprocess`]
/// - [`Booster::boost`]
/// - [`Booster::postprocess`]
/// - [`Booster::info`] ... optional.
///
/// # Provided Methods
/// - [`Booster::run`]
pub trait Booster<R: WeakRule> {
    /// The final hypothesis output by a boosting algorithm.
    type Output;

    /// Returns the name of the boosting algorithm.
    fn name(&self) -> &str;

    /// Returns the information of boosting algorithm as `String`.
    fn info(&self) -> Option<Vec<(&str, String)>> {
        None
    }

    /// A main function that runs boosting algorithm.
    fn run<W>(&mut self, weak_learner: &W) -> Result<Self::Output>
        where W: WeakLearner<Rule = R>
    {
        self.preprocess(weak_learner)?;

        let flow = (1..).try_for_each(|iter| {
            match self.boost(weak_learner, iter) {
                Ok(ControlFlow::Continue(())) => ControlFlow::Continue(()),
                Ok(ControlFlow::Break(_)) => ControlFlow::Break(Ok(())),
                Err(e) => ControlFlow::Break(Err(e)),
            }
        });
        if let ControlFlow::Break(Err(e)) = flow {
            return Err(e);
        }

        self.postprocess()
    }

    /// Pre-processing for `self`.
    /// As you can see in [`Booster::run`],
    /// this method is called before the boosting process.
    fn preprocess<W>(&mut self, weak_learner: &W) -> Result<()>
        where W: WeakLearner<Rule = R>;

    /// Boosting step per iteration.
    /// This method returns
    /// `ControlFlow::Break(terminated_iter)` if the boosting terminates,
    /// `ControlFlow::Continue(())` otherwise.
    fn boost<W>(
        &mut self,
        weak_learner: &W,
        iteration: usize,
    ) -> Result<ControlFlow<usize>>
        where W: WeakLearner<Rule = R>;

    /// Post-processing.
    fn postprocess(&mut self) -> Result<Self::Output>;
}
