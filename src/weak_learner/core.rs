//! Provides `WeakLearner` trait.

use crate::{
    WeakRule,
    WeightedSample,
};
use crate::error::Result;
use super::Candidate;


/// A trait that defines the behavor of Weak Learner.
/// You need to implement [`WeakLearner::name`]
/// and [`WeakLearner::produce`]
/// to use your weak learner.
pub trait WeakLearner {
    /// The weak rules this learner produces.
    type Rule: WeakRule;

    /// Returns the name of the weak learner.
    fn name(&self) -> &str;

    /// Returns the information of the weak learner as `String`.
    fn info(&self) -> Option<Vec<(&str, String)>> {
        None
    }

    /// Check the parameters before the boosting process.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Check that the produced rules can be evaluated on `data`.
    fn validate_data(&self, _data: &[&<Self::Rule as WeakRule>::Data]) -> Result<()> {
        Ok(())
    }

    /// Returns the best candidate for the given weighted sample.
    /// All random draws of this call are derived from `seed`.
    /// Returns `None` if every drawn rule is rejected.
    fn produce(
        &self,
        sample: &WeightedSample<'_, <Self::Rule as WeakRule>::Data>,
        seed: u64,
    ) -> Option<Candidate<Self::Rule>>;
}
