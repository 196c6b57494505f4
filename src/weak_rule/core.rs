//! Provides `WeakRule` trait.

use rand::Rng;

use std::fmt;
use std::ops::Range;

use crate::constants::ALWAYS_FIRES;
use crate::error::Result;


/// A randomly parameterized scalar test.
///
/// A weak rule computes a real-valued `response` on a sample
/// and **fires** if the response is strictly greater than its threshold.
/// [`RuleSearch`](crate::RuleSearch) draws rules with [`WeakRule::sample`],
/// chooses a threshold, and [`JointBoost`](crate::JointBoost)
/// calls [`WeakRule::finalize`] before storing the rule in the ensemble.
///
/// # Required Methods
/// - [`WeakRule::sample`]
/// - [`WeakRule::response`]
/// - [`WeakRule::threshold`]
/// - [`WeakRule::set_threshold`]
///
/// # Provided Methods
/// - [`WeakRule::fires_at`]
/// - [`WeakRule::fires`]
/// - [`WeakRule::finalize`] ... does nothing by default.
/// - [`WeakRule::validate`] ... accepts any configuration by default.
/// - [`WeakRule::check_data`] ... accepts any sample by default.
pub trait WeakRule: Clone + fmt::Debug + Send + Sync {
    /// The sample type this rule is evaluated on.
    type Data: Sync;

    /// The parameters of the random draw.
    type Config: Sync;

    /// Draws a new rule. The threshold of the returned rule is meaningless
    /// until [`WeakRule::set_threshold`] is called.
    fn sample<R: Rng + ?Sized>(config: &Self::Config, rng: &mut R) -> Self;

    /// Computes the response of this rule on `data`.
    fn response(&self, data: &Self::Data) -> f64;

    /// Returns the current threshold.
    fn threshold(&self) -> f64;

    /// Set the threshold.
    fn set_threshold(&mut self, threshold: f64);

    /// Returns `true` if the response on `data` exceeds `threshold`.
    /// A `NaN` response never fires.
    /// With [`ALWAYS_FIRES`] every other response fires, `-inf` included.
    #[inline]
    fn fires_at(&self, data: &Self::Data, threshold: f64) -> bool {
        let response = self.response(data);
        if threshold == ALWAYS_FIRES {
            return !response.is_nan();
        }
        response > threshold
    }

    /// Returns `true` if the response on `data` exceeds the current threshold.
    #[inline]
    fn fires(&self, data: &Self::Data) -> bool {
        self.fires_at(data, self.threshold())
    }

    /// Post-training hook, called once before the rule is stored.
    fn finalize(&mut self) {}

    /// Check the configuration before training starts.
    fn validate(_config: &Self::Config) -> Result<()> {
        Ok(())
    }

    /// Check that rules drawn from `config` can be evaluated on `data`.
    fn check_data(_config: &Self::Config, _data: &Self::Data) -> Result<()> {
        Ok(())
    }
}


/// Picks a channel range uniformly at random,
/// then a channel in that range uniformly at random.
/// Recall that the ranges are checked to be non-empty
/// before training starts.
#[inline]
pub(crate) fn sample_channel<R>(ranges: &[Range<usize>], rng: &mut R) -> usize
    where R: Rng + ?Sized,
{
    let range = &ranges[rng.gen_range(0..ranges.len())];
    rng.gen_range(range.clone())
}


#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    #[test]
    fn test_sample_channel_01() {
        let ranges = vec![0..1, 10..12];
        let mut rng = StdRng::seed_from_u64(1234);
        for _ in 0..100 {
            let c = sample_channel(&ranges, &mut rng);
            assert!(c == 0 || c == 10 || c == 11);
        }
    }

    #[derive(Debug, Clone)]
    struct Identity(f64);

    impl WeakRule for Identity {
        type Data = f64;
        type Config = ();

        fn sample<R: Rng + ?Sized>(_config: &(), _rng: &mut R) -> Self {
            Identity(0.0)
        }

        fn response(&self, data: &f64) -> f64 {
            *data
        }

        fn threshold(&self) -> f64 {
            self.0
        }

        fn set_threshold(&mut self, threshold: f64) {
            self.0 = threshold;
        }
    }

    #[test]
    fn test_fires_01() {
        let rule = Identity(ALWAYS_FIRES);
        assert!(rule.fires(&f64::NEG_INFINITY));
        assert!(rule.fires(&f64::MIN));
        assert!(rule.fires(&0.0));
        assert!(!rule.fires(&f64::NAN));

        let rule = Identity(1.0);
        assert!(rule.fires(&f64::INFINITY));
        assert!(!rule.fires(&1.0));
        assert!(!rule.fires(&f64::NEG_INFINITY));
        assert!(!rule.fires(&f64::NAN));
    }
}
