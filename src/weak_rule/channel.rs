//! Defines the per-channel stump.
//! The response is the value of a single channel of the sample,
//! e.g., a precomputed filter response or a location feature.
use rand::Rng;
use serde::{Serialize, Deserialize};

use std::fmt;
use std::ops::Range;
use std::marker::PhantomData;

use crate::common::checker;
use crate::error::{BoostError, Result};
use super::core::{WeakRule, sample_channel};


/// A sample with indexed scalar channels.
pub trait ChannelSource {
    /// Returns the value of `channel`.
    fn channel(&self, channel: usize) -> f64;

    /// Returns the number of channels, if known.
    fn n_channels(&self) -> Option<usize> {
        None
    }
}


impl ChannelSource for f64 {
    /// A scalar has a single channel; the index is ignored.
    #[inline]
    fn channel(&self, _channel: usize) -> f64 {
        *self
    }

    #[inline]
    fn n_channels(&self) -> Option<usize> {
        Some(1)
    }
}


impl ChannelSource for Vec<f64> {
    #[inline]
    fn channel(&self, channel: usize) -> f64 {
        self[channel]
    }

    #[inline]
    fn n_channels(&self) -> Option<usize> {
        Some(self.len())
    }
}


/// Parameters of the random channel stumps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelConfig {
    channel_ranges: Vec<Range<usize>>,
}


impl ChannelConfig {
    /// Construct a new configuration drawing channels from `channel_ranges`.
    pub fn new(channel_ranges: Vec<Range<usize>>) -> Self {
        Self { channel_ranges }
    }

    /// Returns the channel ranges.
    pub fn channel_ranges(&self) -> &[Range<usize>] {
        &self.channel_ranges
    }
}


/// A decision stump on a single channel.
#[derive(Serialize, Deserialize)]
pub struct ChannelRule<D> {
    channel: usize,
    threshold: f64,
    #[serde(skip)]
    _marker: PhantomData<fn() -> D>,
}


impl<D> ChannelRule<D> {
    /// Construct a new stump.
    pub fn new(channel: usize, threshold: f64) -> Self {
        Self { channel, threshold, _marker: PhantomData }
    }

    /// Returns the channel.
    #[inline]
    pub fn channel(&self) -> usize {
        self.channel
    }
}


impl<D> Clone for ChannelRule<D> {
    fn clone(&self) -> Self {
        Self::new(self.channel, self.threshold)
    }
}


impl<D> PartialEq for ChannelRule<D> {
    fn eq(&self, other: &Self) -> bool {
        self.channel == other.channel && self.threshold == other.threshold
    }
}


impl<D> fmt::Debug for ChannelRule<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChannelRule")
            .field("channel", &self.channel)
            .field("threshold", &self.threshold)
            .finish()
    }
}


impl<D> WeakRule for ChannelRule<D>
    where D: ChannelSource + Sync,
{
    type Data = D;
    type Config = ChannelConfig;

    fn sample<R: Rng + ?Sized>(config: &Self::Config, rng: &mut R) -> Self {
        let channel = sample_channel(&config.channel_ranges, rng);
        Self::new(channel, 0f64)
    }

    #[inline]
    fn response(&self, data: &D) -> f64 {
        data.channel(self.channel)
    }

    #[inline]
    fn threshold(&self) -> f64 {
        self.threshold
    }

    #[inline]
    fn set_threshold(&mut self, threshold: f64) {
        self.threshold = threshold;
    }

    fn validate(config: &Self::Config) -> Result<()> {
        checker::channel_ranges(&config.channel_ranges)
    }

    fn check_data(config: &Self::Config, data: &D) -> Result<()> {
        let Some(n_channels) = data.n_channels() else { return Ok(()); };
        let required = config.channel_ranges.iter()
            .map(|r| r.end)
            .max()
            .unwrap_or(0);
        if required > n_channels {
            let message = format!(
                "channel ranges need {required} channels, the sample has {n_channels}"
            );
            return Err(BoostError::InvalidConfig(message));
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    #[test]
    fn test_channel_rule_01() {
        let config = ChannelConfig::new(vec![1..3]);
        let mut rng = StdRng::seed_from_u64(1234);
        let mut rule = ChannelRule::<Vec<f64>>::sample(&config, &mut rng);
        assert!((1..3).contains(&rule.channel()));

        let x = vec![0.0, 5.0, 5.0];
        rule.set_threshold(4.0);
        assert_eq!(rule.response(&x), 5.0);
        assert!(rule.fires(&x));

        // `fires` is strict.
        rule.set_threshold(5.0);
        assert!(!rule.fires(&x));
    }

    #[test]
    fn test_validate_01() {
        let ok = ChannelConfig::new(vec![0..1]);
        assert!(ChannelRule::<f64>::validate(&ok).is_ok());

        let ng = ChannelConfig::new(vec![0..0]);
        assert!(ChannelRule::<f64>::validate(&ng).is_err());
    }

    #[test]
    fn test_check_data_01() {
        let config = ChannelConfig::new(vec![0..2, 2..3]);
        let x = vec![0.0, 1.0, 2.0];
        assert!(ChannelRule::<Vec<f64>>::check_data(&config, &x).is_ok());

        let short = vec![0.0, 1.0];
        assert!(matches!(
            ChannelRule::<Vec<f64>>::check_data(&config, &short),
            Err(BoostError::InvalidConfig(_))
        ));

        // A scalar has one channel.
        assert!(ChannelRule::<f64>::check_data(&ChannelConfig::new(vec![0..1]), &1.0).is_ok());
        assert!(ChannelRule::<f64>::check_data(&config, &1.0).is_err());
    }
}
