//! Defines the rectangle rule of texture-layout filters.
//!
//! A rectangle rule looks at a rectangle placed relative to the pixel
//! and measures the mean of a feature channel (e.g., a texton indicator)
//! inside the rectangle.
//! The region means are provided by the caller through [`RegionSource`],
//! typically backed by an integral image.
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Serialize, Deserialize};

use std::fmt;
use std::ops::Range;
use std::marker::PhantomData;

use crate::common::checker;
use crate::constants::{
    DEFAULT_MIN_RECT,
    DEFAULT_MAX_RECT,
    DEFAULT_SUBSAMPLE,
};
use crate::error::{BoostError, Result};
use super::core::{WeakRule, sample_channel};


/// A rectangle relative to a pixel.
/// The rectangle covers `x1 <= x < x2` and `y1 <= y < y2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x1: i32,
    /// Top edge (inclusive).
    pub y1: i32,
    /// Right edge (exclusive).
    pub x2: i32,
    /// Bottom edge (exclusive).
    pub y2: i32,
}


impl Rect {
    /// Construct a new rectangle.
    #[inline]
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Returns the width.
    #[inline]
    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    /// Returns the height.
    #[inline]
    pub fn height(&self) -> i32 {
        self.y2 - self.y1
    }

    /// Returns the rectangle with every coordinate multiplied by `factor`.
    #[inline]
    pub fn scale(&self, factor: i32) -> Self {
        Self {
            x1: self.x1 * factor,
            y1: self.y1 * factor,
            x2: self.x2 * factor,
            y2: self.y2 * factor,
        }
    }
}


/// A sample that can report region means of its channels.
pub trait RegionSource {
    /// Returns the mean of `channel` over `rect`,
    /// where `rect` is relative to the position of this sample.
    /// Implementors clip `rect` to the image
    /// and return `0` if it lies outside.
    fn region_mean(&self, rect: &Rect, channel: usize) -> f64;
}


/// How the rectangle size is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeSampling {
    /// Width and height are uniform in `[min, max]`.
    Uniform,
    /// The area is uniform in `[min^2, max^2]`.
    Area,
}


/// How the rectangle offset is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OffsetSampling {
    /// The offset is uniform in the window of side `max`.
    Uniform,
    /// The offset is drawn from a Gaussian centered on the window.
    Gaussian,
}


/// Parameters of the random rectangle rules.
/// The sizes are given in pixels
/// and are divided by the subsampling factor when sampling.
///
/// # Example
/// ```no_run
/// use sharedboost::prelude::*;
///
/// // Two texton maps with 400 and 20 textons.
/// let config = RectangleConfig::new(vec![0..400, 400..420])
///     .subsample(5)
///     .min_size(5)
///     .max_size(200)
///     .offset_sampling(OffsetSampling::Gaussian);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectangleConfig {
    min_size: i32,
    max_size: i32,
    subsample: i32,
    channel_ranges: Vec<Range<usize>>,
    size_sampling: SizeSampling,
    offset_sampling: OffsetSampling,
}


impl RectangleConfig {
    /// Construct a new configuration drawing channels from `channel_ranges`.
    pub fn new(channel_ranges: Vec<Range<usize>>) -> Self {
        Self {
            min_size: DEFAULT_MIN_RECT,
            max_size: DEFAULT_MAX_RECT,
            subsample: DEFAULT_SUBSAMPLE,
            channel_ranges,
            size_sampling: SizeSampling::Uniform,
            offset_sampling: OffsetSampling::Gaussian,
        }
    }

    /// Set the minimal rectangle side in pixels.
    /// Default value is `5`.
    pub fn min_size(mut self, size: i32) -> Self {
        self.min_size = size;
        self
    }

    /// Set the maximal rectangle side in pixels.
    /// Default value is `200`.
    pub fn max_size(mut self, size: i32) -> Self {
        self.max_size = size;
        self
    }

    /// Set the subsampling factor of the training images.
    /// Default value is `5`.
    pub fn subsample(mut self, factor: i32) -> Self {
        self.subsample = factor;
        self
    }

    /// Set the size sampling. Default value is `SizeSampling::Uniform`.
    pub fn size_sampling(mut self, sampling: SizeSampling) -> Self {
        self.size_sampling = sampling;
        self
    }

    /// Set the offset sampling. Default value is `OffsetSampling::Gaussian`.
    pub fn offset_sampling(mut self, sampling: OffsetSampling) -> Self {
        self.offset_sampling = sampling;
        self
    }

    /// Returns the channel ranges.
    pub fn channel_ranges(&self) -> &[Range<usize>] {
        &self.channel_ranges
    }

    /// Returns the subsampling factor.
    pub fn subsample_factor(&self) -> i32 {
        self.subsample
    }

    /// Returns the minimal and maximal side in subsampled pixels.
    #[inline]
    pub fn scaled_bounds(&self) -> (i32, i32) {
        let lo = (self.min_size / self.subsample).max(1);
        let hi = self.max_size / self.subsample;
        (lo, hi)
    }

    /// Check the consistency of the parameters.
    pub fn validate(&self) -> Result<()> {
        if self.subsample < 1 {
            let message = format!(
                "subsampling factor must be positive. got {}", self.subsample
            );
            return Err(BoostError::InvalidConfig(message));
        }
        if self.min_size < 1 || self.min_size > self.max_size {
            let message = format!(
                "rectangle sizes must satisfy 1 <= min <= max. got [{}, {}]",
                self.min_size, self.max_size,
            );
            return Err(BoostError::InvalidConfig(message));
        }
        let (lo, hi) = self.scaled_bounds();
        if lo > hi {
            let message = format!(
                "maximal size {} is smaller than the subsampling factor {}",
                self.max_size, self.subsample,
            );
            return Err(BoostError::InvalidConfig(message));
        }
        checker::channel_ranges(&self.channel_ranges)
    }
}


/// A rectangle rule.
/// The response is the mean of `channel` over `rect`,
/// normalized by `subsample^2` while training on subsampled images.
#[derive(Serialize, Deserialize)]
pub struct RectangleRule<D> {
    rect: Rect,
    channel: usize,
    threshold: f64,
    subsample: i32,
    #[serde(skip)]
    _marker: PhantomData<fn() -> D>,
}


impl<D> RectangleRule<D> {
    /// Construct a full-resolution rule.
    pub fn new(rect: Rect, channel: usize, threshold: f64) -> Self {
        Self {
            rect,
            channel,
            threshold,
            subsample: 1,
            _marker: PhantomData,
        }
    }

    /// Returns the rectangle.
    #[inline]
    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    /// Returns the channel.
    #[inline]
    pub fn channel(&self) -> usize {
        self.channel
    }

    /// Returns the subsampling factor the rule currently works at.
    #[inline]
    pub fn subsample(&self) -> i32 {
        self.subsample
    }
}


impl<D> Clone for RectangleRule<D> {
    fn clone(&self) -> Self {
        Self {
            rect: self.rect,
            channel: self.channel,
            threshold: self.threshold,
            subsample: self.subsample,
            _marker: PhantomData,
        }
    }
}


impl<D> PartialEq for RectangleRule<D> {
    fn eq(&self, other: &Self) -> bool {
        self.rect == other.rect
            && self.channel == other.channel
            && self.threshold == other.threshold
            && self.subsample == other.subsample
    }
}


impl<D> fmt::Debug for RectangleRule<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RectangleRule")
            .field("rect", &self.rect)
            .field("channel", &self.channel)
            .field("threshold", &self.threshold)
            .field("subsample", &self.subsample)
            .finish()
    }
}


impl<D> fmt::Display for RectangleRule<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Rect { x1, y1, x2, y2 } = self.rect;
        write!(
            f,
            "rect: [{x1} {y1} - {x2} {y2}] channel: {} thres: {}",
            self.channel, self.threshold,
        )
    }
}


/// Draws an offset in `[0, span]` (before truncation)
/// from a Gaussian with mean and deviation `span / 2`.
#[inline]
fn gaussian_offset<R>(span: i32, rng: &mut R) -> i32
    where R: Rng + ?Sized,
{
    let half = span as f64 / 2f64;
    Normal::new(half, half)
        .map_or(0, |normal| normal.sample(rng) as i32)
}


impl<D> WeakRule for RectangleRule<D>
    where D: RegionSource + Sync,
{
    type Data = D;
    type Config = RectangleConfig;

    fn sample<R: Rng + ?Sized>(config: &Self::Config, rng: &mut R) -> Self {
        let (lo, hi) = config.scaled_bounds();

        let (w, h) = match config.size_sampling {
            SizeSampling::Uniform => {
                (rng.gen_range(lo..=hi), rng.gen_range(lo..=hi))
            },
            SizeSampling::Area => {
                let (lo_f, hi_f) = (lo as f64, hi as f64);
                let area = lo_f * lo_f
                    + (hi_f * hi_f - lo_f * lo_f) * rng.gen::<f64>();
                let min_w = (area / hi_f).max(lo_f).ceil() as i32;
                let max_w = (area / lo_f).min(hi_f).floor() as i32;
                let w = if min_w <= max_w {
                    rng.gen_range(min_w..=max_w)
                } else {
                    min_w.min(hi)
                };
                let h = ((area / w as f64).round() as i32).clamp(lo, hi);
                if rng.gen::<bool>() { (h, w) } else { (w, h) }
            },
        };

        let (x, y) = match config.offset_sampling {
            OffsetSampling::Uniform => {
                (rng.gen_range(0..=hi - w), rng.gen_range(0..=hi - h))
            },
            OffsetSampling::Gaussian => {
                (gaussian_offset(hi - w, rng), gaussian_offset(hi - h, rng))
            },
        };

        let x1 = x - hi / 2;
        let y1 = y - hi / 2;
        let rect = Rect::new(x1, y1, x1 + w, y1 + h);

        let channel = sample_channel(&config.channel_ranges, rng);

        Self {
            rect,
            channel,
            threshold: 0f64,
            subsample: config.subsample,
            _marker: PhantomData,
        }
    }

    #[inline]
    fn response(&self, data: &D) -> f64 {
        let area_scale = (self.subsample * self.subsample) as f64;
        data.region_mean(&self.rect, self.channel) / area_scale
    }

    #[inline]
    fn threshold(&self) -> f64 {
        self.threshold
    }

    #[inline]
    fn set_threshold(&mut self, threshold: f64) {
        self.threshold = threshold;
    }

    /// Scale the rectangle back to full resolution.
    fn finalize(&mut self) {
        self.rect = self.rect.scale(self.subsample);
        self.subsample = 1;
    }

    fn validate(config: &Self::Config) -> Result<()> {
        config.validate()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    /// A constant image: every channel has mean `channel` everywhere.
    struct Flat;

    impl RegionSource for Flat {
        fn region_mean(&self, _rect: &Rect, channel: usize) -> f64 {
            channel as f64
        }
    }

    fn config() -> RectangleConfig {
        RectangleConfig::new(vec![0..4, 4..6])
            .subsample(2)
            .min_size(4)
            .max_size(20)
    }

    #[test]
    fn test_sample_uniform_01() {
        let config = config().offset_sampling(OffsetSampling::Uniform);
        let (lo, hi) = config.scaled_bounds();
        assert_eq!((lo, hi), (2, 10));

        let mut rng = StdRng::seed_from_u64(1234);
        for _ in 0..200 {
            let rule = RectangleRule::<Flat>::sample(&config, &mut rng);
            let rect = rule.rect();
            assert!((lo..=hi).contains(&rect.width()));
            assert!((lo..=hi).contains(&rect.height()));
            assert!(rect.x1 >= -hi / 2 && rect.x2 <= hi - hi / 2);
            assert!(rect.y1 >= -hi / 2 && rect.y2 <= hi - hi / 2);
            assert!(rule.channel() < 6);
        }
    }

    #[test]
    fn test_sample_area_01() {
        let config = config().size_sampling(SizeSampling::Area);
        let (lo, hi) = config.scaled_bounds();

        let mut rng = StdRng::seed_from_u64(777);
        for _ in 0..200 {
            let rule = RectangleRule::<Flat>::sample(&config, &mut rng);
            let rect = rule.rect();
            assert!((lo..=hi).contains(&rect.width()));
            assert!((lo..=hi).contains(&rect.height()));
        }
    }

    #[test]
    fn test_response_and_finalize_01() {
        let config = config();
        let mut rng = StdRng::seed_from_u64(42);
        let mut rule = RectangleRule::<Flat>::sample(&config, &mut rng);
        let rect = *rule.rect();

        // Normalized by `subsample^2` while training.
        let expected = rule.channel() as f64 / 4.0;
        assert_eq!(rule.response(&Flat), expected);

        rule.set_threshold(expected - 0.1);
        assert!(rule.fires(&Flat));
        assert!(!rule.fires_at(&Flat, expected));

        rule.finalize();
        assert_eq!(rule.subsample(), 1);
        assert_eq!(*rule.rect(), rect.scale(2));
        assert_eq!(rule.response(&Flat), rule.channel() as f64);
    }

    #[test]
    fn test_validate_failure_01() {
        assert!(config().subsample(0).validate().is_err());
        assert!(config().min_size(30).validate().is_err());
        assert!(config().max_size(1).min_size(1).validate().is_err());
        assert!(RectangleConfig::new(vec![]).validate().is_err());
        assert!(config().validate().is_ok());
    }
}
