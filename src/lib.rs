#![warn(missing_docs)]

//!
//! A crate that provides shared-feature boosting (a.k.a. JointBoost)
//! for per-pixel semantic segmentation.
//!
//! Each boosting round draws many random weak rules,
//! fits a two-level response `(a, b)` for each of them
//! and greedily decides which classes share the rule.
//! The best rule of the round is appended to an additive [`Ensemble`].
//!
//! - [`JointBoost`] runs the boosting rounds and
//!     maintains a weight for every pair of sample and class.
//! - [`RuleSearch`] is the weak learner.
//!     It evaluates `n` random candidates in parallel
//!     and returns the one with the minimum weighted squared error.
//! - [`Ensemble`] is the trained model.
//!     It assigns a score (or a probability) to every class of every pixel.
//!
//! # Example
//! ```no_run
//! use sharedboost::prelude::*;
//!
//! // Each sample is a vector of channel values.
//! let data: Vec<Vec<f64>> = vec![
//!     vec![0.0, 1.0], vec![1.0, 0.5], vec![2.0, 0.1], vec![3.0, 0.0],
//! ];
//! let labels = Labels::from_signed(&[0_i8, 0, 1, -1], 2).unwrap();
//!
//! let mut booster = JointBoost::<ChannelRule<Vec<f64>>>::init(&data, &labels)
//!     .unwrap()
//!     .rounds(10)
//!     .seed(777);
//!
//! let weak_learner = RuleSearch::<ChannelRule<Vec<f64>>>::new(ChannelConfig::new(vec![0..2]))
//!     .candidates(50)
//!     .thresholds(20);
//!
//! let ensemble = booster.run(&weak_learner).unwrap();
//! let scores = ensemble.score_map(&data, OutputMode::Probability);
//! println!("{:?}", scores.labels());
//! ```

pub mod constants;
pub mod error;
pub mod common;
pub mod sample;
pub mod weak_rule;
pub mod weak_learner;
pub mod booster;
pub mod hypothesis;
pub mod research;
pub mod prelude;


pub use error::{BoostError, Result};

pub use sample::{
    Labels,
    WeightMatrix,
    ClassStats,
    WeightedSample,
};

pub use weak_rule::{
    WeakRule,
    RectangleRule,
    RectangleConfig,
    ChannelRule,
    ChannelConfig,
};

pub use weak_learner::{
    WeakLearner,
    RuleSearch,
    Candidate,
    CandidateSampler,
    SharingMask,
};

pub use booster::{
    Booster,
    JointBoost,
};

pub use hypothesis::{
    Round,
    Ensemble,
    ScoreMap,
    OutputMode,
};
