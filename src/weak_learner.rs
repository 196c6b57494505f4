//! The files in `weak_learner/` directory defines
//! `WeakLearner` trait and the best-of-N random rule search.
//!
//! For a single random rule, the pipeline is
//! 1. evaluate the response on every training sample,
//! 2. build the threshold set ([`thresholds`]),
//! 3. bucket the weights into a [`WeightedHistogram`],
//! 4. choose the classes sharing the rule ([`sharing`])
//!     by calling the closed-form threshold solver ([`solver`]).
//!
//! [`RuleSearch`] repeats the pipeline for many random rules in parallel.

/// Provides WeakLearner trait.
pub mod core;

/// Defines the set of classes sharing a rule.
pub mod sharing_mask;

/// Defines the threshold families.
pub mod thresholds;

/// Defines the weighted histogram of a candidate.
pub mod histogram;

/// Defines the closed-form threshold solver.
pub mod solver;

/// Defines the greedy selection of the sharing classes.
pub mod sharing;

/// Defines the sampler of a single candidate.
pub mod candidate;

/// Defines the best-of-N search.
pub mod rule_search;


pub use self::core::WeakLearner;
pub use self::sharing_mask::SharingMask;
pub use self::histogram::WeightedHistogram;
pub use self::solver::{Split, optimize_weak};
pub use self::sharing::{SharedSplit, select_sharing};
pub use self::candidate::{Candidate, CandidateSampler};
pub use self::rule_search::{RuleSearch, trial_seeds};
