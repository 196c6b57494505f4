//! This directory provides some features for research.
//! Measure the followings of boosting algorithm per iteration
//! - Running time
//! - Weighted squared error of the round
//! - Discrepancy between the searched and the recomputed response

/// Defines a struct that runs a boosting algorithm with logging.
pub mod logger;

pub use logger::{Logger, Research};
