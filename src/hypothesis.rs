//! The trained model and its inference routines.

pub(crate) mod round;
pub(crate) mod ensemble;
pub(crate) mod score_map;


pub use round::Round;
pub use ensemble::Ensemble;
pub use score_map::{ScoreMap, OutputMode};
