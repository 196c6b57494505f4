//! Provides the boosting engine.

mod core;
mod jointboost;


/// Booster trait
pub use self::core::Booster;

// Shared-feature boosting
pub use self::jointboost::{
    JointBoost,
    RoundReport,
    State,
};
