//! Exports the boosting engine, the weak rules and the traits.
//!
pub use crate::booster::{
    // Booster trait
    Booster,

    // Shared-feature boosting
    JointBoost,
    RoundReport,
    State,
};


pub use crate::weak_learner::{
    // Weak learner trait
    WeakLearner,

    // Best-of-N random search
    RuleSearch,
    Candidate,
    CandidateSampler,
    SharingMask,
};


pub use crate::weak_rule::{
    // Weak rule trait
    WeakRule,

    // Rectangle (texture-layout) rules
    Rect,
    RegionSource,
    RectangleRule,
    RectangleConfig,
    SizeSampling,
    OffsetSampling,

    // Per-channel stumps
    ChannelSource,
    ChannelRule,
    ChannelConfig,
};


pub use crate::sample::{
    Labels,
    WeightMatrix,
    ClassStats,
    WeightedSample,
};


pub use crate::hypothesis::{
    Round,
    Ensemble,
    ScoreMap,
    OutputMode,
};


pub use crate::research::{
    Logger,
    Research,
};


pub use crate::error::{
    BoostError,
    Result,
};
