//! The files in `weak_rule/` directory defines
//! `WeakRule` trait and the randomly parameterized rules.

/// Provides WeakRule trait.
pub mod core;

/// Defines the rectangle (texture-layout) rule.
pub mod rectangle;

/// Defines the per-channel stump.
pub mod channel;


pub use self::core::WeakRule;

pub use self::rectangle::{
    Rect,
    RegionSource,
    RectangleRule,
    RectangleConfig,
    SizeSampling,
    OffsetSampling,
};

pub use self::channel::{
    ChannelSource,
    ChannelRule,
    ChannelConfig,
};
