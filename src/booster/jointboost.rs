//! Defines `JointBoost`.
//! This struct is based on the paper:
//! [Sharing visual features for multiclass and multiview object detection](https://doi.org/10.1109/TPAMI.2007.1055)
//! by Antonio Torralba, Kevin P. Murphy and William T. Freeman.
pub mod jointboost_algorithm;
pub mod report;

pub use jointboost_algorithm::{JointBoost, State};
pub use report::RoundReport;
