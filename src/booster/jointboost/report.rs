use serde::{Serialize, Deserialize};


/// Bookkeeping of a boosting round.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct RoundReport {
    /// The iteration, starting from `1`.
    pub iteration: usize,
    /// The weighted squared error reported by the rule search.
    pub error: f64,
    /// The weighted squared error measured while reweighting.
    pub recomputed_error: f64,
    /// The largest relative discrepancy between
    /// the searched and the recomputed `a`, `b` and error.
    pub drift: f64,
    /// The number of classes sharing the rule.
    pub shared_classes: usize,
    /// Running time of the round in milliseconds.
    pub millis: u128,
}
