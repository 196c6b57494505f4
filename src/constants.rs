//! Numerical tolerances and default parameters.

/// A split whose masked weight on either side is at most this value
/// is skipped by the threshold solver.
pub const SPLIT_TOLERANCE:     f64 = 1e-10;
/// Relative discrepancy between the solver's `(a, b)` and
/// the recomputed ones that is reported as numerical drift.
pub const DRIFT_TOLERANCE:     f64 = 1e-5;
/// Growth factor of the exponentially spaced thresholds.
pub const EXP_GROWTH_FACTOR:   f64 = 1.1;
/// Weights never fall below this value after reweighting.
pub const MIN_WEIGHT:          f64 = f64::MIN_POSITIVE;
/// Threshold used when a rule fires on every sample.
/// A rule with this threshold fires on any response but `NaN`,
/// including `-inf`. The value is finite so that it survives JSON.
pub const ALWAYS_FIRES:        f64 = f64::MIN;

/// Default number of boosting rounds.
pub const DEFAULT_ROUNDS:      usize = 100;
/// Default number of random candidates per round.
pub const DEFAULT_CANDIDATES:  usize = 200;
/// Default number of thresholds per threshold family.
pub const DEFAULT_THRESHOLDS:  usize = 100;
/// Default seed of the boosting engine.
pub const DEFAULT_SEED:        u64   = 1234;

/// Default subsampling factor of the rectangle rules.
pub const DEFAULT_SUBSAMPLE:   i32 = 5;
/// Default minimal rectangle side (in pixels).
pub const DEFAULT_MIN_RECT:    i32 = 5;
/// Default maximal rectangle side (in pixels).
pub const DEFAULT_MAX_RECT:    i32 = 200;

/// `Logger` prints its status every this many rounds by default.
pub const DEFAULT_PRINT_EVERY: usize = 100;
