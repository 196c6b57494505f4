//! Errors reported by training, inference and persistence.

use thiserror::Error;

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, BoostError>;

/// Errors that may occur while training or using an ensemble.
#[derive(Debug, Error)]
pub enum BoostError {
    /// The number of classes is zero.
    #[error("the number of classes must be positive")]
    NoClasses,
    /// The number of boosting rounds is zero.
    #[error("the number of boosting rounds must be positive")]
    NoRounds,
    /// The number of candidates per round is zero.
    #[error("the number of candidates per round must be positive")]
    NoCandidates,
    /// The number of thresholds per candidate is zero.
    #[error("the number of thresholds per candidate must be positive")]
    NoThresholds,
    /// The training sample has no element.
    #[error("the training sample is empty")]
    EmptySample,
    /// The data and the labels have different lengths.
    #[error("got {n_data} samples but {n_labels} labels")]
    LengthMismatch {
        /// Number of samples.
        n_data: usize,
        /// Number of labels.
        n_labels: usize,
    },
    /// A label is not in `[0, n_classes)`.
    #[error("label {label} of sample {index} is out of range for {n_classes} classes")]
    LabelOutOfRange {
        /// Position of the sample.
        index: usize,
        /// The offending label.
        label: i64,
        /// Number of classes.
        n_classes: usize,
    },
    /// Every sample is marked as excluded.
    #[error("every sample is excluded from training")]
    AllExcluded,
    /// The weak rule configuration is inconsistent.
    #[error("invalid weak rule configuration: {0}")]
    InvalidConfig(String),
    /// Every candidate of a round was degenerate.
    #[error("no candidate in round {round} produced a finite error")]
    NoViableCandidate {
        /// The failed round, starting at `1`.
        round: usize,
    },
    /// Reweighting produced a weight that is `NaN` or infinite.
    #[error("non-finite sample weight after round {round}")]
    NonFiniteWeight {
        /// The failed round, starting at `1`.
        round: usize,
    },
    /// An ensemble was combined with data of another class count.
    #[error("expected {expected} classes, got {got}")]
    ClassMismatch {
        /// Classes of the ensemble.
        expected: usize,
        /// Classes of the offending input.
        got: usize,
    },
    /// A persisted ensemble is inconsistent.
    #[error("invalid ensemble: {0}")]
    InvalidEnsemble(String),
    /// Reading or writing a file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// (De)serializing an ensemble failed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
