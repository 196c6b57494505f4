//! This file defines some functions that checks some pre-conditions
//! E.g., Shape of data, positivity of the training parameters.

use crate::error::{BoostError, Result};


/// Check whether the number of classes is valid or not.
#[inline(always)]
pub(crate) fn n_classes(n_classes: usize) -> Result<()> {
    if n_classes == 0 {
        return Err(BoostError::NoClasses);
    }
    Ok(())
}


/// Check whether the number of boosting rounds is valid or not.
#[inline(always)]
pub(crate) fn n_rounds(n_rounds: usize) -> Result<()> {
    if n_rounds == 0 {
        return Err(BoostError::NoRounds);
    }
    Ok(())
}


/// Check the parameters of the best-of-N search.
#[inline(always)]
pub(crate) fn search_parameters(n_candidates: usize, n_thresholds: usize)
    -> Result<()>
{
    if n_candidates == 0 {
        return Err(BoostError::NoCandidates);
    }
    if n_thresholds == 0 {
        return Err(BoostError::NoThresholds);
    }
    Ok(())
}


/// Check whether the training sample is valid or not.
#[inline(always)]
pub(crate) fn sample(n_data: usize, n_labels: usize) -> Result<()> {
    if n_data != n_labels {
        return Err(BoostError::LengthMismatch { n_data, n_labels });
    }

    // Since the previous check guarantees `n_data == n_labels`,
    // we only need to check `n_data`.
    if n_data == 0 {
        return Err(BoostError::EmptySample);
    }
    Ok(())
}


/// Check the channel ranges of a weak rule configuration.
#[inline(always)]
pub(crate) fn channel_ranges(ranges: &[std::ops::Range<usize>]) -> Result<()> {
    if ranges.is_empty() {
        let message = "at least one channel range is required";
        return Err(BoostError::InvalidConfig(message.into()));
    }

    if let Some(range) = ranges.iter().find(|r| r.is_empty()) {
        let message = format!("channel range {range:?} is empty");
        return Err(BoostError::InvalidConfig(message));
    }
    Ok(())
}
