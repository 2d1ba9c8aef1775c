//! Resampling strategies
//!
//! Each resampler partitions an indexable dataset into a finite sequence of
//! train/test [`Fold`]s. Resamplers are single-pass iterators: permutations
//! are drawn once at construction, `len()` reports the number of folds still
//! to come, and iteration terminates after exactly that many pairs.
//!
//! | Resampler | Folds | Train |
//! |-----------|-------|-------|
//! | [`FixedSplit`] | 1 | first `m` observations |
//! | [`RandomSplit`] | 1 | `m` shuffled observations |
//! | [`LeaveOneOut`] | n | all but one observation |
//! | [`KFold`] | k | permutation minus the fold |
//! | [`ForwardChaining`] | ~(n-init)/out | growing prefix |
//! | [`SlidingWindow`] | ~(n-window)/out | fixed moving window |

mod kfold;
mod split;
mod window;

#[cfg(test)]
mod tests;

pub use kfold::KFold;
pub use split::{FixedSplit, LeaveOneOut, RandomSplit};
pub use window::{ForwardChaining, SlidingWindow};

use crate::error::{Error, Result};

/// Resolve a split ratio into a train-set size, validated against `n`.
pub(crate) fn split_size(ratio: f64, n: usize) -> Result<usize> {
    let m = (ratio * n as f64).floor() as usize;
    check_split(m, n)?;
    Ok(m)
}

/// A train size must leave at least one observation on each side.
pub(crate) fn check_split(m: usize, n: usize) -> Result<usize> {
    if m < 1 || m >= n {
        return Err(Error::InvalidSplit { m, n });
    }
    Ok(m)
}
