//! Model selection algorithms
//!
//! Every algorithm drives the evaluation engine over folds from a resampler
//! and returns a single selected configuration:
//!
//! - [`validate`]: no search, one loss per fold;
//! - [`Brute`]: exhaustive evaluation of every candidate;
//! - [`HillClimb`]: local neighbor search over a finite grid;
//! - [`Sha`]: successive halving under a budget [`Schedule`](crate::Schedule);
//! - [`Hyperband`]: brackets of successive-halving runs with varying
//!   initial arm counts;
//! - [`Sasha`]: simulated-annealing successive halving.
//!
//! The elimination protocol is deterministic given a fixed budget, schedule
//! and random seed; none of the algorithms guarantee a globally optimal
//! configuration.

mod brute;
mod hill_climb;
mod hyperband;
mod sasha;
mod sha;

pub use brute::Brute;
pub use hill_climb::HillClimb;
pub use hyperband::Hyperband;
pub use sasha::Sasha;
pub use sha::Sha;

use std::cmp::Ordering;

use crate::budget::Resources;
use crate::data::Fold;
use crate::error::{Error, Result};
use crate::eval::Estimator;

/// Fit a copy of `model` on every fold's train view and score it on the
/// fold's test view. No search, no selection: one loss per fold, in fold
/// order.
pub fn validate<'a, M, D, R>(model: M, resampler: R, args: &Resources) -> Result<Vec<f64>>
where
    M: Estimator<Data = D> + Clone,
    D: ?Sized + 'a,
    R: Iterator<Item = Fold<'a, D>>,
{
    let mut losses = Vec::new();
    for fold in resampler {
        let fitted = model.clone().fit(&fold.train, args)?;
        losses.push(fitted.score(&fold.test)?);
    }
    if losses.is_empty() {
        return Err(Error::NoFolds);
    }
    Ok(losses)
}

/// Whether `a` strictly improves on `b` under the optimization direction.
pub(crate) fn better(maximize: bool, a: f64, b: f64) -> bool {
    if maximize {
        a > b
    } else {
        a < b
    }
}

/// Best-first ordering of losses under the optimization direction.
pub(crate) fn rank(maximize: bool, a: f64, b: f64) -> Ordering {
    let ord = if maximize { b.partial_cmp(&a) } else { a.partial_cmp(&b) };
    ord.unwrap_or(Ordering::Equal)
}

/// Index of the extreme loss under the optimization direction.
pub(crate) fn extreme_index(maximize: bool, losses: &[f64]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, &loss) in losses.iter().enumerate() {
        match best {
            Some(b) if !better(maximize, loss, losses[b]) => {}
            _ => best = Some(i),
        }
    }
    best
}

/// Consume a resampler that must produce exactly one train/test pair.
pub(crate) fn single_fold<'a, D, R>(resampler: R) -> Result<Fold<'a, D>>
where
    D: ?Sized,
    R: Iterator<Item = Fold<'a, D>>,
{
    let mut resampler = resampler;
    let first = resampler.next().ok_or(Error::SingleFoldRequired(0))?;
    let extra = resampler.count();
    if extra > 0 {
        return Err(Error::SingleFoldRequired(1 + extra));
    }
    Ok(first)
}
