//! Trial evaluation engine
//!
//! The only unit of parallelism in this crate: fit one model per candidate
//! configuration against a fixed train/test pair and score it. Trials are
//! mutually independent, share their train/test views read-only, and are
//! fanned out over the rayon pool; the returned losses line up with the
//! input configuration order.

use rayon::prelude::*;

use crate::budget::Resources;
use crate::data::{Fold, Subset};
use crate::error::Result;
use crate::space::Config;

/// The external model contract.
///
/// `fit` consumes the model and returns the trained instance, so repeated
/// fits of a surviving arm (warm starts under a schedule) are explicit.
/// Errors from the underlying training or scoring procedure propagate
/// unchanged; there is no retry.
pub trait Estimator: Sized + Send {
    /// The dataset type this model trains on.
    type Data: ?Sized;

    /// Train on the given view with named numeric fit arguments.
    fn fit(self, train: &Subset<'_, Self::Data>, args: &Resources) -> Result<Self>;

    /// Loss of the fitted model on a held-out view.
    fn score(&self, test: &Subset<'_, Self::Data>) -> Result<f64>;
}

/// Fit and score one fresh model per configuration against a single fold.
///
/// Losses are returned in input order. Any failing fit or score aborts the
/// whole evaluation.
pub fn fit_score<M, D, F>(
    ctor: F,
    candidates: &[Config],
    fold: &Fold<'_, D>,
    args: &Resources,
) -> Result<Vec<f64>>
where
    M: Estimator<Data = D>,
    D: Sync + ?Sized,
    F: Fn(&Config) -> M + Sync,
{
    candidates
        .par_iter()
        .map(|config| {
            let model = ctor(config).fit(&fold.train, args)?;
            model.score(&fold.test)
        })
        .collect()
}

/// A candidate configuration and its in-progress model, tracked across
/// elimination rounds.
pub(crate) struct Arm<M> {
    pub config: Config,
    pub model: M,
}

impl<M> Arm<M> {
    pub(crate) fn build<F>(ctor: &F, candidates: &[Config]) -> Vec<Arm<M>>
    where
        F: Fn(&Config) -> M,
    {
        candidates
            .iter()
            .map(|config| Arm { config: config.clone(), model: ctor(config) })
            .collect()
    }
}

/// Refit every surviving arm with this round's resources and score it.
///
/// Models carry over between rounds; the returned pairs keep input order.
pub(crate) fn refit_arms<M, D>(
    arms: Vec<Arm<M>>,
    fold: &Fold<'_, D>,
    args: &Resources,
) -> Result<Vec<(Arm<M>, f64)>>
where
    M: Estimator<Data = D>,
    D: Sync + ?Sized,
{
    arms.into_par_iter()
        .map(|arm| {
            let model = arm.model.fit(&fold.train, args)?;
            let loss = model.score(&fold.test)?;
            Ok((Arm { config: arm.config, model }, loss))
        })
        .collect()
}
