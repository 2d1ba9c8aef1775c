//! Successive halving

use super::{rank, single_fold};
use crate::budget::{Budget, Schedule, SchedulePolicy};
use crate::data::Fold;
use crate::error::{Error, Result};
use crate::eval::{refit_arms, Arm, Estimator};
use crate::space::{Config, SearchSpace};

/// Successive halving: round-robin elimination of candidate arms under a
/// budget schedule.
///
/// Requires a resampler yielding exactly one train/test pair. Each round
/// refits every surviving arm with the round's resource grant, scores it,
/// ranks the arms, and keeps the top `arms_to_retain` from the schedule.
/// The configuration of the final survivor is returned.
#[derive(Debug, Clone)]
pub struct Sha {
    policy: SchedulePolicy,
    rate: f64,
    nrounds: Option<usize>,
    maximize: bool,
}

impl Sha {
    pub fn new(policy: SchedulePolicy) -> Self {
        Self { policy, rate: 2.0, nrounds: None, maximize: true }
    }

    /// Reduction rate (must exceed 1; validated when the schedule is built).
    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }

    /// Explicit round count instead of the policy default.
    pub fn with_rounds(mut self, nrounds: usize) -> Self {
        self.nrounds = Some(nrounds);
        self
    }

    /// Set the optimization direction (default: maximize).
    pub fn with_maximize(mut self, maximize: bool) -> Self {
        self.maximize = maximize;
        self
    }

    /// Run the elimination over `candidates`, spending `budget` per the
    /// configured schedule policy.
    pub fn search<'a, M, D, F, R>(
        &self,
        ctor: F,
        candidates: &[Config],
        resampler: R,
        budget: &Budget,
    ) -> Result<Config>
    where
        M: Estimator<Data = D>,
        D: Sync + ?Sized + 'a,
        F: Fn(&Config) -> M + Sync,
        R: Iterator<Item = Fold<'a, D>>,
    {
        let fold = single_fold(resampler)?;
        let (config, _) = run_schedule(
            &ctor,
            candidates,
            &fold,
            budget,
            self.policy,
            self.rate,
            self.nrounds,
            self.maximize,
        )?;
        Ok(config)
    }

    /// [`Sha::search`] over every configuration of a finite space.
    pub fn search_space<'a, M, D, F, R>(
        &self,
        ctor: F,
        space: &SearchSpace,
        resampler: R,
        budget: &Budget,
    ) -> Result<Config>
    where
        M: Estimator<Data = D>,
        D: Sync + ?Sized + 'a,
        F: Fn(&Config) -> M + Sync,
        R: Iterator<Item = Fold<'a, D>>,
    {
        self.search(ctor, &space.configs()?, resampler, budget)
    }
}

/// One full successive-halving pass over a single fold; returns the final
/// survivor's configuration and its last observed loss. Shared with
/// hyperband's brackets.
#[allow(clippy::too_many_arguments)]
pub(crate) fn run_schedule<M, D, F>(
    ctor: &F,
    candidates: &[Config],
    fold: &Fold<'_, D>,
    budget: &Budget,
    policy: SchedulePolicy,
    rate: f64,
    nrounds: Option<usize>,
    maximize: bool,
) -> Result<(Config, f64)>
where
    M: Estimator<Data = D>,
    D: Sync + ?Sized,
    F: Fn(&Config) -> M + Sync,
{
    if candidates.is_empty() {
        return Err(Error::EmptyCandidates);
    }
    let schedule = Schedule::new(policy, budget, candidates.len(), rate, nrounds)?;
    let mut arms = Arm::build(ctor, candidates);
    let mut selected: Option<(Config, f64)> = None;

    for round in schedule.rounds() {
        let mut scored = refit_arms(arms, fold, &round.resources)?;
        scored.sort_by(|a, b| rank(maximize, a.1, b.1));
        scored.truncate(round.narms.max(1));
        let (leader, loss) = &scored[0];
        selected = Some((leader.config.clone(), *loss));
        arms = scored.into_iter().map(|(arm, _)| arm).collect();
    }

    selected.ok_or(Error::EmptyCandidates)
}
