//! Simulated-annealing successive halving

use rand::Rng;

use super::{extreme_index, single_fold};
use crate::budget::Resources;
use crate::data::Fold;
use crate::error::{Error, Result};
use crate::eval::{refit_arms, Arm, Estimator};
use crate::space::{Config, SearchSpace};

/// SASHA: probabilistic elimination with an annealing acceptance rule
/// instead of a budget schedule.
///
/// Each round refits and scores every surviving arm with the same fixed
/// arguments, then keeps each arm independently with probability
/// `exp(n * (loss - best) / temp)` when maximizing (sign inverted when
/// minimizing), where `n` is the 1-based round counter. The probability is
/// deliberately not clipped: the round's best arm gets `exp(0) = 1` and is
/// always retained, so the loop shrinks toward a single survivor. Arms with
/// losses close to the best survive early rounds often and are culled more
/// aggressively as `n` grows.
#[derive(Debug, Clone)]
pub struct Sasha {
    temp: f64,
    maximize: bool,
    max_rounds: usize,
}

impl Sasha {
    /// `temp` is the annealing temperature (must be positive; validated at
    /// search time).
    pub fn new(temp: f64) -> Self {
        Self { temp, maximize: true, max_rounds: 1000 }
    }

    /// Set the optimization direction (default: maximize).
    pub fn with_maximize(mut self, maximize: bool) -> Self {
        self.maximize = maximize;
        self
    }

    /// Round cap before giving up (default 1000). Arms with identical
    /// losses all survive every round, so a cap is the only way out of a
    /// tied field.
    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds.max(1);
        self
    }

    /// Run the elimination over `candidates`, passing `args` to every fit.
    pub fn search<'a, M, D, F, R, G>(
        &self,
        ctor: F,
        candidates: &[Config],
        resampler: R,
        args: &Resources,
        rng: &mut G,
    ) -> Result<Config>
    where
        M: Estimator<Data = D>,
        D: Sync + ?Sized + 'a,
        F: Fn(&Config) -> M + Sync,
        R: Iterator<Item = Fold<'a, D>>,
        G: Rng,
    {
        if self.temp.is_nan() || self.temp <= 0.0 {
            return Err(Error::InvalidTemperature(self.temp));
        }
        if candidates.is_empty() {
            return Err(Error::EmptyCandidates);
        }
        let fold = single_fold(resampler)?;
        let mut arms = Arm::build(&ctor, candidates);

        let mut round = 1usize;
        while arms.len() > 1 {
            if round > self.max_rounds {
                return Err(Error::RoundLimit(self.max_rounds));
            }
            let scored = refit_arms(arms, &fold, args)?;
            let losses: Vec<f64> = scored.iter().map(|(_, loss)| *loss).collect();
            let best = extreme_index(self.maximize, &losses).ok_or(Error::EmptyCandidates)?;
            let best_loss = losses[best];

            let n = round as f64;
            arms = scored
                .into_iter()
                .filter_map(|(arm, loss)| {
                    let delta = if self.maximize { loss - best_loss } else { best_loss - loss };
                    let p = (n * delta / self.temp).exp();
                    (rng.random::<f64>() <= p).then_some(arm)
                })
                .collect();
            round += 1;
        }

        arms.into_iter()
            .next()
            .map(|arm| arm.config)
            .ok_or(Error::EmptyCandidates)
    }

    /// [`Sasha::search`] over every configuration of a finite space.
    pub fn search_space<'a, M, D, F, R, G>(
        &self,
        ctor: F,
        space: &SearchSpace,
        resampler: R,
        args: &Resources,
        rng: &mut G,
    ) -> Result<Config>
    where
        M: Estimator<Data = D>,
        D: Sync + ?Sized + 'a,
        F: Fn(&Config) -> M + Sync,
        R: Iterator<Item = Fold<'a, D>>,
        G: Rng,
    {
        self.search(ctor, &space.configs()?, resampler, args, rng)
    }
}
