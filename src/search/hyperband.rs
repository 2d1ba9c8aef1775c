//! Hyperband

use rand::Rng;

use super::sha::run_schedule;
use super::{better, single_fold};
use crate::budget::{Budget, SchedulePolicy};
use crate::data::Fold;
use crate::error::{Error, Result};
use crate::eval::Estimator;
use crate::space::{Config, SearchSpace};

/// Hyperband: an outer loop of successive-halving brackets with varying
/// initial arm counts, hedging the exploration/exploitation trade-off of a
/// single halving run.
///
/// With `n = floor(log_rate(first budget resource)) + 1`, bracket `i` (from
/// `n` down to 1) samples `ceil(n * rate^(i-1) / i)` fresh configurations
/// and runs an `i`-round halving pass under the hyperband schedule policy.
/// The best final loss across brackets wins; the running best is replaced
/// only on strict improvement.
#[derive(Debug, Clone)]
pub struct Hyperband {
    rate: f64,
    maximize: bool,
}

impl Hyperband {
    pub fn new() -> Self {
        Self { rate: 3.0, maximize: true }
    }

    /// Reduction rate (must exceed 1; default 3).
    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }

    /// Set the optimization direction (default: maximize).
    pub fn with_maximize(mut self, maximize: bool) -> Self {
        self.maximize = maximize;
        self
    }

    /// Run all brackets over configurations sampled from `space`, which may
    /// be finite or infinite.
    pub fn search<'a, M, D, F, R, G>(
        &self,
        ctor: F,
        space: &SearchSpace,
        resampler: R,
        budget: &Budget,
        rng: &mut G,
    ) -> Result<Config>
    where
        M: Estimator<Data = D>,
        D: Sync + ?Sized + 'a,
        F: Fn(&Config) -> M + Sync,
        R: Iterator<Item = Fold<'a, D>>,
        G: Rng,
    {
        if self.rate <= 1.0 {
            return Err(Error::InvalidRate(self.rate));
        }
        if space.is_empty() {
            return Err(Error::EmptySpace);
        }
        let first = budget.first().ok_or(Error::EmptyBudget)?.1.as_f64();
        let fold: Fold<'a, D> = single_fold(resampler)?;

        let brackets = {
            let rounds = first.log(self.rate).floor();
            if rounds.is_sign_negative() {
                1
            } else {
                rounds as usize + 1
            }
        };

        let mut best: Option<(Config, f64)> = None;
        for i in (1..=brackets).rev() {
            let narms = (brackets as f64 * self.rate.powi(i as i32 - 1) / i as f64).ceil() as usize;
            let candidates = space.sample_n(rng, narms)?;
            let (config, loss) = run_schedule(
                &ctor,
                &candidates,
                &fold,
                budget,
                SchedulePolicy::Hyperband,
                self.rate,
                Some(i),
                self.maximize,
            )?;
            match &best {
                Some((_, best_loss)) if !better(self.maximize, loss, *best_loss) => {}
                _ => best = Some((config, loss)),
            }
        }

        best.map(|(config, _)| config).ok_or(Error::EmptySpace)
    }
}

impl Default for Hyperband {
    fn default() -> Self {
        Self::new()
    }
}
