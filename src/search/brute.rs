//! Exhaustive search

use super::extreme_index;
use crate::budget::Resources;
use crate::data::Fold;
use crate::error::{Error, Result};
use crate::eval::{fit_score, Estimator};
use crate::space::{Config, SearchSpace};

/// Brute-force search: evaluate every candidate against every fold and
/// select the configuration with the extreme mean loss.
#[derive(Debug, Clone)]
pub struct Brute {
    maximize: bool,
}

impl Brute {
    pub fn new() -> Self {
        Self { maximize: true }
    }

    /// Set the optimization direction (default: maximize).
    pub fn with_maximize(mut self, maximize: bool) -> Self {
        self.maximize = maximize;
        self
    }

    /// Evaluate `candidates` on every fold of `resampler` and return the
    /// best configuration by mean loss.
    pub fn search<'a, M, D, F, R>(
        &self,
        ctor: F,
        candidates: &[Config],
        resampler: R,
        args: &Resources,
    ) -> Result<Config>
    where
        M: Estimator<Data = D>,
        D: Sync + ?Sized + 'a,
        F: Fn(&Config) -> M + Sync,
        R: Iterator<Item = Fold<'a, D>>,
    {
        if candidates.is_empty() {
            return Err(Error::EmptyCandidates);
        }
        let mut totals = vec![0.0; candidates.len()];
        let mut nfolds = 0usize;
        for fold in resampler {
            let losses = fit_score(&ctor, candidates, &fold, args)?;
            for (total, loss) in totals.iter_mut().zip(&losses) {
                *total += loss;
            }
            nfolds += 1;
        }
        if nfolds == 0 {
            return Err(Error::NoFolds);
        }
        for total in &mut totals {
            *total /= nfolds as f64;
        }
        let best = extreme_index(self.maximize, &totals).ok_or(Error::EmptyCandidates)?;
        Ok(candidates[best].clone())
    }

    /// [`Brute::search`] over every configuration of a finite space.
    pub fn search_space<'a, M, D, F, R>(
        &self,
        ctor: F,
        space: &SearchSpace,
        resampler: R,
        args: &Resources,
    ) -> Result<Config>
    where
        M: Estimator<Data = D>,
        D: Sync + ?Sized + 'a,
        F: Fn(&Config) -> M + Sync,
        R: Iterator<Item = Fold<'a, D>>,
    {
        self.search(ctor, &space.configs()?, resampler, args)
    }
}

impl Default for Brute {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_model::{observations, quadratic, xconfig, xof, xspace};
    use super::*;
    use crate::resample::{FixedSplit, KFold};

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_brute_selects_extreme_mean() {
        let data = observations(20);
        let candidates: Vec<Config> = (0..=10).map(xconfig).collect();
        let resampler = FixedSplit::new(&data, 0.5).unwrap();
        let best = Brute::new()
            .search(quadratic, &candidates, resampler, &Resources::new())
            .unwrap();
        assert_eq!(xof(&best), 3);
    }

    #[test]
    fn test_brute_minimize() {
        // Minimizing -(x-3)^2 prefers the grid point farthest from 3.
        let data = observations(20);
        let candidates: Vec<Config> = (0..=10).map(xconfig).collect();
        let resampler = FixedSplit::new(&data, 0.5).unwrap();
        let best = Brute::new()
            .with_maximize(false)
            .search(quadratic, &candidates, resampler, &Resources::new())
            .unwrap();
        assert_eq!(xof(&best), 10);
    }

    #[test]
    fn test_brute_across_folds() {
        let data = observations(30);
        let mut rng = StdRng::seed_from_u64(9);
        let resampler = KFold::new(&data, 5, &mut rng).unwrap();
        let candidates: Vec<Config> = (1..=5).map(xconfig).collect();
        let best = Brute::new()
            .search(quadratic, &candidates, resampler, &Resources::new())
            .unwrap();
        assert_eq!(xof(&best), 3);
    }

    #[test]
    fn test_brute_over_finite_space() {
        let data = observations(10);
        let resampler = FixedSplit::new(&data, 0.5).unwrap();
        let best = Brute::new()
            .search_space(quadratic, &xspace(0, 8), resampler, &Resources::new())
            .unwrap();
        assert_eq!(xof(&best), 3);
    }

    #[test]
    fn test_brute_empty_candidates() {
        let data = observations(10);
        let resampler = FixedSplit::new(&data, 0.5).unwrap();
        let err = Brute::new()
            .search(quadratic, &[], resampler, &Resources::new())
            .unwrap_err();
        assert!(matches!(err, Error::EmptyCandidates));
    }
}
