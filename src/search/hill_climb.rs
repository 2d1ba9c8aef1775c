//! Hill-climbing over a finite grid

use std::collections::HashSet;

use rand::Rng;

use super::{better, extreme_index};
use crate::budget::Resources;
use crate::data::Fold;
use crate::error::{Error, Result};
use crate::eval::{fit_score, Estimator};
use crate::space::{Config, SearchSpace};

/// Local neighbor search over the index grid of a finite space.
///
/// Starts from `nstart` random grid points. Each round evaluates the
/// current frontier across all folds; if the extreme newly-evaluated
/// candidate does not strictly improve on the best so far, the search
/// terminates. Otherwise the frontier becomes the unvisited grid neighbors
/// of the new best, up to `k` steps away along each dimension.
#[derive(Debug, Clone)]
pub struct HillClimb {
    nstart: usize,
    k: usize,
    maximize: bool,
}

impl HillClimb {
    pub fn new() -> Self {
        Self { nstart: 1, k: 1, maximize: true }
    }

    /// Number of random starting points (at least 1).
    pub fn with_nstart(mut self, nstart: usize) -> Self {
        self.nstart = nstart.max(1);
        self
    }

    /// Neighborhood radius per dimension (at least 1).
    pub fn with_neighbors(mut self, k: usize) -> Self {
        self.k = k.max(1);
        self
    }

    /// Set the optimization direction (default: maximize).
    pub fn with_maximize(mut self, maximize: bool) -> Self {
        self.maximize = maximize;
        self
    }

    /// Run the search over a finite `space`, scoring candidates by mean
    /// loss across the resampler's folds.
    pub fn search<'a, M, D, F, R, G>(
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
        let dims = space.dim_lens()?;
        let size: usize = dims.iter().product();
        if size == 0 {
            return Err(Error::EmptySpace);
        }
        let folds: Vec<Fold<'a, D>> = resampler.collect();
        if folds.is_empty() {
            return Err(Error::NoFolds);
        }

        let mut visited: HashSet<usize> = HashSet::new();
        let mut frontier: Vec<usize> = Vec::new();
        while frontier.len() < self.nstart.min(size) {
            let index = rng.random_range(0..size);
            if visited.insert(index) {
                frontier.push(index);
            }
        }

        let mut best: Option<(usize, f64)> = None;
        while !frontier.is_empty() {
            let configs: Vec<Config> =
                frontier.iter().map(|&i| space.config_at(i)).collect::<Result<_>>()?;
            let mut totals = vec![0.0; configs.len()];
            for fold in &folds {
                let losses = fit_score(&ctor, &configs, fold, args)?;
                for (total, loss) in totals.iter_mut().zip(&losses) {
                    *total += loss;
                }
            }
            for total in &mut totals {
                *total /= folds.len() as f64;
            }

            let round_best = extreme_index(self.maximize, &totals).ok_or(Error::EmptySpace)?;
            let round_loss = totals[round_best];
            if let Some((_, best_loss)) = best {
                if !better(self.maximize, round_loss, best_loss) {
                    break;
                }
            }
            best = Some((frontier[round_best], round_loss));

            let coords = space.decode(frontier[round_best])?;
            frontier = self.neighbors(space, &coords, &dims, &mut visited)?;
        }

        let (index, _) = best.ok_or(Error::EmptySpace)?;
        space.config_at(index)
    }

    /// Unvisited grid points up to `k` steps away along one dimension.
    fn neighbors(
        &self,
        space: &SearchSpace,
        coords: &[usize],
        dims: &[usize],
        visited: &mut HashSet<usize>,
    ) -> Result<Vec<usize>> {
        let mut next = Vec::new();
        for (dim, &len) in dims.iter().enumerate() {
            for step in 1..=self.k {
                if coords[dim] >= step {
                    let mut c = coords.to_vec();
                    c[dim] -= step;
                    let index = space.encode(&c)?;
                    if visited.insert(index) {
                        next.push(index);
                    }
                }
                if coords[dim] + step < len {
                    let mut c = coords.to_vec();
                    c[dim] += step;
                    let index = space.encode(&c)?;
                    if visited.insert(index) {
                        next.push(index);
                    }
                }
            }
        }
        Ok(next)
    }
}

impl Default for HillClimb {
    fn default() -> Self {
        Self::new()
    }
}
