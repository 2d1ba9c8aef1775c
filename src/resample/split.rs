//! Single-split and leave-one-out resamplers

use rand::seq::SliceRandom;
use rand::Rng;

use super::{check_split, split_size};
use crate::data::{Dataset, Fold};
use crate::error::Result;

/// One train/test pair: train on the first `m` observations, test on the
/// remainder.
#[derive(Debug, Clone)]
pub struct FixedSplit<'a, D: ?Sized> {
    data: &'a D,
    m: usize,
    n: usize,
    done: bool,
}

impl<'a, D: Dataset + ?Sized> FixedSplit<'a, D> {
    /// Split at `floor(ratio * n)` observations.
    pub fn new(data: &'a D, ratio: f64) -> Result<Self> {
        let n = data.nobs()?;
        let m = split_size(ratio, n)?;
        Ok(Self { data, m, n, done: false })
    }

    /// Split at an explicit train-set size `m` in `[1, n)`.
    pub fn with_size(data: &'a D, m: usize) -> Result<Self> {
        let n = data.nobs()?;
        check_split(m, n)?;
        Ok(Self { data, m, n, done: false })
    }
}

impl<'a, D: ?Sized> Iterator for FixedSplit<'a, D> {
    type Item = Fold<'a, D>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        self.done = true;
        Some(Fold::new(self.data, (0..self.m).collect(), (self.m..self.n).collect()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = usize::from(!self.done);
        (left, Some(left))
    }
}

impl<'a, D: ?Sized> ExactSizeIterator for FixedSplit<'a, D> {}

/// One train/test pair over a single random permutation of the indices.
#[derive(Debug, Clone)]
pub struct RandomSplit<'a, D: ?Sized> {
    data: &'a D,
    perm: Vec<usize>,
    m: usize,
    done: bool,
}

impl<'a, D: Dataset + ?Sized> RandomSplit<'a, D> {
    /// Split a shuffled index permutation at `floor(ratio * n)`.
    pub fn new<R: Rng>(data: &'a D, ratio: f64, rng: &mut R) -> Result<Self> {
        let n = data.nobs()?;
        let m = split_size(ratio, n)?;
        let mut perm: Vec<usize> = (0..n).collect();
        perm.shuffle(rng);
        Ok(Self { data, perm, m, done: false })
    }
}

impl<'a, D: ?Sized> Iterator for RandomSplit<'a, D> {
    type Item = Fold<'a, D>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        self.done = true;
        let train = self.perm[..self.m].to_vec();
        let test = self.perm[self.m..].to_vec();
        Some(Fold::new(self.data, train, test))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = usize::from(!self.done);
        (left, Some(left))
    }
}

impl<'a, D: ?Sized> ExactSizeIterator for RandomSplit<'a, D> {}

/// `n` folds; fold `i` holds out observation `i` as the test set.
#[derive(Debug, Clone)]
pub struct LeaveOneOut<'a, D: ?Sized> {
    data: &'a D,
    n: usize,
    next: usize,
}

impl<'a, D: Dataset + ?Sized> LeaveOneOut<'a, D> {
    pub fn new(data: &'a D) -> Result<Self> {
        let n = data.nobs()?;
        check_split(n.saturating_sub(1), n)?;
        Ok(Self { data, n, next: 0 })
    }
}

impl<'a, D: ?Sized> Iterator for LeaveOneOut<'a, D> {
    type Item = Fold<'a, D>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.n {
            return None;
        }
        let i = self.next;
        self.next += 1;
        let train: Vec<usize> = (0..self.n).filter(|&j| j != i).collect();
        Some(Fold::new(self.data, train, vec![i]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.n - self.next;
        (left, Some(left))
    }
}

impl<'a, D: ?Sized> ExactSizeIterator for LeaveOneOut<'a, D> {}
