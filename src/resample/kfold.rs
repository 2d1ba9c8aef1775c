//! K-fold cross-validation

use rand::seq::SliceRandom;
use rand::Rng;

use crate::data::{Dataset, Fold};
use crate::error::{Error, Result};

/// `k` folds over a single random permutation drawn at construction.
///
/// The first `n mod k` folds hold one extra observation so that the folds
/// partition all `n` indices exactly once. `KFold` with `k = n` behaves as
/// leave-one-out over the permutation.
#[derive(Debug, Clone)]
pub struct KFold<'a, D: ?Sized> {
    data: &'a D,
    perm: Vec<usize>,
    k: usize,
    next: usize,
}

impl<'a, D: Dataset + ?Sized> KFold<'a, D> {
    pub fn new<R: Rng>(data: &'a D, k: usize, rng: &mut R) -> Result<Self> {
        let n = data.nobs()?;
        if k < 2 || k > n {
            return Err(Error::InvalidFolds { k, n });
        }
        let mut perm: Vec<usize> = (0..n).collect();
        perm.shuffle(rng);
        Ok(Self { data, perm, k, next: 0 })
    }
}

impl<'a, D: ?Sized> KFold<'a, D> {
    /// Start and end of fold `i` within the permutation.
    fn bounds(&self, i: usize) -> (usize, usize) {
        let n = self.perm.len();
        let base = n / self.k;
        let extra = n % self.k;
        let start = i * base + i.min(extra);
        let size = base + usize::from(i < extra);
        (start, start + size)
    }
}

impl<'a, D: ?Sized> Iterator for KFold<'a, D> {
    type Item = Fold<'a, D>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.k {
            return None;
        }
        let (start, end) = self.bounds(self.next);
        self.next += 1;
        let test = self.perm[start..end].to_vec();
        let mut train = Vec::with_capacity(self.perm.len() - test.len());
        train.extend_from_slice(&self.perm[..start]);
        train.extend_from_slice(&self.perm[end..]);
        Some(Fold::new(self.data, train, test))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.k - self.next;
        (left, Some(left))
    }
}

impl<'a, D: ?Sized> ExactSizeIterator for KFold<'a, D> {}
