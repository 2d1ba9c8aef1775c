//! Datasets, zero-copy subsets and train/test folds
//!
//! A [`Dataset`] is anything with a known observation count: a slice, a
//! vector, or a tuple of containers sharing the same count along the
//! observation axis. Resamplers never copy data; they hand out [`Subset`]
//! views (a borrow of the dataset plus an owned index vector) paired up as
//! [`Fold`]s.

use std::ops::Index;

use crate::error::{Error, Result};

/// An indexable collection of observations.
///
/// `nobs` is fallible because composite datasets (tuples of containers)
/// must agree on their observation count; a mismatch is a configuration
/// error surfaced at resampler construction.
pub trait Dataset {
    /// Number of observations.
    fn nobs(&self) -> Result<usize>;
}

impl<T> Dataset for [T] {
    fn nobs(&self) -> Result<usize> {
        Ok(self.len())
    }
}

impl<T> Dataset for Vec<T> {
    fn nobs(&self) -> Result<usize> {
        Ok(self.len())
    }
}

impl<D: Dataset + ?Sized> Dataset for &D {
    fn nobs(&self) -> Result<usize> {
        (**self).nobs()
    }
}

impl<A: Dataset, B: Dataset> Dataset for (A, B) {
    fn nobs(&self) -> Result<usize> {
        let a = self.0.nobs()?;
        let b = self.1.nobs()?;
        if a != b {
            return Err(Error::ObsMismatch { left: a, right: b });
        }
        Ok(a)
    }
}

impl<A: Dataset, B: Dataset, C: Dataset> Dataset for (A, B, C) {
    fn nobs(&self) -> Result<usize> {
        let a = self.0.nobs()?;
        let b = self.1.nobs()?;
        let c = self.2.nobs()?;
        if a != b {
            return Err(Error::ObsMismatch { left: a, right: b });
        }
        if a != c {
            return Err(Error::ObsMismatch { left: a, right: c });
        }
        Ok(a)
    }
}

/// A read-only view over a subset of a dataset's observations.
///
/// Holds a borrow of the underlying storage and the observation indices it
/// covers; the data itself is never duplicated.
#[derive(Debug, Clone)]
pub struct Subset<'a, D: ?Sized> {
    data: &'a D,
    indices: Vec<usize>,
}

impl<'a, D: ?Sized> Subset<'a, D> {
    /// Create a view over `data` covering `indices`.
    pub fn new(data: &'a D, indices: Vec<usize>) -> Self {
        Self { data, indices }
    }

    /// The underlying dataset.
    pub fn data(&self) -> &'a D {
        self.data
    }

    /// Observation indices covered by this view, in view order.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Number of observations in the view.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether the view is empty.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl<'a, D: Index<usize> + ?Sized> Subset<'a, D> {
    /// The `i`-th observation of the view.
    pub fn get(&self, i: usize) -> &'a D::Output {
        &self.data[self.indices[i]]
    }

    /// Iterate over the view's observations.
    pub fn iter(&self) -> impl Iterator<Item = &'a D::Output> + '_ {
        let data = self.data;
        self.indices.iter().map(move |&i| &data[i])
    }
}

/// One train/test partition produced by a resampler.
#[derive(Debug, Clone)]
pub struct Fold<'a, D: ?Sized> {
    /// Training view.
    pub train: Subset<'a, D>,
    /// Held-out test view.
    pub test: Subset<'a, D>,
}

impl<'a, D: ?Sized> Fold<'a, D> {
    pub(crate) fn new(data: &'a D, train: Vec<usize>, test: Vec<usize>) -> Self {
        Self { train: Subset::new(data, train), test: Subset::new(data, test) }
    }
}
