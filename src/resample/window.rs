//! Ordered resamplers for time-series style validation

use crate::data::{Dataset, Fold};
use crate::error::{Error, Result};

fn window_folds(n: usize, train: usize, out: usize, partial: bool) -> Result<usize> {
    if train < 1 || out < 1 || train >= n {
        return Err(Error::InvalidWindow { train, out, n });
    }
    let rest = n - train;
    Ok(if partial { rest.div_ceil(out) } else { rest / out })
}

/// Trains on a growing prefix and tests on the following `out` observations.
///
/// Fold `i` (0-based) trains on the first `init + i * out` observations and
/// tests on the next `out`. With partial folds enabled (the default) the
/// final test window may be shorter than `out`.
#[derive(Debug, Clone)]
pub struct ForwardChaining<'a, D: ?Sized> {
    data: &'a D,
    n: usize,
    init: usize,
    out: usize,
    folds: usize,
    next: usize,
}

impl<'a, D: Dataset + ?Sized> ForwardChaining<'a, D> {
    pub fn new(data: &'a D, init: usize, out: usize) -> Result<Self> {
        Self::build(data, init, out, true)
    }

    /// Like [`ForwardChaining::new`], but drops a final window shorter than
    /// `out`.
    pub fn without_partial(data: &'a D, init: usize, out: usize) -> Result<Self> {
        Self::build(data, init, out, false)
    }

    fn build(data: &'a D, init: usize, out: usize, partial: bool) -> Result<Self> {
        let n = data.nobs()?;
        let folds = window_folds(n, init, out, partial)?;
        Ok(Self { data, n, init, out, folds, next: 0 })
    }
}

impl<'a, D: ?Sized> Iterator for ForwardChaining<'a, D> {
    type Item = Fold<'a, D>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.folds {
            return None;
        }
        let split = self.init + self.next * self.out;
        self.next += 1;
        let end = (split + self.out).min(self.n);
        Some(Fold::new(self.data, (0..split).collect(), (split..end).collect()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.folds - self.next;
        (left, Some(left))
    }
}

impl<'a, D: ?Sized> ExactSizeIterator for ForwardChaining<'a, D> {}

/// Like [`ForwardChaining`], but trains on a fixed-size moving window
/// instead of a growing prefix.
#[derive(Debug, Clone)]
pub struct SlidingWindow<'a, D: ?Sized> {
    data: &'a D,
    n: usize,
    window: usize,
    out: usize,
    folds: usize,
    next: usize,
}

impl<'a, D: Dataset + ?Sized> SlidingWindow<'a, D> {
    pub fn new(data: &'a D, window: usize, out: usize) -> Result<Self> {
        Self::build(data, window, out, true)
    }

    /// Like [`SlidingWindow::new`], but drops a final window shorter than
    /// `out`.
    pub fn without_partial(data: &'a D, window: usize, out: usize) -> Result<Self> {
        Self::build(data, window, out, false)
    }

    fn build(data: &'a D, window: usize, out: usize, partial: bool) -> Result<Self> {
        let n = data.nobs()?;
        let folds = window_folds(n, window, out, partial)?;
        Ok(Self { data, n, window, out, folds, next: 0 })
    }
}

impl<'a, D: ?Sized> Iterator for SlidingWindow<'a, D> {
    type Item = Fold<'a, D>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.folds {
            return None;
        }
        let start = self.next * self.out;
        let split = start + self.window;
        self.next += 1;
        let end = (split + self.out).min(self.n);
        Some(Fold::new(self.data, (start..split).collect(), (split..end).collect()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.folds - self.next;
        (left, Some(left))
    }
}

impl<'a, D: ?Sized> ExactSizeIterator for SlidingWindow<'a, D> {}
