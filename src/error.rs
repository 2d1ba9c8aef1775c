//! Error types for validation and search

use thiserror::Error;

/// Errors raised by resamplers, spaces, schedules and search algorithms.
#[derive(Debug, Error)]
pub enum Error {
    #[error("train size {m} out of range for {n} observations")]
    InvalidSplit { m: usize, n: usize },

    #[error("fold count {k} out of range for {n} observations")]
    InvalidFolds { k: usize, n: usize },

    #[error("window sizes (train {train}, out {out}) do not fit {n} observations")]
    InvalidWindow { train: usize, out: usize, n: usize },

    #[error("observation counts differ across dataset components: {left} vs {right}")]
    ObsMismatch { left: usize, right: usize },

    #[error("empty candidate list")]
    EmptyCandidates,

    #[error("search space has no parameters")]
    EmptySpace,

    #[error("operation requires a finite search space")]
    InfiniteSpace,

    #[error("configuration index {index} out of bounds for space of size {size}")]
    IndexOutOfBounds { index: usize, size: usize },

    #[error("cannot draw {requested} distinct configurations from a space of size {size}")]
    SpaceExhausted { requested: usize, size: usize },

    #[error("reduction rate must exceed 1, got {0}")]
    InvalidRate(f64),

    #[error("temperature must be positive, got {0}")]
    InvalidTemperature(f64),

    #[error("budget has no resources")]
    EmptyBudget,

    #[error("expected exactly one train/test pair, got {0}")]
    SingleFoldRequired(usize),

    #[error("resampler produced no folds")]
    NoFolds,

    #[error("no single survivor after {0} rounds")]
    RoundLimit(usize),

    #[error("model error: {0}")]
    Model(String),
}

impl Error {
    /// Wrap an arbitrary model failure propagated out of `fit` or `score`.
    pub fn model(err: impl std::fmt::Display) -> Self {
        Error::Model(err.to_string())
    }
}

/// Result type for validation and search operations.
pub type Result<T> = std::result::Result<T, Error>;
