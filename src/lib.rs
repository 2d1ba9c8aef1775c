//! Resampling-based model validation and budgeted hyperparameter search.
//!
//! `validar` orchestrates train/evaluate trials for an external model type;
//! it implements no models of its own. The pieces:
//!
//! - Resamplers partition a dataset into zero-copy train/test folds
//!   (fixed/random split, leave-one-out, k-fold, forward-chaining, sliding
//!   window)
//! - Parameter spaces describe finite grids or continuous samplers and
//!   produce candidate configurations
//! - Budget schedules apportion a training resource across elimination
//!   rounds (geometric, constant, hyperband)
//! - Search algorithms select a configuration: brute force, hill-climbing,
//!   successive halving, hyperband and SASHA
//!
//! The model contract is two operations, [`Estimator::fit`] and
//! [`Estimator::score`]; trials are fanned out in parallel per candidate.
//!
//! # Example
//!
//! ```
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use validar::{validate, Estimator, KFold, Resources, Result, Subset};
//!
//! #[derive(Clone)]
//! struct Mean {
//!     estimate: f64,
//! }
//!
//! impl Estimator for Mean {
//!     type Data = Vec<f64>;
//!
//!     fn fit(mut self, train: &Subset<'_, Vec<f64>>, _args: &Resources) -> Result<Self> {
//!         self.estimate = train.iter().sum::<f64>() / train.len() as f64;
//!         Ok(self)
//!     }
//!
//!     fn score(&self, test: &Subset<'_, Vec<f64>>) -> Result<f64> {
//!         let mean: f64 = test.iter().sum::<f64>() / test.len() as f64;
//!         Ok((self.estimate - mean).powi(2))
//!     }
//! }
//!
//! # fn main() -> validar::Result<()> {
//! let data: Vec<f64> = (0..100).map(f64::from).collect();
//! let mut rng = StdRng::seed_from_u64(42);
//! let folds = KFold::new(&data, 10, &mut rng)?;
//! let losses = validate(Mean { estimate: 0.0 }, folds, &Resources::new())?;
//! assert_eq!(losses.len(), 10);
//! # Ok(())
//! # }
//! ```

pub mod budget;
pub mod data;
pub mod error;
pub mod eval;
pub mod resample;
pub mod search;
pub mod space;

pub use budget::{Budget, Resource, Resources, Round, Schedule, SchedulePolicy};
pub use data::{Dataset, Fold, Subset};
pub use error::{Error, Result};
pub use eval::{fit_score, Estimator};
pub use resample::{FixedSplit, ForwardChaining, KFold, LeaveOneOut, RandomSplit, SlidingWindow};
pub use search::{validate, Brute, HillClimb, Hyperband, Sasha, Sha};
pub use space::{Config, ParamDomain, ParamValue, SearchSpace};
