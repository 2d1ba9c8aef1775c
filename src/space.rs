//! Parameter values, domains and search spaces
//!
//! A [`SearchSpace`] is an ordered set of named value generators. Finite
//! domains (discrete ranges, categorical choices, explicit value lists) make
//! the space enumerable through mixed-radix flat indexing; a single infinite
//! domain (continuous or normal) makes the space sample-only.

use std::collections::{HashMap, HashSet};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Parameter value drawn from a domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParamValue {
    Float(f64),
    Int(i64),
    Str(String),
}

impl ParamValue {
    /// Get as float (converts int to float if needed)
    pub fn as_float(&self) -> Option<f64> {
        match self {
            ParamValue::Float(v) => Some(*v),
            ParamValue::Int(v) => Some(*v as f64),
            ParamValue::Str(_) => None,
        }
    }

    /// Get as int
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(v) => Some(*v),
            ParamValue::Float(v) => Some(*v as i64),
            ParamValue::Str(_) => None,
        }
    }

    /// Get as string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// A named configuration record drawn from a [`SearchSpace`].
pub type Config = HashMap<String, ParamValue>;

/// Value generator for a single parameter.
///
/// `Discrete`, `Categorical` and `Values` are finite (indexed access, known
/// length); `Continuous` and `Normal` are infinite (sample-only).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ParamDomain {
    /// Uniform over `[low, high]`, log-uniform when `log_scale` is set.
    Continuous { low: f64, high: f64, log_scale: bool },
    /// Gaussian with the given mean and standard deviation.
    Normal { mean: f64, std_dev: f64 },
    /// Integer range `[low, high]`.
    Discrete { low: i64, high: i64 },
    /// Categorical choices.
    Categorical { choices: Vec<String> },
    /// An explicit list of values.
    Values(Vec<ParamValue>),
}

impl ParamDomain {
    /// Number of values for finite domains, `None` for infinite ones.
    pub fn len(&self) -> Option<usize> {
        match self {
            ParamDomain::Continuous { .. } | ParamDomain::Normal { .. } => None,
            ParamDomain::Discrete { low, high } => {
                if high < low {
                    Some(0)
                } else {
                    Some((high.abs_diff(*low) as usize).saturating_add(1))
                }
            }
            ParamDomain::Categorical { choices } => Some(choices.len()),
            ParamDomain::Values(values) => Some(values.len()),
        }
    }

    /// Whether the domain is enumerable.
    pub fn is_finite(&self) -> bool {
        self.len().is_some()
    }

    /// Indexed access for finite domains.
    pub fn value_at(&self, i: usize) -> Option<ParamValue> {
        match self {
            ParamDomain::Continuous { .. } | ParamDomain::Normal { .. } => None,
            ParamDomain::Discrete { low, high } => {
                let v = low.checked_add(i as i64)?;
                (v <= *high).then_some(ParamValue::Int(v))
            }
            ParamDomain::Categorical { choices } => {
                choices.get(i).map(|c| ParamValue::Str(c.clone()))
            }
            ParamDomain::Values(values) => values.get(i).cloned(),
        }
    }

    /// Sample a random value from this domain.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> ParamValue {
        match self {
            ParamDomain::Continuous { low, high, log_scale } => {
                let value = if *log_scale {
                    let log_low = low.ln();
                    let log_high = high.ln();
                    (log_low + rng.random::<f64>() * (log_high - log_low)).exp()
                } else {
                    low + rng.random::<f64>() * (high - low)
                };
                ParamValue::Float(value)
            }
            ParamDomain::Normal { mean, std_dev } => {
                // Box-Muller transform on two uniform draws.
                let u1 = rng.random::<f64>().max(f64::MIN_POSITIVE);
                let u2 = rng.random::<f64>();
                let z = (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos();
                ParamValue::Float(mean + std_dev * z)
            }
            ParamDomain::Discrete { low, high } => {
                // An inverted range degenerates to its lower bound.
                if high < low {
                    return ParamValue::Int(*low);
                }
                let range = high.abs_diff(*low).saturating_add(1);
                let offset = (rng.random::<f64>() * range as f64).floor() as i64;
                ParamValue::Int((*low + offset).min(*high))
            }
            ParamDomain::Categorical { choices } => {
                let idx = (rng.random::<f64>() * choices.len() as f64).floor() as usize;
                ParamValue::Str(choices[idx.min(choices.len() - 1)].clone())
            }
            ParamDomain::Values(values) => {
                let idx = (rng.random::<f64>() * values.len() as f64).floor() as usize;
                values[idx.min(values.len() - 1)].clone()
            }
        }
    }
}

/// Ordered collection of named parameter domains.
///
/// Insertion order is the factor order used for flat indexing; the first
/// factor varies fastest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchSpace {
    params: Vec<(String, ParamDomain)>,
}

impl SearchSpace {
    /// Create an empty search space.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter, replacing any existing domain under the same name.
    pub fn add(&mut self, name: &str, domain: ParamDomain) {
        if let Some(entry) = self.params.iter_mut().find(|(n, _)| n == name) {
            entry.1 = domain;
        } else {
            self.params.push((name.to_string(), domain));
        }
    }

    /// Builder-style [`SearchSpace::add`].
    pub fn with(mut self, name: &str, domain: ParamDomain) -> Self {
        self.add(name, domain);
        self
    }

    /// Get a parameter domain by name.
    pub fn get(&self, name: &str) -> Option<&ParamDomain> {
        self.params.iter().find(|(n, _)| n == name).map(|(_, d)| d)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether the space has no parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterate over parameters in factor order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamDomain)> {
        self.params.iter().map(|(n, d)| (n.as_str(), d))
    }

    /// Total number of configurations, `None` when any factor is infinite.
    pub fn size(&self) -> Option<usize> {
        self.params.iter().try_fold(1usize, |acc, (_, d)| Some(acc * d.len()?))
    }

    /// Whether every factor is enumerable.
    pub fn is_finite(&self) -> bool {
        self.size().is_some()
    }

    /// Factor lengths in order; fails on infinite or empty spaces.
    pub(crate) fn dim_lens(&self) -> Result<Vec<usize>> {
        if self.params.is_empty() {
            return Err(Error::EmptySpace);
        }
        self.params
            .iter()
            .map(|(_, d)| d.len().ok_or(Error::InfiniteSpace))
            .collect()
    }

    /// Decode a flat index into per-dimension coordinates (first factor
    /// varies fastest).
    pub fn decode(&self, index: usize) -> Result<Vec<usize>> {
        let dims = self.dim_lens()?;
        let size: usize = dims.iter().product();
        if index >= size {
            return Err(Error::IndexOutOfBounds { index, size });
        }
        let mut rest = index;
        Ok(dims
            .iter()
            .map(|&len| {
                let coord = rest % len;
                rest /= len;
                coord
            })
            .collect())
    }

    /// Encode per-dimension coordinates back into a flat index.
    pub fn encode(&self, coords: &[usize]) -> Result<usize> {
        let dims = self.dim_lens()?;
        let size: usize = dims.iter().product();
        if coords.len() != dims.len() {
            return Err(Error::IndexOutOfBounds { index: coords.len(), size });
        }
        let mut index = 0usize;
        let mut stride = 1usize;
        for (&coord, &len) in coords.iter().zip(&dims) {
            if coord >= len {
                return Err(Error::IndexOutOfBounds { index: coord, size });
            }
            index += coord * stride;
            stride *= len;
        }
        Ok(index)
    }

    /// The configuration at per-dimension coordinates.
    pub(crate) fn config_from_coords(&self, coords: &[usize]) -> Config {
        self.params
            .iter()
            .zip(coords)
            .filter_map(|((name, domain), &c)| {
                domain.value_at(c).map(|v| (name.clone(), v))
            })
            .collect()
    }

    /// The configuration at a flat index of a finite space.
    pub fn config_at(&self, index: usize) -> Result<Config> {
        let coords = self.decode(index)?;
        Ok(self.config_from_coords(&coords))
    }

    /// Materialize every configuration of a finite space, in index order.
    pub fn configs(&self) -> Result<Vec<Config>> {
        let dims = self.dim_lens()?;
        let size: usize = dims.iter().product();
        (0..size).map(|i| self.config_at(i)).collect()
    }

    /// Draw one configuration.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Config {
        self.params
            .iter()
            .map(|(name, domain)| (name.clone(), domain.sample(rng)))
            .collect()
    }

    /// Draw `n` configurations: distinct (by rejection over flat indices)
    /// when the space is finite, independent when it is infinite.
    pub fn sample_n<R: Rng>(&self, rng: &mut R, n: usize) -> Result<Vec<Config>> {
        match self.size() {
            Some(size) => {
                if n > size {
                    return Err(Error::SpaceExhausted { requested: n, size });
                }
                let mut drawn = HashSet::with_capacity(n);
                let mut configs = Vec::with_capacity(n);
                while configs.len() < n {
                    let index = rng.random_range(0..size);
                    if drawn.insert(index) {
                        configs.push(self.config_at(index)?);
                    }
                }
                Ok(configs)
            }
            None => Ok((0..n).map(|_| self.sample(rng)).collect()),
        }
    }
}
