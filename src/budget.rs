//! Training budgets and elimination schedules
//!
//! A [`Budget`] is an immutable named record of numeric resources (epochs,
//! iterations, ...). A [`Schedule`] apportions a budget over elimination
//! rounds: each [`Round`] names how many arms survive it and how much of
//! each resource every active arm receives.
//!
//! The resource casting rule is load-bearing for reproducibility: integral
//! resources round the scaled value down under the geometric and constant
//! policies and to nearest under the hyperband policy; floating resources
//! scale directly.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single numeric resource amount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Resource {
    Int(u64),
    Float(f64),
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Rounding {
    Down,
    Nearest,
}

impl Resource {
    /// The amount as a float.
    pub fn as_f64(&self) -> f64 {
        match self {
            Resource::Int(v) => *v as f64,
            Resource::Float(v) => *v,
        }
    }

    fn scaled(&self, factor: f64, rounding: Rounding) -> Resource {
        match self {
            Resource::Int(v) => {
                let scaled = *v as f64 * factor;
                let scaled = match rounding {
                    Rounding::Down => scaled.floor(),
                    Rounding::Nearest => scaled.round(),
                };
                Resource::Int(scaled.max(0.0) as u64)
            }
            Resource::Float(v) => Resource::Float(v * factor),
        }
    }
}

/// Named per-fit resource arguments, as handed to [`Estimator::fit`].
///
/// [`Estimator::fit`]: crate::eval::Estimator::fit
pub type Resources = HashMap<String, Resource>;

/// An immutable ordered record of named resources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    entries: Vec<(String, Resource)>,
}

impl Budget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a named resource.
    pub fn with(mut self, name: &str, amount: Resource) -> Self {
        self.entries.push((name.to_string(), amount));
        self
    }

    /// Number of resources.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the budget holds no resources.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over resources in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Resource)> {
        self.entries.iter().map(|(n, r)| (n.as_str(), r))
    }

    /// The first declared resource, which drives hyperband's default round
    /// count.
    pub fn first(&self) -> Option<(&str, &Resource)> {
        self.entries.first().map(|(n, r)| (n.as_str(), r))
    }

    fn scaled(&self, factor: f64, rounding: Rounding) -> Resources {
        self.entries
            .iter()
            .map(|(name, amount)| (name.clone(), amount.scaled(factor, rounding)))
            .collect()
    }
}

/// Budget allocation policy discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchedulePolicy {
    /// Equal budget share per round, split over the round's active arms.
    Geometric,
    /// A single normalization constant applied uniformly to every round.
    Constant,
    /// Per-arm resource grows as `budget / rate^(nrounds - i)`; used by
    /// hyperband's successive-halving sub-calls.
    Hyperband,
}

/// One elimination round: how many arms survive and what each active arm
/// may spend.
#[derive(Debug, Clone)]
pub struct Round {
    /// Arms retained after this round's ranking.
    pub narms: usize,
    /// Per-arm resource grant for this round.
    pub resources: Resources,
}

/// A finite ordered sequence of elimination rounds.
#[derive(Debug, Clone)]
pub struct Schedule {
    rounds: Vec<Round>,
}

/// Round to nearest, ties upward (the survivor-count rounding rule).
fn round_ties_up(x: f64) -> usize {
    (x + 0.5).floor() as usize
}

fn default_nrounds(base: f64, rate: f64) -> usize {
    let rounds = base.log(rate).floor();
    if rounds.is_sign_negative() {
        1
    } else {
        rounds as usize + 1
    }
}

impl Schedule {
    /// Compute a schedule for `narms` candidates under the given policy.
    ///
    /// `nrounds` defaults to `floor(log_rate(narms)) + 1`, or for the
    /// hyperband policy to the same expression over the first budget
    /// resource.
    pub fn new(
        policy: SchedulePolicy,
        budget: &Budget,
        narms: usize,
        rate: f64,
        nrounds: Option<usize>,
    ) -> Result<Self> {
        if rate <= 1.0 {
            return Err(Error::InvalidRate(rate));
        }
        if narms == 0 {
            return Err(Error::EmptyCandidates);
        }
        let first = budget.first().ok_or(Error::EmptyBudget)?.1.as_f64();
        let nrounds = nrounds.unwrap_or_else(|| match policy {
            SchedulePolicy::Hyperband => default_nrounds(first, rate),
            _ => default_nrounds(narms as f64, rate),
        });
        let nrounds = nrounds.max(1);

        let rounds = (1..=nrounds)
            .map(|i| match policy {
                SchedulePolicy::Geometric => {
                    let active = round_ties_up(narms as f64 / rate.powi(i as i32 - 1)).max(1);
                    let keep = round_ties_up(narms as f64 / rate.powi(i as i32)).max(1);
                    let factor = 1.0 / (active * nrounds) as f64;
                    Round { narms: keep, resources: budget.scaled(factor, Rounding::Down) }
                }
                SchedulePolicy::Constant => {
                    let keep = round_ties_up(narms as f64 / rate.powi(i as i32)).max(1);
                    let c = (rate - 1.0) * rate.powi(nrounds as i32 - 1)
                        / (narms as f64 * (rate.powi(nrounds as i32) - 1.0));
                    Round { narms: keep, resources: budget.scaled(c, Rounding::Down) }
                }
                SchedulePolicy::Hyperband => {
                    let keep = ((narms as f64 / rate.powi(i as i32)).floor() as usize).max(1);
                    let factor = 1.0 / rate.powi((nrounds - i) as i32);
                    Round { narms: keep, resources: budget.scaled(factor, Rounding::Nearest) }
                }
            })
            .collect();

        Ok(Self { rounds })
    }

    /// The rounds in execution order.
    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    /// Number of rounds.
    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    /// Whether the schedule has no rounds.
    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }
}

impl IntoIterator for Schedule {
    type Item = Round;
    type IntoIter = std::vec::IntoIter<Round>;

    fn into_iter(self) -> Self::IntoIter {
        self.rounds.into_iter()
    }
}
