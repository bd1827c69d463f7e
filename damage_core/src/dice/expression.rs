//! Damage expressions - dice plus a flat modifier, averaged against damage reduction
//!
//! Damage reduction floors each hit at zero, which makes the average damage
//! non-linear in the dice. Two strategies are available:
//!
//! - `ExactEnumeration`: build the exact distribution of dice totals and average
//!   `max(total + flat - reduction, 0)` over every outcome.
//! - `ClosedForm`: `E[dice] + flat - reduction`, unclamped. Exact whenever the
//!   minimum roll already beats the reduction; otherwise it overstates the
//!   reduction's effect in the clamped region.
//!
//! Enumeration is only chosen when reduction can actually clamp an outcome and
//! the outcome space (product of all die sizes) stays within the ceiling.

use super::{group_dice, DiceGroup, DicePool};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Largest outcome space (product of die sizes) that will be enumerated
pub const ENUMERATION_CEILING: u64 = 1_000_000;

/// How an average damage value was computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AverageStrategy {
    ExactEnumeration,
    ClosedForm,
}

impl AverageStrategy {
    /// Pick the strategy for grouped dice, flat modifier and reduction
    pub fn select(groups: &[DiceGroup], flat: i64, reduction: i64, ceiling: u64) -> Self {
        let min_total = die_count(groups) as i64 + flat;
        if min_total >= reduction {
            return AverageStrategy::ClosedForm;
        }
        match outcome_space(groups) {
            Some(size) if size <= ceiling => AverageStrategy::ExactEnumeration,
            _ => AverageStrategy::ClosedForm,
        }
    }
}

/// Product of all die sizes, `None` on overflow
pub fn outcome_space(groups: &[DiceGroup]) -> Option<u64> {
    groups.iter().try_fold(1u64, |acc, g| {
        (g.sides as u64)
            .checked_pow(g.count)
            .and_then(|size| acc.checked_mul(size))
    })
}

fn die_count(groups: &[DiceGroup]) -> u64 {
    groups.iter().map(|g| g.count as u64).sum()
}

/// Exact distribution of the sum of a dice list
///
/// Stored as outcome counts per total, starting at the minimum total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    min_total: i64,
    counts: Vec<u64>,
    outcomes: u64,
}

impl Distribution {
    /// Distribution of a plain dice list, one entry per die.
    ///
    /// Returns `None` when the outcome space exceeds `ceiling`.
    pub fn of_dice(dice: &[u32], ceiling: u64) -> Option<Self> {
        Self::of_groups(&group_dice(dice), ceiling)
    }

    /// Build the distribution by convolving one die at a time.
    ///
    /// The ceiling is checked before anything is allocated. One-sided dice
    /// only shift the minimum total.
    pub fn of_groups(groups: &[DiceGroup], ceiling: u64) -> Option<Self> {
        let outcomes = outcome_space(groups).filter(|&size| size <= ceiling)?;

        let mut counts: Vec<u64> = vec![1];
        for g in groups.iter().filter(|g| g.sides > 1) {
            let sides = g.sides as usize;
            for _ in 0..g.count {
                let mut next = vec![0u64; counts.len() + sides - 1];
                for (offset, &count) in counts.iter().enumerate() {
                    if count == 0 {
                        continue;
                    }
                    for face in 0..sides {
                        next[offset + face] += count;
                    }
                }
                counts = next;
            }
        }

        Some(Distribution {
            min_total: die_count(groups) as i64,
            counts,
            outcomes,
        })
    }

    /// Number of equally likely face combinations
    pub fn outcomes(&self) -> u64 {
        self.outcomes
    }

    pub fn min_total(&self) -> i64 {
        self.min_total
    }

    pub fn max_total(&self) -> i64 {
        self.min_total + self.counts.len() as i64 - 1
    }

    /// Probability of rolling exactly `total`
    pub fn probability(&self, total: i64) -> f64 {
        if total < self.min_total || total > self.max_total() {
            return 0.0;
        }
        self.counts[(total - self.min_total) as usize] as f64 / self.outcomes as f64
    }

    /// `(total, probability)` pairs in ascending order of total
    pub fn iter(&self) -> impl Iterator<Item = (i64, f64)> + '_ {
        let outcomes = self.outcomes as f64;
        self.counts
            .iter()
            .enumerate()
            .map(move |(i, &count)| (self.min_total + i as i64, count as f64 / outcomes))
    }

    /// Mean of the raw dice total
    pub fn mean(&self) -> f64 {
        self.iter().map(|(total, p)| total as f64 * p).sum()
    }

    /// Mean of `max(total + flat - reduction, 0)` over every outcome
    pub fn mean_reduced(&self, flat: i64, reduction: i64) -> f64 {
        let sum: f64 = self
            .counts
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                let damage = (self.min_total + i as i64 + flat - reduction).max(0);
                damage as f64 * count as f64
            })
            .sum();
        sum / self.outcomes as f64
    }
}

/// Grouped dice plus flat modifier for one kind of hit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DamageExpression {
    groups: Vec<DiceGroup>,
    flat: i64,
}

impl DamageExpression {
    pub fn new(pool: &DicePool, flat: i64) -> Result<Self> {
        Ok(DamageExpression {
            groups: pool.grouped()?,
            flat,
        })
    }

    /// Dice groups sorted ascending by sides, equal sizes merged
    pub fn groups(&self) -> &[DiceGroup] {
        &self.groups
    }

    pub fn flat(&self) -> i64 {
        self.flat
    }

    /// Damage when every die rolls a one
    pub fn min_total(&self) -> i64 {
        die_count(&self.groups) as i64 + self.flat
    }

    /// Closed-form expectation of the dice alone
    pub fn dice_expectation(&self) -> f64 {
        self.groups.iter().map(DiceGroup::expectation).sum()
    }

    pub fn strategy(&self, reduction: i64, ceiling: u64) -> AverageStrategy {
        AverageStrategy::select(&self.groups, self.flat, reduction, ceiling)
    }

    /// Exact distribution of the dice total, when within the ceiling
    pub fn distribution(&self, ceiling: u64) -> Option<Distribution> {
        Distribution::of_groups(&self.groups, ceiling)
    }

    /// Average damage after reduction, with the strategy that produced it
    pub fn average_after_reduction(&self, reduction: i64, ceiling: u64) -> (f64, AverageStrategy) {
        let strategy = self.strategy(reduction, ceiling);
        let closed_form = || self.dice_expectation() + (self.flat - reduction) as f64;

        match strategy {
            AverageStrategy::ClosedForm => (closed_form(), strategy),
            AverageStrategy::ExactEnumeration => match self.distribution(ceiling) {
                Some(dist) => {
                    debug!(
                        dice = die_count(&self.groups),
                        outcomes = dist.outcomes(),
                        flat = self.flat,
                        reduction,
                        "enumerated exact damage distribution"
                    );
                    (dist.mean_reduced(self.flat, reduction), strategy)
                }
                None => (closed_form(), AverageStrategy::ClosedForm),
            },
        }
    }
}
