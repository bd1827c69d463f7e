//! d20 hit, threat, confirmation and critical-hit chances
//!
//! A d20 attack hits when `roll + bonus >= AC`, so the chance per roll point is
//! 5% and `(bonus + 21 - AC) * 0.05` is the raw hit chance. A natural 1 always
//! misses and a natural 20 always hits, giving the [0.05, 0.95] clamp.
//! Threats use the same roll but can only come from the threat range, so their
//! ceiling is `(21 - crit_range) * 0.05` instead.
//!
//! Failure chance (concealment) applies to the attack roll and again to the
//! confirmation roll. Fortification negates a confirmed critical outright.

use crate::error::{CalcError, Result};
use crate::types::AcRange;
use serde::{Deserialize, Serialize};

/// Offset turning "needs X or higher on a d20" into a count of winning faces
pub const D20_FACES_PLUS_ONE: i32 = 21;
/// Probability of a single d20 face
pub const CHANCE_PER_FACE: f64 = 0.05;
/// Natural 1 always misses
pub const MIN_ROLL_CHANCE: f64 = 0.05;
/// Natural 20 always hits
pub const MAX_ROLL_CHANCE: f64 = 0.95;

/// Chance that a d20 roll plus `bonus` meets `ac`, clamped to `[0.05, cap]`.
///
/// `bonus` is the summed attack modifier, widened so sums of `i32` inputs fit.
pub fn roll_chance(bonus: i64, ac: i32, cap: f64) -> f64 {
    let base = (bonus + D20_FACES_PLUS_ONE as i64 - ac as i64) as f64 * CHANCE_PER_FACE;
    if base > cap {
        cap
    } else if base < MIN_ROLL_CHANCE {
        MIN_ROLL_CHANCE
    } else {
        base
    }
}

/// Probability of rolling inside the threat range
pub fn threat_ceiling(crit_range: i32) -> f64 {
    (D20_FACES_PLUS_ONE as i64 - crit_range as i64) as f64 * CHANCE_PER_FACE
}

/// Reject probabilities outside [0, 1]; reaching this is a logic error
pub fn checked_probability(quantity: &'static str, value: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(CalcError::ProbabilityOutOfRange { quantity, value })
    }
}

/// Everything the attack and confirmation rolls depend on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChanceModel {
    pub attack_bonus: i32,
    pub crit_confirm_bonus: i32,
    pub crit_range: i32,
    /// Failure chance as a fraction (0.0 to 1.0)
    pub fail_chance: f64,
    /// Fortification as a fraction (0.0 to 1.0)
    pub fortification: f64,
}

impl ChanceModel {
    /// Attack modifier of one step: `attack_bonus + bab`
    pub fn step_bonus(&self, bab: i32) -> i64 {
        self.attack_bonus as i64 + bab as i64
    }

    /// Chance to hit with attack-step penalty `bab`
    pub fn hit_chance(&self, bab: i32, ac: i32) -> Result<f64> {
        let chance = roll_chance(self.step_bonus(bab), ac, MAX_ROLL_CHANCE);
        checked_probability("hit chance", chance * (1.0 - self.fail_chance))
    }

    /// Chance to threaten a critical hit
    pub fn threat_chance(&self, bab: i32, ac: i32) -> Result<f64> {
        let chance = roll_chance(self.step_bonus(bab), ac, threat_ceiling(self.crit_range));
        checked_probability("threat chance", chance * (1.0 - self.fail_chance))
    }

    /// Chance to confirm a threatened critical hit
    pub fn confirm_chance(&self, bab: i32, ac: i32) -> Result<f64> {
        let bonus = self.step_bonus(bab) + self.crit_confirm_bonus as i64;
        let chance = roll_chance(bonus, ac, MAX_ROLL_CHANCE);
        checked_probability("confirmation chance", chance * (1.0 - self.fail_chance))
    }

    /// Chance of a confirmed critical hit that fortification does not negate
    pub fn crit_chance(&self, bab: i32, ac: i32) -> Result<f64> {
        let threat = self.threat_chance(bab, ac)?;
        let confirm = self.confirm_chance(bab, ac)?;
        checked_probability("critical chance", threat * confirm * (1.0 - self.fortification))
    }

    /// Hit chance for every AC of the range
    pub fn hit_chances(&self, bab: i32, range: AcRange) -> Result<Vec<f64>> {
        range.iter().map(|ac| self.hit_chance(bab, ac)).collect()
    }

    /// Critical-hit chance for every AC of the range
    pub fn crit_chances(&self, bab: i32, range: AcRange) -> Result<Vec<f64>> {
        range.iter().map(|ac| self.crit_chance(bab, ac)).collect()
    }
}
