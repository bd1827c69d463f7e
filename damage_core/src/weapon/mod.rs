//! WeaponProfile - one weapon's rules and its derived damage statistics
//!
//! Everything is computed once in the constructor:
//! 1. dice pools from the raw record
//! 2. flat damage on a hit and on a critical
//! 3. average damage per hit and per critical (after damage reduction)
//! 4. hit and critical-hit chances per AC and attack step
//! 5. expected damage per attack step and for the full attack

mod chance;
mod record;
mod results;
mod summary;

pub use chance::{roll_chance, threat_ceiling, ChanceModel};
pub use record::WeaponRecord;
pub use results::AttackResults;

use crate::dice::{AverageStrategy, DamageExpression, DicePool, ENUMERATION_CEILING};
use crate::error::{CalcError, Result};
use crate::types::AcRange;
use tracing::trace;

/// A single manufactured or natural weapon, immutable after construction
#[derive(Debug, Clone, PartialEq)]
pub struct WeaponProfile {
    name: String,
    base_dice: DicePool,
    precision_dice: DicePool,
    extra_dice: DicePool,
    extra_crit_dice: DicePool,
    attack_steps: Vec<i32>,
    damage_bonus: i32,
    crit_multiplier: u32,
    precision_damage: i32,
    extra_damage: i32,
    extra_crit_damage: i32,
    precision_immune: bool,
    damage_reduction: i32,
    chances: ChanceModel,
    ac_range: AcRange,

    // === Derived ===
    damage_hit: i64,
    damage_crit: i64,
    hit_expression: DamageExpression,
    crit_expression: DamageExpression,
    avg_damage_hit: f64,
    avg_damage_crit: f64,
    hit_strategy: AverageStrategy,
    crit_strategy: AverageStrategy,
    results: AttackResults,
}

impl WeaponProfile {
    /// Build a weapon and compute its statistics for the AC range
    pub fn new(record: &WeaponRecord, ac_range: AcRange) -> Result<Self> {
        Self::with_enumeration_ceiling(record, ac_range, ENUMERATION_CEILING)
    }

    /// As `new`, with a custom limit on exact enumeration
    pub fn with_enumeration_ceiling(
        record: &WeaponRecord,
        ac_range: AcRange,
        ceiling: u64,
    ) -> Result<Self> {
        record.validate()?;

        let base_dice = DicePool::from_pairs(record.base_dice.iter().copied())?;
        let precision_dice = DicePool::from_pairs(record.precision_dice.iter().copied())?;
        let extra_dice = DicePool::from_pairs(record.extra_dice.iter().copied())?;
        let extra_crit_dice = DicePool::from_pairs(record.extra_crit_dice.iter().copied())?;

        let crit_multiplier = record.crit_multiplier as u32;
        let precision = if record.precision_immune {
            0
        } else {
            record.precision_damage as i64
        };

        let damage_hit = record.damage_bonus as i64 + record.extra_damage as i64 + precision;
        // Flat precision damage enters the critical total once unconditionally
        // and once more unless the target is immune.
        let damage_crit = record.damage_bonus as i64 * crit_multiplier as i64
            + record.precision_damage as i64
            + record.extra_damage as i64
            + record.extra_crit_damage as i64
            + precision;

        let mut hit_pool = base_dice.clone();
        let mut crit_pool = base_dice.repeated(crit_multiplier).map_err(|e| {
            CalcError::malformed(0, "crit_multiplier", format!("multiplied dice overflow: {}", e))
        })?;
        if !record.precision_immune {
            hit_pool.extend(&precision_dice);
            crit_pool.extend(&precision_dice);
        }
        hit_pool.extend(&extra_dice);
        crit_pool.extend(&extra_dice);
        crit_pool.extend(&extra_crit_dice);

        let reduction = record.damage_reduction as i64;
        let hit_expression = DamageExpression::new(&hit_pool, damage_hit)?;
        let crit_expression = DamageExpression::new(&crit_pool, damage_crit)?;
        let (mut avg_damage_hit, hit_strategy) =
            hit_expression.average_after_reduction(reduction, ceiling);
        let (mut avg_damage_crit, crit_strategy) =
            crit_expression.average_after_reduction(reduction, ceiling);

        let fortification = record.fortification / 100.0;
        if fortification != 0.0 {
            // Approximation: fortification negates the average precision dice
            // on every hit, independent of the reduction clamp.
            let negated = fortification * precision_dice.expectation();
            avg_damage_hit -= negated;
            avg_damage_crit -= negated;
        }

        let chances = ChanceModel {
            attack_bonus: record.attack_bonus,
            crit_confirm_bonus: record.crit_confirm_bonus,
            crit_range: record.crit_range,
            fail_chance: record.fail_chance / 100.0,
            fortification,
        };

        let results = compute_results(
            &chances,
            &record.attack_steps,
            ac_range,
            avg_damage_hit,
            avg_damage_crit,
        )?;

        trace!(
            weapon = %record.name,
            avg_damage_hit,
            avg_damage_crit,
            ?hit_strategy,
            ?crit_strategy,
            "built weapon profile"
        );

        Ok(WeaponProfile {
            name: record.name.clone(),
            base_dice,
            precision_dice,
            extra_dice,
            extra_crit_dice,
            attack_steps: record.attack_steps.clone(),
            damage_bonus: record.damage_bonus,
            crit_multiplier,
            precision_damage: record.precision_damage,
            extra_damage: record.extra_damage,
            extra_crit_damage: record.extra_crit_damage,
            precision_immune: record.precision_immune,
            damage_reduction: record.damage_reduction,
            chances,
            ac_range,
            damage_hit,
            damage_crit,
            hit_expression,
            crit_expression,
            avg_damage_hit,
            avg_damage_crit,
            hit_strategy,
            crit_strategy,
            results,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ac_range(&self) -> AcRange {
        self.ac_range
    }

    pub fn attack_steps(&self) -> &[i32] {
        &self.attack_steps
    }

    pub fn attack_bonus(&self) -> i32 {
        self.chances.attack_bonus
    }

    pub fn chances(&self) -> &ChanceModel {
        &self.chances
    }

    pub fn base_dice(&self) -> &DicePool {
        &self.base_dice
    }

    pub fn precision_dice(&self) -> &DicePool {
        &self.precision_dice
    }

    /// Flat damage added to a normal hit
    pub fn damage_hit(&self) -> i64 {
        self.damage_hit
    }

    /// Flat damage added to a critical hit
    pub fn damage_crit(&self) -> i64 {
        self.damage_crit
    }

    pub fn avg_damage_hit(&self) -> f64 {
        self.avg_damage_hit
    }

    pub fn avg_damage_crit(&self) -> f64 {
        self.avg_damage_crit
    }

    /// Strategies used for the hit and critical averages
    pub fn strategies(&self) -> (AverageStrategy, AverageStrategy) {
        (self.hit_strategy, self.crit_strategy)
    }

    pub fn results(&self) -> &AttackResults {
        &self.results
    }

    /// Expected damage of the full attack per AC
    pub fn full_attack(&self) -> &[f64] {
        self.results.full_attack()
    }

    /// Hit chance per AC for an attack-step penalty
    pub fn hit_chances(&self, bab: i32) -> Result<Vec<f64>> {
        self.chances.hit_chances(bab, self.ac_range)
    }

    /// Critical-hit chance per AC for an attack-step penalty
    pub fn crit_chances(&self, bab: i32) -> Result<Vec<f64>> {
        self.chances.crit_chances(bab, self.ac_range)
    }
}

fn compute_results(
    chances: &ChanceModel,
    attack_steps: &[i32],
    ac_range: AcRange,
    avg_damage_hit: f64,
    avg_damage_crit: f64,
) -> Result<AttackResults> {
    let mut results = AttackResults::new(ac_range);
    let crit_bonus = avg_damage_crit - avg_damage_hit;

    for &bab in attack_steps {
        let hit = chances.hit_chances(bab, ac_range)?;
        let crit = chances.crit_chances(bab, ac_range)?;
        // Critical hits are a subset of hits: pay the hit average on every hit
        // plus the critical surplus on confirmed criticals.
        let column = hit
            .iter()
            .zip(&crit)
            .map(|(h, c)| avg_damage_hit * h + crit_bonus * c)
            .collect();
        results.push_step(column);
    }

    Ok(results)
}
