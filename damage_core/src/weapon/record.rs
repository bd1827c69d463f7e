//! WeaponRecord - the fixed-schema input for one weapon

use crate::error::{CalcError, Result};
use serde::{Deserialize, Serialize};

/// One weapon's rule data as handed over by the input layer
///
/// Dice fields are raw `(count, sides)` cell pairs; empty slots (a zero in
/// either cell) are allowed and skipped when the pools are built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponRecord {
    pub name: String,
    /// Base weapon damage dice
    pub base_dice: Vec<(i64, i64)>,
    /// Penalty of every attack in a full attack, first attack first.
    /// Two iterative attacks are `[0, -5]`; haste adds another `0`.
    pub attack_steps: Vec<i32>,
    /// Overall attack bonus, BAB included
    pub attack_bonus: i32,
    pub damage_bonus: i32,
    /// Minimum natural roll that threatens a critical hit
    pub crit_range: i32,
    pub crit_multiplier: i32,
    /// Extra bonus on confirmation rolls only
    pub crit_confirm_bonus: i32,
    /// Precision damage dice (sneak attack and similar)
    pub precision_dice: Vec<(i64, i64)>,
    pub precision_damage: i32,
    /// Extra dice not multiplied on a critical (flaming and similar)
    pub extra_dice: Vec<(i64, i64)>,
    /// Extra dice only rolled on a critical (flaming burst and similar)
    pub extra_crit_dice: Vec<(i64, i64)>,
    /// Flat extra damage
    pub extra_damage: i32,
    /// Flat extra damage only on a critical, never multiplied
    pub extra_crit_damage: i32,
    /// Fortification in percent (0-100)
    pub fortification: f64,
    pub precision_immune: bool,
    /// Failure chance in percent (0-100), from concealment and similar
    pub fail_chance: f64,
    pub damage_reduction: i32,
}

impl Default for WeaponRecord {
    fn default() -> Self {
        WeaponRecord {
            name: String::new(),
            base_dice: Vec::new(),
            attack_steps: vec![0],
            attack_bonus: 0,
            damage_bonus: 0,
            crit_range: 20,
            crit_multiplier: 2,
            crit_confirm_bonus: 0,
            precision_dice: Vec::new(),
            precision_damage: 0,
            extra_dice: Vec::new(),
            extra_crit_dice: Vec::new(),
            extra_damage: 0,
            extra_crit_damage: 0,
            fortification: 0.0,
            precision_immune: false,
            fail_chance: 0.0,
            damage_reduction: 0,
        }
    }
}

impl WeaponRecord {
    /// Check scalar ranges.
    ///
    /// Errors carry weapon index 0; callers building a whole sheet re-tag them.
    pub fn validate(&self) -> Result<()> {
        if self.attack_steps.is_empty() {
            return Err(CalcError::malformed(0, "attack_steps", "needs at least one attack"));
        }
        if !(1..=20).contains(&self.crit_range) {
            return Err(CalcError::malformed(
                0,
                "crit_range",
                format!("{} is outside 1-20", self.crit_range),
            ));
        }
        if self.crit_multiplier < 1 {
            return Err(CalcError::malformed(
                0,
                "crit_multiplier",
                format!("{} is below 1", self.crit_multiplier),
            ));
        }
        if self.damage_reduction < 0 {
            return Err(CalcError::malformed(
                0,
                "damage_reduction",
                format!("{} is negative", self.damage_reduction),
            ));
        }
        check_percent("fortification", self.fortification)?;
        check_percent("fail_chance", self.fail_chance)?;
        Ok(())
    }
}

fn check_percent(field: &str, value: f64) -> Result<()> {
    if (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(CalcError::malformed(0, field, format!("{} is outside 0-100", value)))
    }
}
