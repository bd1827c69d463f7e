//! Short and detailed text descriptions of a weapon

use super::WeaponProfile;
use crate::dice::DiceGroup;

impl WeaponProfile {
    /// Attack bonus of every step with explicit sign: `+10/+5`
    pub fn attack_sequence(&self) -> String {
        self.attack_steps
            .iter()
            .map(|&step| format!("{:+}", self.chances.attack_bonus as i64 + step as i64))
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Full attack and damage roll of a normal hit, e.g. `+10/+5, 1d8+5`
    pub fn summary_hit(&self) -> String {
        format!(
            "{}, {}",
            self.attack_sequence(),
            damage_notation(self.hit_expression.groups(), self.damage_hit)
        )
    }

    /// As `summary_hit`, for a critical hit, with the confirmation bonus when set
    pub fn summary_crit(&self) -> String {
        let mut attacks = self.attack_sequence();
        if self.chances.crit_confirm_bonus != 0 {
            attacks.push_str(&format!(" ({:+} Confirmation)", self.chances.crit_confirm_bonus));
        }
        format!(
            "{}, {}",
            attacks,
            damage_notation(self.crit_expression.groups(), self.damage_crit)
        )
    }

    /// Labelled weapon properties, in input order
    pub fn detail_lines(&self) -> Vec<(&'static str, String)> {
        let steps = self
            .attack_steps
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join("/");

        vec![
            ("Weapon", self.name.clone()),
            ("Base Damage Dice", self.base_dice.to_string()),
            ("Full Attack", steps),
            ("Attack Bonus", self.chances.attack_bonus.to_string()),
            ("Damage Bonus", self.damage_bonus.to_string()),
            ("Critical Threat Range", self.chances.crit_range.to_string()),
            ("Critical Multiplier", self.crit_multiplier.to_string()),
            ("Confirmation Bonus", self.chances.crit_confirm_bonus.to_string()),
            ("Precision Damage Dice", self.precision_dice.to_string()),
            ("Precision Damage Bonus", self.precision_damage.to_string()),
            ("Additional Damage Dice", self.extra_dice.to_string()),
            ("Additional Critical Dice", self.extra_crit_dice.to_string()),
            ("Bonus Damage (no Crit.)", self.extra_damage.to_string()),
            ("Bonus Damage (only on Crit.)", self.extra_crit_damage.to_string()),
            ("Fortification Chance", format!("{:.1} %", self.chances.fortification * 100.0)),
            ("Immunity vs. Precision", self.precision_immune.to_string()),
            ("Failure Chance", format!("{:.1} %", self.chances.fail_chance * 100.0)),
            ("Damage Reduction", self.damage_reduction.to_string()),
        ]
    }
}

/// `2d6 + 1d8+5`: grouped dice joined by ` + `, then the signed flat bonus
fn damage_notation(groups: &[DiceGroup], flat: i64) -> String {
    let groups: Vec<String> = groups.iter().map(|g| g.to_string()).collect();
    format!("{}{:+}", groups.join(" + "), flat)
}
