//! AttackGroup - one or more weapons used together in a full attack

use crate::error::{CalcError, Result};
use crate::types::AcRange;
use crate::weapon::{WeaponProfile, WeaponRecord};

/// Weapons attacking together (e.g. main hand and off hand) under one name
#[derive(Debug, Clone, PartialEq)]
pub struct AttackGroup {
    name: String,
    ac_range: AcRange,
    weapons: Vec<WeaponProfile>,
    totals: Vec<f64>,
}

impl AttackGroup {
    /// Combine already-built weapons; at least one, all covering `ac_range`
    pub fn new(name: impl Into<String>, ac_range: AcRange, weapons: Vec<WeaponProfile>) -> Result<Self> {
        let name = name.into();

        if weapons.is_empty() {
            return Err(CalcError::EmptyAttackGroup { group: name });
        }

        if let Some(weapon) = weapons.iter().find(|w| w.ac_range() != ac_range) {
            return Err(CalcError::MismatchedAcRange {
                group: format!("{} / {}", name, weapon.name()),
                expected: ac_range.to_string(),
                found: weapon.ac_range().to_string(),
            });
        }

        let mut totals = vec![0.0; ac_range.len()];
        for weapon in &weapons {
            for (total, value) in totals.iter_mut().zip(weapon.full_attack()) {
                *total += value;
            }
        }

        Ok(AttackGroup {
            name,
            ac_range,
            weapons,
            totals,
        })
    }

    /// Build every weapon from its record, then combine them.
    ///
    /// `first_weapon_index` is the sheet-wide index of the first record and is
    /// used to identify malformed records.
    pub fn from_records(
        name: impl Into<String>,
        ac_range: AcRange,
        records: &[WeaponRecord],
        first_weapon_index: usize,
        ceiling: u64,
    ) -> Result<Self> {
        let weapons = records
            .iter()
            .enumerate()
            .map(|(i, record)| {
                WeaponProfile::with_enumeration_ceiling(record, ac_range, ceiling)
                    .map_err(|e| e.at_weapon(first_weapon_index + i))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(name, ac_range, weapons)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ac_range(&self) -> AcRange {
        self.ac_range
    }

    pub fn weapons(&self) -> &[WeaponProfile] {
        &self.weapons
    }

    /// Expected full-attack damage of all weapons combined, per AC
    pub fn full_attack(&self) -> &[f64] {
        &self.totals
    }

    /// Combined full-attack damage at one AC
    pub fn total_at(&self, ac: i32) -> Option<f64> {
        self.ac_range.index_of(ac).map(|i| self.totals[i])
    }

    /// Expected damage of the first attack of one weapon
    pub fn single_attack(&self, weapon_index: usize) -> Option<&[f64]> {
        self.weapons.get(weapon_index)?.results().step(0)
    }

    /// Full-attack column of one weapon
    pub fn weapon_full_attack(&self, weapon_index: usize) -> Option<&[f64]> {
        self.weapons.get(weapon_index).map(WeaponProfile::full_attack)
    }

    /// Rows of `[AC, total, weapon 1, weapon 2, ...]`, ascending by AC
    pub fn rows(&self) -> Vec<Vec<f64>> {
        self.ac_range
            .iter()
            .enumerate()
            .map(|(i, ac)| {
                let mut row = Vec::with_capacity(self.weapons.len() + 2);
                row.push(ac as f64);
                row.push(self.totals[i]);
                row.extend(self.weapons.iter().map(|w| w.full_attack()[i]));
                row
            })
            .collect()
    }

    /// Weapon names with their on-hit summaries
    pub fn summary(&self) -> String {
        self.weapons
            .iter()
            .map(|w| format!("{} {}", w.name(), w.summary_hit()))
            .collect::<Vec<_>>()
            .join(";   ")
    }
}
