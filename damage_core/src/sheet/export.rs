//! Serializable snapshot of a ResultTable

use super::{ResultTable, TableMatrix};
use crate::dice::AverageStrategy;
use crate::types::AcRange;
use serde::{Deserialize, Serialize};

/// One weapon's summaries and averages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponExport {
    pub attack: String,
    pub weapon: String,
    pub summary_hit: String,
    pub summary_crit: String,
    pub avg_damage_hit: f64,
    pub avg_damage_crit: f64,
    pub hit_strategy: AverageStrategy,
    pub crit_strategy: AverageStrategy,
}

/// Everything needed to reproduce the tables outside this crate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetExport {
    pub ac_range: AcRange,
    pub baseline: String,
    pub absolute: TableMatrix,
    pub delta: TableMatrix,
    pub weapons: Vec<WeaponExport>,
}

impl SheetExport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl From<&ResultTable> for SheetExport {
    fn from(table: &ResultTable) -> Self {
        let weapons = table
            .groups()
            .iter()
            .flat_map(|group| {
                group.weapons().iter().map(move |weapon| {
                    let (hit_strategy, crit_strategy) = weapon.strategies();
                    WeaponExport {
                        attack: group.name().to_string(),
                        weapon: weapon.name().to_string(),
                        summary_hit: weapon.summary_hit(),
                        summary_crit: weapon.summary_crit(),
                        avg_damage_hit: weapon.avg_damage_hit(),
                        avg_damage_crit: weapon.avg_damage_crit(),
                        hit_strategy,
                        crit_strategy,
                    }
                })
            })
            .collect();

        SheetExport {
            ac_range: table.ac_range(),
            baseline: table.baseline().name().to_string(),
            absolute: table.absolute().clone(),
            delta: table.delta().clone(),
            weapons,
        }
    }
}

impl ResultTable {
    /// Pretty-printed JSON of the tables and weapon summaries
    pub fn to_json(&self) -> serde_json::Result<String> {
        SheetExport::from(self).to_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attack::AttackGroup;
    use crate::dice::ENUMERATION_CEILING;
    use crate::weapon::WeaponRecord;

    fn table() -> ResultTable {
        let record = WeaponRecord {
            name: "Longsword".to_string(),
            base_dice: vec![(1, 8)],
            attack_bonus: 10,
            damage_bonus: 5,
            crit_range: 19,
            ..Default::default()
        };
        let range = AcRange::new(15, 20).unwrap();
        let base = AttackGroup::from_records("Base", range, &[record.clone()], 0, ENUMERATION_CEILING).unwrap();
        let bless = AttackGroup::from_records(
            "Bless",
            range,
            &[WeaponRecord {
                attack_bonus: 11,
                ..record
            }],
            1,
            ENUMERATION_CEILING,
        )
        .unwrap();
        ResultTable::new(vec![base, bless]).unwrap()
    }

    #[test]
    fn test_export_contents() {
        let export = SheetExport::from(&table());
        assert_eq!(export.baseline, "Base");
        assert_eq!(export.weapons.len(), 2);
        assert_eq!(export.weapons[1].attack, "Bless");
        assert_eq!(export.weapons[0].summary_hit, "+10, 1d8+5");
        assert_eq!(export.absolute.rows.len(), 6);
    }

    #[test]
    fn test_json_round_trip() {
        let table = table();
        let json = table.to_json().unwrap();
        assert!(json.contains("\"closed_form\""));
        let parsed: SheetExport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.ac_range, table.ac_range());
        assert_eq!(parsed.delta.columns, vec!["Bless"]);
        assert_eq!(parsed.weapons[1].summary_crit, "+11, 2d8+10");
        let first = parsed.absolute.rows[0].values[0];
        assert!((first - table.absolute().rows[0].values[0]).abs() < 1e-12);
    }
}
