//! ResultTable - comparison of several attack groups across an AC range

mod export;

pub use export::{SheetExport, WeaponExport};

use crate::attack::AttackGroup;
use crate::error::{CalcError, Result};
use crate::types::AcRange;
use serde::{Deserialize, Serialize};
use tracing::info;

/// One AC row of a matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub ac: i32,
    pub values: Vec<f64>,
}

/// AC-keyed numeric matrix with named columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableMatrix {
    /// Column names, not counting the AC column
    pub columns: Vec<String>,
    /// Rows ascending by AC
    pub rows: Vec<TableRow>,
}

impl TableMatrix {
    /// Values of one column, ascending by AC
    pub fn column(&self, index: usize) -> Option<Vec<f64>> {
        if index >= self.columns.len() {
            return None;
        }
        Some(self.rows.iter().map(|r| r.values[index]).collect())
    }

    /// Values of a column looked up by name
    pub fn column_by_name(&self, name: &str) -> Option<Vec<f64>> {
        let index = self.columns.iter().position(|c| c == name)?;
        self.column(index)
    }

    /// `(AC, value)` points of one column, e.g. for plotting
    pub fn points(&self, index: usize) -> Vec<(f64, f64)> {
        self.rows
            .iter()
            .filter_map(|r| r.values.get(index).map(|v| (r.ac as f64, *v)))
            .collect()
    }

    /// Smallest and largest value over every column
    pub fn value_bounds(&self) -> Option<(f64, f64)> {
        self.rows
            .iter()
            .flat_map(|r| r.values.iter().copied())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// Absolute and baseline-relative damage of every attack group
///
/// The first group is the baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    ac_range: AcRange,
    groups: Vec<AttackGroup>,
    absolute: TableMatrix,
    delta: TableMatrix,
}

impl ResultTable {
    /// Build both matrices; groups must share one AC range
    pub fn new(groups: Vec<AttackGroup>) -> Result<Self> {
        let baseline = groups.first().ok_or(CalcError::EmptyGroupList)?;
        let ac_range = baseline.ac_range();

        if let Some(group) = groups.iter().find(|g| g.ac_range() != ac_range) {
            return Err(CalcError::MismatchedAcRange {
                group: group.name().to_string(),
                expected: ac_range.to_string(),
                found: group.ac_range().to_string(),
            });
        }

        let absolute = TableMatrix {
            columns: groups.iter().map(|g| g.name().to_string()).collect(),
            rows: ac_range
                .iter()
                .enumerate()
                .map(|(i, ac)| TableRow {
                    ac,
                    values: groups.iter().map(|g| g.full_attack()[i]).collect(),
                })
                .collect(),
        };

        let delta = TableMatrix {
            columns: absolute.columns[1..].to_vec(),
            rows: absolute
                .rows
                .iter()
                .map(|row| TableRow {
                    ac: row.ac,
                    values: row.values[1..].iter().map(|v| v - row.values[0]).collect(),
                })
                .collect(),
        };

        info!(
            groups = groups.len(),
            ac_range = %ac_range,
            baseline = baseline.name(),
            "built result table"
        );

        Ok(ResultTable {
            ac_range,
            groups,
            absolute,
            delta,
        })
    }

    pub fn ac_range(&self) -> AcRange {
        self.ac_range
    }

    pub fn groups(&self) -> &[AttackGroup] {
        &self.groups
    }

    pub fn baseline(&self) -> &AttackGroup {
        &self.groups[0]
    }

    /// One row per AC, one column per group
    pub fn absolute(&self) -> &TableMatrix {
        &self.absolute
    }

    /// Group total minus baseline total, baseline column omitted
    pub fn delta(&self) -> &TableMatrix {
        &self.delta
    }

    /// Weapon names and on-hit summaries of every group, one line per group
    pub fn attack_summaries(&self) -> Vec<String> {
        self.groups.iter().map(AttackGroup::summary).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ENUMERATION_CEILING;
    use crate::weapon::WeaponRecord;

    fn greatsword(attack_bonus: i32, damage_bonus: i32) -> WeaponRecord {
        WeaponRecord {
            name: "Greatsword".to_string(),
            base_dice: vec![(2, 6)],
            attack_steps: vec![0, -5],
            attack_bonus,
            damage_bonus,
            crit_range: 19,
            crit_multiplier: 2,
            ..Default::default()
        }
    }

    fn group(name: &str, record: WeaponRecord, range: AcRange) -> AttackGroup {
        AttackGroup::from_records(name, range, &[record], 0, ENUMERATION_CEILING).unwrap()
    }

    fn range() -> AcRange {
        AcRange::new(10, 40).unwrap()
    }

    #[test]
    fn test_absolute_and_delta_shape() {
        let table = ResultTable::new(vec![
            group("Base", greatsword(12, 9), range()),
            group("Power Attack", greatsword(9, 18), range()),
            group("Bless", greatsword(13, 9), range()),
        ])
        .unwrap();

        assert_eq!(table.absolute().rows.len(), 31);
        assert_eq!(table.absolute().columns, vec!["Base", "Power Attack", "Bless"]);
        assert_eq!(table.delta().columns, vec!["Power Attack", "Bless"]);
        assert_eq!(table.delta().rows.len(), 31);
        assert!(table.absolute().rows.windows(2).all(|w| w[0].ac < w[1].ac));
        assert_eq!(table.absolute().rows[0].ac, 10);
        assert_eq!(table.absolute().rows[30].ac, 40);
    }

    #[test]
    fn test_delta_is_difference_to_baseline() {
        let table = ResultTable::new(vec![
            group("Base", greatsword(12, 9), range()),
            group("Power Attack", greatsword(9, 18), range()),
        ])
        .unwrap();

        for ac in range().iter() {
            let base = table.groups()[0].total_at(ac).unwrap();
            let power = table.groups()[1].total_at(ac).unwrap();
            let i = range().index_of(ac).unwrap();
            assert_eq!(table.delta().rows[i].values[0], power - base);
        }
        // Bless is strictly better everywhere
        let bless = ResultTable::new(vec![
            group("Base", greatsword(12, 9), range()),
            group("Bless", greatsword(13, 9), range()),
        ])
        .unwrap();
        assert!(bless.delta().column(0).unwrap().iter().all(|d| *d >= 0.0));
    }

    #[test]
    fn test_single_group_has_empty_delta_columns() {
        let table = ResultTable::new(vec![group("Base", greatsword(12, 9), range())]).unwrap();
        assert!(table.delta().columns.is_empty());
        assert!(table.delta().rows.iter().all(|r| r.values.is_empty()));
        assert_eq!(table.baseline().name(), "Base");
    }

    #[test]
    fn test_empty_group_list() {
        assert_eq!(ResultTable::new(vec![]), Err(CalcError::EmptyGroupList));
    }

    #[test]
    fn test_mismatched_range() {
        let err = ResultTable::new(vec![
            group("Base", greatsword(12, 9), range()),
            group("Narrow", greatsword(12, 9), AcRange::new(10, 20).unwrap()),
        ])
        .unwrap_err();
        match err {
            CalcError::MismatchedAcRange { group, .. } => assert_eq!(group, "Narrow"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_matrix_helpers() {
        let table = ResultTable::new(vec![
            group("Base", greatsword(12, 9), range()),
            group("Bless", greatsword(13, 9), range()),
        ])
        .unwrap();
        let absolute = table.absolute();
        assert_eq!(absolute.column_by_name("Bless"), absolute.column(1));
        assert!(absolute.column(2).is_none());
        let points = absolute.points(0);
        assert_eq!(points.len(), 31);
        assert!((points[0].0 - 10.0).abs() < f64::EPSILON);
        let (lo, hi) = absolute.value_bounds().unwrap();
        assert!(lo > 0.0 && lo < hi);
    }
}
