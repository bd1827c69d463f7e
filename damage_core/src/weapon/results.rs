//! AttackResults - expected damage per AC and attack step

use crate::types::AcRange;
use serde::{Deserialize, Serialize};

/// Expected damage of one weapon for every AC of a range
///
/// Holds one column per attack step plus the full-attack column (sum of all
/// steps). Columns are indexed by `AcRange::index_of`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackResults {
    ac_range: AcRange,
    steps: Vec<Vec<f64>>,
    full_attack: Vec<f64>,
}

impl AttackResults {
    /// Empty table for the range; steps are added in attack order
    pub fn new(ac_range: AcRange) -> Self {
        AttackResults {
            ac_range,
            steps: Vec::new(),
            full_attack: vec![0.0; ac_range.len()],
        }
    }

    /// Append the column of the next attack step and add it to the full attack
    pub fn push_step(&mut self, column: Vec<f64>) {
        debug_assert_eq!(column.len(), self.ac_range.len());
        for (total, value) in self.full_attack.iter_mut().zip(&column) {
            *total += value;
        }
        self.steps.push(column);
    }

    pub fn ac_range(&self) -> AcRange {
        self.ac_range
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Expected damage of one attack step
    pub fn step(&self, index: usize) -> Option<&[f64]> {
        self.steps.get(index).map(Vec::as_slice)
    }

    /// Expected damage of the full attack (sum over steps)
    pub fn full_attack(&self) -> &[f64] {
        &self.full_attack
    }

    /// Full-attack expected damage at one AC
    pub fn full_attack_at(&self, ac: i32) -> Option<f64> {
        self.ac_range.index_of(ac).map(|i| self.full_attack[i])
    }

    /// Rows of `[full attack, step 1, step 2, ...]`, ascending by AC
    pub fn rows(&self) -> Vec<Vec<f64>> {
        (0..self.ac_range.len())
            .map(|i| {
                std::iter::once(self.full_attack[i])
                    .chain(self.steps.iter().map(|column| column[i]))
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_step_accumulates() {
        let range = AcRange::new(10, 12).unwrap();
        let mut results = AttackResults::new(range);
        results.push_step(vec![1.0, 2.0, 3.0]);
        results.push_step(vec![0.5, 0.5, 0.5]);

        assert_eq!(results.step_count(), 2);
        assert_eq!(results.full_attack(), &[1.5, 2.5, 3.5]);
        assert_eq!(results.full_attack_at(11), Some(2.5));
        assert_eq!(results.full_attack_at(13), None);
        assert_eq!(results.rows()[2], vec![3.5, 3.0, 0.5]);
    }

    #[test]
    fn test_no_steps_is_zero() {
        let range = AcRange::new(10, 11).unwrap();
        let results = AttackResults::new(range);
        assert_eq!(results.full_attack(), &[0.0, 0.0]);
        assert!(results.step(0).is_none());
    }
}
