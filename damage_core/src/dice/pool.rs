//! DiceGroup and DicePool

use crate::error::{CalcError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// `count` dice with `sides` faces each, e.g. 2d6
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiceGroup {
    pub count: u32,
    pub sides: u32,
}

impl DiceGroup {
    /// Create a group; both count and sides must be positive
    pub fn new(count: i64, sides: i64) -> Result<Self> {
        if count <= 0 || sides <= 0 || count > u32::MAX as i64 || sides > u32::MAX as i64 {
            return Err(CalcError::InvalidDieSpec { count, sides });
        }
        Ok(DiceGroup {
            count: count as u32,
            sides: sides as u32,
        })
    }

    /// Average roll: count * (sides + 1) / 2
    pub fn expectation(&self) -> f64 {
        self.count as f64 * (self.sides as f64 + 1.0) / 2.0
    }
}

impl fmt::Display for DiceGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)
    }
}

/// Unordered collection of dice groups
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DicePool {
    groups: Vec<DiceGroup>,
}

impl DicePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pool from raw `(count, sides)` cell pairs.
    ///
    /// Pairs with a zero in either cell are empty slots and are skipped.
    /// Negative values are rejected.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (i64, i64)>,
    {
        let mut pool = DicePool::new();
        for (count, sides) in pairs {
            if count == 0 || sides == 0 {
                if count < 0 || sides < 0 {
                    return Err(CalcError::InvalidDieSpec { count, sides });
                }
                continue;
            }
            pool.push(DiceGroup::new(count, sides)?);
        }
        Ok(pool)
    }

    pub fn push(&mut self, group: DiceGroup) {
        self.groups.push(group);
    }

    /// Append every group of another pool
    pub fn extend(&mut self, other: &DicePool) {
        self.groups.extend_from_slice(&other.groups);
    }

    /// Each group repeated `times` times (critical multiplication of dice).
    ///
    /// A group whose multiplied count no longer fits a `u32` is rejected.
    pub fn repeated(&self, times: u32) -> Result<DicePool> {
        let mut groups = Vec::with_capacity(self.groups.len());
        for g in &self.groups {
            let count = g.count.checked_mul(times).ok_or(CalcError::InvalidDieSpec {
                count: g.count as i64 * times as i64,
                sides: g.sides as i64,
            })?;
            if count > 0 {
                groups.push(DiceGroup {
                    count,
                    sides: g.sides,
                });
            }
        }
        Ok(DicePool { groups })
    }

    pub fn groups(&self) -> &[DiceGroup] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of individual dice
    pub fn die_count(&self) -> u64 {
        self.groups.iter().map(|g| g.count as u64).sum()
    }

    /// Closed-form expectation: Σ count * (sides + 1) / 2
    pub fn expectation(&self) -> f64 {
        self.groups.iter().map(DiceGroup::expectation).sum()
    }

    /// One entry per die, sorted ascending by sides: 2d6 + 1d4 -> [4, 6, 6]
    pub fn dice_list(&self) -> Vec<u32> {
        let mut dice: Vec<u32> = self
            .groups
            .iter()
            .flat_map(|g| std::iter::repeat(g.sides).take(g.count as usize))
            .collect();
        dice.sort_unstable();
        dice
    }

    /// Groups sorted ascending by sides, equal die sizes merged.
    ///
    /// Works on the counts directly, so no die list is ever expanded.
    pub fn grouped(&self) -> Result<Vec<DiceGroup>> {
        let mut sorted = self.groups.clone();
        sorted.sort_by_key(|g| g.sides);

        let mut grouped: Vec<DiceGroup> = Vec::with_capacity(sorted.len());
        for g in sorted {
            match grouped.last_mut() {
                Some(last) if last.sides == g.sides => {
                    last.count = last.count.checked_add(g.count).ok_or(CalcError::InvalidDieSpec {
                        count: last.count as i64 + g.count as i64,
                        sides: g.sides as i64,
                    })?;
                }
                _ => grouped.push(g),
            }
        }
        Ok(grouped)
    }
}

impl fmt::Display for DicePool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.groups.iter().map(|g| g.to_string()).collect();
        write!(f, "{}", parts.join(" + "))
    }
}

/// Merge consecutive equal entries of a sorted dice list into groups.
///
/// `[3, 3, 4, 6, 6]` becomes `[2d3, 1d4, 2d6]`.
pub fn group_dice(sorted: &[u32]) -> Vec<DiceGroup> {
    let mut grouped: Vec<DiceGroup> = Vec::new();
    for &sides in sorted {
        match grouped.last_mut() {
            Some(last) if last.sides == sides => last.count += 1,
            _ => grouped.push(DiceGroup { count: 1, sides }),
        }
    }
    grouped
}
