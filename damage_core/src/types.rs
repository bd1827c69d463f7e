//! Core types shared across the damage engine

use crate::error::{CalcError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive range of target armor class values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AcRange {
    min: i32,
    max: i32,
}

impl AcRange {
    /// Create a new range, rejecting `min > max`
    pub fn new(min: i32, max: i32) -> Result<Self> {
        if min > max {
            return Err(CalcError::InvalidAcRange {
                min_ac: min,
                max_ac: max,
            });
        }
        Ok(AcRange { min, max })
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    /// Number of AC values covered (`max - min + 1`)
    pub fn len(&self) -> usize {
        self.offset(self.max) + 1
    }

    /// A valid range always holds at least one value
    pub fn is_empty(&self) -> bool {
        false
    }

    /// AC values in ascending order
    pub fn iter(&self) -> impl Iterator<Item = i32> {
        self.min..=self.max
    }

    /// Row index of an AC value, if inside the range
    pub fn index_of(&self, ac: i32) -> Option<usize> {
        if ac < self.min || ac > self.max {
            None
        } else {
            Some(self.offset(ac))
        }
    }

    /// Distance from `min`, widened so the full `i32` span fits
    fn offset(&self, ac: i32) -> usize {
        (ac as i64 - self.min as i64) as usize
    }
}

impl Default for AcRange {
    fn default() -> Self {
        AcRange { min: 10, max: 40 }
    }
}

impl fmt::Display for AcRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_len_and_iter() {
        let range = AcRange::new(10, 14).unwrap();
        assert_eq!(range.len(), 5);
        assert_eq!(range.iter().collect::<Vec<_>>(), vec![10, 11, 12, 13, 14]);
    }

    #[test]
    fn test_single_value_range() {
        let range = AcRange::new(20, 20).unwrap();
        assert_eq!(range.len(), 1);
        assert_eq!(range.index_of(20), Some(0));
    }

    #[test]
    fn test_inverted_range_rejected() {
        assert_eq!(
            AcRange::new(30, 10),
            Err(CalcError::InvalidAcRange {
                min_ac: 30,
                max_ac: 10
            })
        );
    }

    #[test]
    fn test_extreme_bounds() {
        let low = AcRange::new(i32::MIN, i32::MIN + 4).unwrap();
        assert_eq!(low.len(), 5);
        assert_eq!(low.index_of(i32::MIN + 4), Some(4));

        let high = AcRange::new(i32::MAX - 1, i32::MAX).unwrap();
        assert_eq!(high.len(), 2);
        assert_eq!(high.iter().collect::<Vec<_>>(), vec![i32::MAX - 1, i32::MAX]);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_full_i32_span() {
        let range = AcRange::new(i32::MIN, i32::MAX).unwrap();
        assert_eq!(range.len(), 1usize << 32);
        assert_eq!(range.index_of(i32::MAX), Some(u32::MAX as usize));
        assert_eq!(range.index_of(0), Some(1usize << 31));
    }

    #[test]
    fn test_index_of_outside() {
        let range = AcRange::new(10, 40).unwrap();
        assert_eq!(range.index_of(9), None);
        assert_eq!(range.index_of(41), None);
        assert_eq!(range.index_of(25), Some(15));
    }
}
