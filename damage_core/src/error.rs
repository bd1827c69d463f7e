//! Error type shared by every construction step

use thiserror::Error;

/// Failure while building dice pools, weapons, attack groups or result tables
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("Invalid die specification: {count}d{sides}")]
    InvalidDieSpec { count: i64, sides: i64 },
    #[error("Malformed weapon record #{weapon_index}, field `{field}`: {reason}")]
    MalformedWeaponRecord {
        weapon_index: usize,
        field: String,
        reason: String,
    },
    #[error("A result table needs at least one attack group")]
    EmptyGroupList,
    #[error("Attack group `{group}` has no weapons")]
    EmptyAttackGroup { group: String },
    #[error("Attack group `{group}` covers AC {found}, expected AC {expected}")]
    MismatchedAcRange {
        group: String,
        expected: String,
        found: String,
    },
    #[error("Probability for {quantity} out of range: {value}")]
    ProbabilityOutOfRange { quantity: &'static str, value: f64 },
    #[error("Invalid AC range: min {min_ac} is greater than max {max_ac}")]
    InvalidAcRange { min_ac: i32, max_ac: i32 },
}

impl CalcError {
    /// Shorthand for a malformed-field error
    pub fn malformed(weapon_index: usize, field: &str, reason: impl Into<String>) -> Self {
        CalcError::MalformedWeaponRecord {
            weapon_index,
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Re-tag the weapon index of a malformed-record error.
    ///
    /// Weapons are validated on their own and only learn their position in the
    /// sheet once a group or table builds them. Other variants pass through.
    pub fn at_weapon(self, index: usize) -> Self {
        match self {
            CalcError::MalformedWeaponRecord { field, reason, .. } => {
                CalcError::MalformedWeaponRecord {
                    weapon_index: index,
                    field,
                    reason,
                }
            }
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
