//! Calculation settings

use crate::dice::ENUMERATION_CEILING;
use crate::error::Result;
use crate::types::AcRange;
use serde::{Deserialize, Serialize};

/// Tunable calculation settings, the `[settings]` table of a sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalcSettings {
    /// Lowest target AC in the tables
    #[serde(default = "default_min_ac")]
    pub min_ac: i32,
    /// Highest target AC in the tables
    #[serde(default = "default_max_ac")]
    pub max_ac: i32,
    /// Largest dice outcome space averaged by exact enumeration
    #[serde(default = "default_enumeration_ceiling")]
    pub enumeration_ceiling: u64,
}

impl CalcSettings {
    pub fn ac_range(&self) -> Result<AcRange> {
        AcRange::new(self.min_ac, self.max_ac)
    }
}

impl Default for CalcSettings {
    fn default() -> Self {
        CalcSettings {
            min_ac: default_min_ac(),
            max_ac: default_max_ac(),
            enumeration_ceiling: default_enumeration_ceiling(),
        }
    }
}

fn default_min_ac() -> i32 {
    10
}
fn default_max_ac() -> i32 {
    40
}
fn default_enumeration_ceiling() -> u64 {
    ENUMERATION_CEILING
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CalcError;

    #[test]
    fn test_default_settings() {
        let settings = CalcSettings::default();
        assert_eq!(settings.min_ac, 10);
        assert_eq!(settings.max_ac, 40);
        assert_eq!(settings.enumeration_ceiling, 1_000_000);
        assert_eq!(settings.ac_range().unwrap().len(), 31);
    }

    #[test]
    fn test_parse_partial_settings() {
        let settings: CalcSettings = toml::from_str("max_ac = 30").unwrap();
        assert_eq!(settings.min_ac, 10);
        assert_eq!(settings.max_ac, 30);
        assert_eq!(settings.enumeration_ceiling, ENUMERATION_CEILING);
    }

    #[test]
    fn test_inverted_range() {
        let settings: CalcSettings = toml::from_str("min_ac = 30\nmax_ac = 20").unwrap();
        assert_eq!(
            settings.ac_range(),
            Err(CalcError::InvalidAcRange {
                min_ac: 30,
                max_ac: 20
            })
        );
    }
}
