//! damage_core - Expected-damage engine for d20 weapon attacks
//!
//! This library provides:
//! - DicePool / DamageExpression: dice, flat modifiers and damage reduction
//! - WeaponProfile: hit and critical chances and expected damage per AC
//! - AttackGroup: weapons used together, summed per AC
//! - ResultTable: several attack groups compared against a baseline
//! - Sheet loading from TOML

pub mod attack;
pub mod config;
pub mod dice;
pub mod error;
pub mod prelude;
pub mod sheet;
pub mod types;
pub mod weapon;

// Re-export core types for convenience
pub use attack::AttackGroup;
pub use config::{example_sheet, load_sheet, parse_sheet, CalcSettings, ConfigError, SheetDefinition};
pub use dice::{AverageStrategy, DamageExpression, DiceGroup, DicePool, Distribution, ENUMERATION_CEILING};
pub use error::{CalcError, Result};
pub use sheet::{ResultTable, SheetExport, TableMatrix, TableRow};
pub use types::AcRange;
pub use weapon::{AttackResults, ChanceModel, WeaponProfile, WeaponRecord};
