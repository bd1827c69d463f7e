//! Prelude module for convenient imports
//!
//! ```rust
//! use damage_core::prelude::*;
//! ```

// Core types
pub use crate::error::CalcError;
pub use crate::types::AcRange;

// Dice
pub use crate::dice::{AverageStrategy, DicePool};

// Weapons and attacks
pub use crate::attack::AttackGroup;
pub use crate::weapon::{WeaponProfile, WeaponRecord};

// Tables
pub use crate::sheet::{ResultTable, TableMatrix};

// Config
pub use crate::config::{example_sheet, load_sheet, parse_sheet, SheetDefinition};
