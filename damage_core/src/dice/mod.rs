//! Dice system - dice pools, grouping and damage expectations

mod expression;
mod pool;

pub use expression::{AverageStrategy, DamageExpression, Distribution, ENUMERATION_CEILING};
pub use pool::{group_dice, DiceGroup, DicePool};
