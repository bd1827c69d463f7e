//! Sheet loading: attack groups and their weapons from TOML

use super::{CalcSettings, ConfigError};
use crate::attack::AttackGroup;
use crate::error::{CalcError, Result as CalcResult};
use crate::sheet::ResultTable;
use crate::weapon::WeaponRecord;
use serde::Deserialize;
use std::path::Path;
use toml::{Table, Value};
use tracing::warn;

const REQUIRED_FIELDS: &[&str] = &[
    "name",
    "base_dice",
    "attack_steps",
    "attack_bonus",
    "damage_bonus",
    "crit_range",
    "crit_multiplier",
];

const OPTIONAL_FIELDS: &[&str] = &[
    "crit_confirm_bonus",
    "precision_dice",
    "precision_damage",
    "extra_dice",
    "extra_crit_dice",
    "extra_damage",
    "extra_crit_damage",
    "fortification",
    "precision_immune",
    "fail_chance",
    "damage_reduction",
];

/// Raw file layout; weapons stay untyped so errors can name the field
#[derive(Debug, Deserialize)]
struct SheetFile {
    #[serde(default)]
    settings: CalcSettings,
    #[serde(default)]
    attacks: Vec<AttackFile>,
}

#[derive(Debug, Deserialize)]
struct AttackFile {
    name: String,
    #[serde(default)]
    weapons: Vec<Table>,
}

/// One named attack option and the weapons it uses
#[derive(Debug, Clone, PartialEq)]
pub struct AttackDefinition {
    pub name: String,
    pub weapons: Vec<WeaponRecord>,
}

/// A fully parsed sheet, ready to be computed
#[derive(Debug, Clone, PartialEq)]
pub struct SheetDefinition {
    pub settings: CalcSettings,
    pub attacks: Vec<AttackDefinition>,
}

impl SheetDefinition {
    /// Replace the AC bounds from the file
    pub fn with_ac_bounds(mut self, min_ac: Option<i32>, max_ac: Option<i32>) -> Self {
        if let Some(min_ac) = min_ac {
            self.settings.min_ac = min_ac;
        }
        if let Some(max_ac) = max_ac {
            self.settings.max_ac = max_ac;
        }
        self
    }

    /// Total number of weapons across all attacks
    pub fn weapon_count(&self) -> usize {
        self.attacks.iter().map(|a| a.weapons.len()).sum()
    }

    /// Compute every attack group; the first attack is the baseline
    pub fn build(&self) -> CalcResult<ResultTable> {
        let ac_range = self.settings.ac_range()?;
        let mut first_weapon_index = 0;
        let mut groups = Vec::with_capacity(self.attacks.len());

        for attack in &self.attacks {
            groups.push(AttackGroup::from_records(
                attack.name.clone(),
                ac_range,
                &attack.weapons,
                first_weapon_index,
                self.settings.enumeration_ceiling,
            )?);
            first_weapon_index += attack.weapons.len();
        }

        ResultTable::new(groups)
    }
}

/// Load a sheet from a TOML file
pub fn load_sheet(path: &Path) -> Result<SheetDefinition, ConfigError> {
    let file: SheetFile = super::load_toml(path)?;
    convert(file)
}

/// Load a sheet from a TOML string
pub fn parse_sheet(content: &str) -> Result<SheetDefinition, ConfigError> {
    let file: SheetFile = super::parse_toml(content)?;
    convert(file)
}

/// Bundled demonstration sheet
pub fn example_sheet() -> Result<SheetDefinition, ConfigError> {
    parse_sheet(include_str!("../../config/example_sheet.toml"))
}

fn convert(file: SheetFile) -> Result<SheetDefinition, ConfigError> {
    if file.attacks.is_empty() {
        return Err(CalcError::EmptyGroupList.into());
    }

    let mut index = 0;
    let mut attacks = Vec::with_capacity(file.attacks.len());
    for attack in file.attacks {
        if attack.name.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "attack #{} has an empty name",
                attacks.len()
            )));
        }
        if attack.weapons.is_empty() {
            return Err(CalcError::EmptyAttackGroup { group: attack.name }.into());
        }
        let mut weapons = Vec::with_capacity(attack.weapons.len());
        for table in &attack.weapons {
            weapons.push(FieldReader { table, index }.record()?);
            index += 1;
        }
        attacks.push(AttackDefinition {
            name: attack.name,
            weapons,
        });
    }

    Ok(SheetDefinition {
        settings: file.settings,
        attacks,
    })
}

/// Typed access to the fields of one weapon table
struct FieldReader<'a> {
    table: &'a Table,
    index: usize,
}

impl FieldReader<'_> {
    fn record(&self) -> CalcResult<WeaponRecord> {
        for key in self.table.keys() {
            if !REQUIRED_FIELDS.contains(&key.as_str()) && !OPTIONAL_FIELDS.contains(&key.as_str()) {
                warn!(weapon_index = self.index, field = %key, "ignoring unknown weapon field");
            }
        }

        Ok(WeaponRecord {
            name: self.string("name")?,
            base_dice: self.dice("base_dice", true)?,
            attack_steps: self.int_list("attack_steps")?,
            attack_bonus: self.int("attack_bonus", true)?,
            damage_bonus: self.int("damage_bonus", true)?,
            crit_range: self.int("crit_range", true)?,
            crit_multiplier: self.int("crit_multiplier", true)?,
            crit_confirm_bonus: self.int("crit_confirm_bonus", false)?,
            precision_dice: self.dice("precision_dice", false)?,
            precision_damage: self.int("precision_damage", false)?,
            extra_dice: self.dice("extra_dice", false)?,
            extra_crit_dice: self.dice("extra_crit_dice", false)?,
            extra_damage: self.int("extra_damage", false)?,
            extra_crit_damage: self.int("extra_crit_damage", false)?,
            fortification: self.percent("fortification")?,
            precision_immune: self.flag("precision_immune")?,
            fail_chance: self.percent("fail_chance")?,
            damage_reduction: self.int("damage_reduction", false)?,
        })
    }

    fn error(&self, field: &str, reason: impl Into<String>) -> CalcError {
        CalcError::malformed(self.index, field, reason)
    }

    fn required(&self, field: &str) -> CalcResult<&Value> {
        self.table
            .get(field)
            .ok_or_else(|| self.error(field, "missing required field"))
    }

    fn string(&self, field: &str) -> CalcResult<String> {
        match self.required(field)? {
            Value::String(s) => Ok(s.clone()),
            other => Err(self.error(field, format!("expected a string, found {}", other.type_str()))),
        }
    }

    fn integer(&self, field: &str, value: &Value) -> CalcResult<i32> {
        match value {
            Value::Integer(i) => {
                i32::try_from(*i).map_err(|_| self.error(field, format!("{} is out of range", i)))
            }
            other => Err(self.error(field, format!("expected an integer, found {}", other.type_str()))),
        }
    }

    fn int(&self, field: &str, required: bool) -> CalcResult<i32> {
        match self.table.get(field) {
            Some(value) => self.integer(field, value),
            None if required => Err(self.error(field, "missing required field")),
            None => Ok(0),
        }
    }

    fn int_list(&self, field: &str) -> CalcResult<Vec<i32>> {
        match self.required(field)? {
            Value::Array(items) => items.iter().map(|v| self.integer(field, v)).collect(),
            other => Err(self.error(field, format!("expected a list, found {}", other.type_str()))),
        }
    }

    fn dice(&self, field: &str, required: bool) -> CalcResult<Vec<(i64, i64)>> {
        let items = match self.table.get(field) {
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(self.error(field, format!("expected a list, found {}", other.type_str())))
            }
            None if required => return Err(self.error(field, "missing required field")),
            None => return Ok(Vec::new()),
        };

        if items.len() % 2 != 0 {
            return Err(self.error(
                field,
                format!("expected count/sides pairs, found {} values", items.len()),
            ));
        }

        items
            .chunks(2)
            .map(|pair| match (&pair[0], &pair[1]) {
                (Value::Integer(count), Value::Integer(sides)) => Ok((*count, *sides)),
                _ => Err(self.error(field, "dice counts and sides must be integers")),
            })
            .collect()
    }

    fn percent(&self, field: &str) -> CalcResult<f64> {
        match self.table.get(field) {
            None => Ok(0.0),
            Some(Value::Integer(i)) => Ok(*i as f64),
            Some(Value::Float(f)) => Ok(*f),
            Some(other) => Err(self.error(field, format!("expected a number, found {}", other.type_str()))),
        }
    }

    fn flag(&self, field: &str) -> CalcResult<bool> {
        match self.table.get(field) {
            None => Ok(false),
            Some(Value::Boolean(b)) => Ok(*b),
            Some(Value::Integer(0)) => Ok(false),
            Some(Value::Integer(1)) => Ok(true),
            Some(other) => Err(self.error(field, format!("expected true/false or 0/1, found {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::AverageStrategy;

    const TWO_ATTACKS: &str = r#"
[settings]
min_ac = 15
max_ac = 25

[[attacks]]
name = "Base"

[[attacks.weapons]]
name = "Longsword"
base_dice = [1, 8]
attack_steps = [0, -5]
attack_bonus = 10
damage_bonus = 5
crit_range = 19
crit_multiplier = 2

[[attacks]]
name = "Sneak Attack"

[[attacks.weapons]]
name = "Longsword"
base_dice = [1, 8]
attack_steps = [0, -5]
attack_bonus = 10
damage_bonus = 5
crit_range = 19
crit_multiplier = 2
precision_dice = [3, 6]
fortification = 25
precision_immune = 0
fail_chance = 20.0
"#;

    fn malformed(result: Result<SheetDefinition, ConfigError>) -> (usize, String) {
        match result {
            Err(ConfigError::Calc(CalcError::MalformedWeaponRecord {
                weapon_index, field, ..
            })) => (weapon_index, field),
            other => panic!("expected a malformed record, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_two_attacks() {
        let sheet = parse_sheet(TWO_ATTACKS).unwrap();
        assert_eq!(sheet.attacks.len(), 2);
        assert_eq!(sheet.weapon_count(), 2);
        assert_eq!(sheet.settings.min_ac, 15);

        let sneak = &sheet.attacks[1].weapons[0];
        assert_eq!(sneak.precision_dice, vec![(3, 6)]);
        assert!((sneak.fortification - 25.0).abs() < f64::EPSILON);
        assert!((sneak.fail_chance - 20.0).abs() < f64::EPSILON);
        assert!(!sneak.precision_immune);
        assert_eq!(sneak.damage_reduction, 0);

        let table = sheet.build().unwrap();
        assert_eq!(table.absolute().rows.len(), 11);
        assert_eq!(table.delta().columns, vec!["Sneak Attack"]);
    }

    #[test]
    fn test_missing_required_field() {
        let content = TWO_ATTACKS.replacen("crit_multiplier = 2\nprecision_dice", "precision_dice", 1);
        assert_eq!(malformed(parse_sheet(&content)), (1, "crit_multiplier".to_string()));
    }

    #[test]
    fn test_odd_dice_list() {
        let content = TWO_ATTACKS.replacen("base_dice = [1, 8]", "base_dice = [1, 8, 2]", 1);
        assert_eq!(malformed(parse_sheet(&content)), (0, "base_dice".to_string()));
    }

    #[test]
    fn test_non_numeric_value() {
        let content = TWO_ATTACKS.replacen("attack_bonus = 10", "attack_bonus = \"ten\"", 1);
        assert_eq!(malformed(parse_sheet(&content)), (0, "attack_bonus".to_string()));
    }

    #[test]
    fn test_invalid_flag() {
        let content = TWO_ATTACKS.replace("precision_immune = 0", "precision_immune = 2");
        assert_eq!(malformed(parse_sheet(&content)), (1, "precision_immune".to_string()));
    }

    #[test]
    fn test_build_reports_sheet_wide_index() {
        let content = TWO_ATTACKS.replace("fail_chance = 20.0", "fail_chance = 120.0");
        let sheet = parse_sheet(&content).unwrap();
        match sheet.build() {
            Err(CalcError::MalformedWeaponRecord { weapon_index, field, .. }) => {
                assert_eq!(weapon_index, 1);
                assert_eq!(field, "fail_chance");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_no_attacks() {
        let result = parse_sheet("[settings]\nmin_ac = 10\n");
        assert!(matches!(result, Err(ConfigError::Calc(CalcError::EmptyGroupList))));
    }

    #[test]
    fn test_attack_without_weapons() {
        let result = parse_sheet("[[attacks]]\nname = \"Empty\"\n");
        match result {
            Err(ConfigError::Calc(CalcError::EmptyAttackGroup { group })) => assert_eq!(group, "Empty"),
            other => panic!("unexpected result: {:?}", other),
        }

        // An empty attack after a valid one is rejected as well
        let content = format!("{}\n[[attacks]]\nname = \"Nothing\"\nweapons = []\n", TWO_ATTACKS);
        assert!(matches!(
            parse_sheet(&content),
            Err(ConfigError::Calc(CalcError::EmptyAttackGroup { .. }))
        ));
    }

    #[test]
    fn test_ac_override() {
        let sheet = parse_sheet(TWO_ATTACKS).unwrap().with_ac_bounds(None, Some(30));
        assert_eq!(sheet.settings.min_ac, 15);
        assert_eq!(sheet.settings.max_ac, 30);
        let inverted = parse_sheet(TWO_ATTACKS).unwrap().with_ac_bounds(Some(40), None);
        assert!(matches!(inverted.build(), Err(CalcError::InvalidAcRange { .. })));
    }

    #[test]
    fn test_example_sheet_builds() {
        let sheet = example_sheet().unwrap();
        assert!(sheet.attacks.len() >= 2);
        let table = sheet.build().unwrap();
        assert_eq!(table.groups().len(), sheet.attacks.len());
        let enumerated = table
            .groups()
            .iter()
            .flat_map(|g| g.weapons())
            .any(|w| w.strategies().0 == AverageStrategy::ExactEnumeration);
        assert!(enumerated);
    }
}
