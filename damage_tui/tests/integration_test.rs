//! Integration test: TOML sheet -> weapons -> attack groups -> result tables -> export
//!
//! Validates the full flow the command-line tool runs, through the public API.

use damage_core::{
    load_sheet, parse_sheet, AverageStrategy, CalcError, ConfigError, SheetExport,
};

const SHEET: &str = r#"
[settings]
min_ac = 10
max_ac = 30

[[attacks]]
name = "Longsword"

[[attacks.weapons]]
name = "Longsword"
base_dice = [1, 8]
attack_steps = [0]
attack_bonus = 10
damage_bonus = 5
crit_range = 20
crit_multiplier = 2

[[attacks]]
name = "Two Weapons"

[[attacks.weapons]]
name = "Longsword"
base_dice = [1, 8]
attack_steps = [-2, -7]
attack_bonus = 10
damage_bonus = 5
crit_range = 19
crit_multiplier = 2

[[attacks.weapons]]
name = "Handaxe"
base_dice = [1, 6]
attack_steps = [-2]
attack_bonus = 10
damage_bonus = 2
crit_range = 20
crit_multiplier = 3

[[attacks]]
name = "Against DR 10"

[[attacks.weapons]]
name = "Longsword"
base_dice = [1, 8]
attack_steps = [0]
attack_bonus = 10
damage_bonus = 5
crit_range = 20
crit_multiplier = 2
damage_reduction = 10
"#;

/// Helper to print a separator
fn separator(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("  {}", title);
    println!("{}\n", "=".repeat(60));
}

#[test]
fn test_full_flow() {
    separator("STEP 1: Parse sheet");
    let sheet = parse_sheet(SHEET).expect("sheet should parse");
    assert_eq!(sheet.attacks.len(), 3);
    assert_eq!(sheet.weapon_count(), 4);
    for attack in &sheet.attacks {
        println!("  {} ({} weapons)", attack.name, attack.weapons.len());
    }

    separator("STEP 2: Build result table");
    let table = sheet.build().expect("sheet should compute");
    assert_eq!(table.absolute().rows.len(), 21);
    assert_eq!(
        table.absolute().columns,
        vec!["Longsword", "Two Weapons", "Against DR 10"]
    );
    for summary in table.attack_summaries() {
        println!("  {}", summary);
    }

    separator("STEP 3: Check the single longsword at AC 20");
    let longsword = &table.groups()[0].weapons()[0];
    assert!((longsword.avg_damage_hit() - 9.5).abs() < 1e-12);
    assert!((longsword.avg_damage_crit() - 19.0).abs() < 1e-12);
    // hit 0.55, crit 0.05 * 0.55
    let at_20 = table.groups()[0].total_at(20).unwrap();
    println!("  Expected damage at AC 20: {:.5}", at_20);
    assert!((at_20 - 5.48625).abs() < 1e-9);

    separator("STEP 4: Attack group totals");
    let twf = &table.groups()[1];
    for ac in table.ac_range().iter() {
        let sum: f64 = twf
            .weapons()
            .iter()
            .map(|w| w.results().full_attack_at(ac).unwrap())
            .sum();
        assert!((twf.total_at(ac).unwrap() - sum).abs() < 1e-9);
    }

    separator("STEP 5: Difference table");
    let delta = table.delta();
    assert_eq!(delta.columns, vec!["Two Weapons", "Against DR 10"]);
    for (abs_row, delta_row) in table.absolute().rows.iter().zip(&delta.rows) {
        assert_eq!(abs_row.ac, delta_row.ac);
        assert_eq!(delta_row.values[0], abs_row.values[1] - abs_row.values[0]);
        assert_eq!(delta_row.values[1], abs_row.values[2] - abs_row.values[0]);
        // damage reduction never helps
        assert!(delta_row.values[1] <= 0.0);
    }

    separator("STEP 6: Damage reduction strategy");
    let reduced = &table.groups()[2].weapons()[0];
    // 1d8 + 5 can roll below 10
    assert_eq!(reduced.strategies().0, AverageStrategy::ExactEnumeration);
    // max(r + 5 - 10, 0) for r in 1..=8: (1 + 2 + 3) / 8
    assert!((reduced.avg_damage_hit() - 0.75).abs() < 1e-12);
    // 2d8 + 10 never rolls below 10
    assert_eq!(reduced.strategies().1, AverageStrategy::ClosedForm);
    assert!((reduced.avg_damage_crit() - 9.0).abs() < 1e-12);

    separator("STEP 7: JSON export");
    let json = table.to_json().expect("export should serialize");
    let export: SheetExport = serde_json::from_str(&json).expect("export should parse");
    assert_eq!(export.baseline, "Longsword");
    assert_eq!(export.weapons.len(), 4);
    assert_eq!(export.weapons[2].weapon, "Handaxe");
    assert_eq!(export.weapons[2].summary_crit, "+8, 3d6+6");
    println!("  {} bytes of JSON", json.len());
}

#[test]
fn test_monotone_in_ac() {
    let table = parse_sheet(SHEET).unwrap().build().unwrap();
    for column in 0..table.absolute().columns.len() {
        let values = table.absolute().column(column).unwrap();
        assert!(values.windows(2).all(|w| w[0] >= w[1] - 1e-12));
    }
}

#[test]
fn test_load_sheet_from_file() {
    let path = std::env::temp_dir().join(format!("damage_tui_sheet_{}.toml", std::process::id()));
    std::fs::write(&path, SHEET).unwrap();
    let sheet = load_sheet(&path);
    let _ = std::fs::remove_file(&path);
    let table = sheet.unwrap().build().unwrap();
    assert_eq!(table.groups().len(), 3);
}

#[test]
fn test_missing_file() {
    let path = std::env::temp_dir().join("damage_tui_missing_sheet.toml");
    assert!(matches!(load_sheet(&path), Err(ConfigError::IoError(_))));
}

#[test]
fn test_malformed_weapon_index_across_attacks() {
    // Fourth weapon of the sheet
    let content = SHEET.replace("damage_reduction = 10", "damage_reduction = \"lots\"");
    match parse_sheet(&content) {
        Err(ConfigError::Calc(CalcError::MalformedWeaponRecord {
            weapon_index, field, ..
        })) => {
            assert_eq!(weapon_index, 3);
            assert_eq!(field, "damage_reduction");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_inverted_ac_bounds() {
    let sheet = parse_sheet(SHEET).unwrap().with_ac_bounds(Some(35), None);
    assert_eq!(
        sheet.build().unwrap_err(),
        CalcError::InvalidAcRange {
            min_ac: 35,
            max_ac: 30
        }
    );
}
