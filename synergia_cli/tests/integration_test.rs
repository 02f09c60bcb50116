//! End-to-end checks: config file in, grid out, CSV on disk

use std::fs;
use std::io::Write;

use synergia_cli::export::export_scenario_csv;
use synergia_cli::input::{AttackArgs, DiceNotation};
use synergia_core::config::{load_scenario_config, load_toml};
use synergia_core::{
    analyze_configuration, ArmorTier, ConfigError, CritRule, RollStatus, SimulationConstants,
};
use tempfile::{tempdir, NamedTempFile};

#[test]
fn test_scenario_file_to_csv() {
    let mut config_file = NamedTempFile::new().unwrap();
    write!(
        config_file,
        r#"
max_dice_count = 3
die_sides = [4, 6, 8]
trials_per_cell = 1000
seed = 42

[profile]
armor = "m"
crit_rule = "t"
"#
    )
    .unwrap();

    let scenario = load_scenario_config(config_file.path()).unwrap();
    assert_eq!(scenario.profile.armor, ArmorTier::Medium);
    assert_eq!(scenario.profile.crit_rule, CritRule::Tactical);
    scenario.validate(50).unwrap();

    let grid = scenario.run().unwrap();
    let dir = tempdir().unwrap();
    let csv_path = dir.path().join("synergia_cenario_output.csv");
    export_scenario_csv(&grid, &csv_path).unwrap();

    let csv = fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "Dice Count;d4;d6;d8");
    assert_eq!(lines.len(), 4);
    for (i, line) in lines[1..].iter().enumerate() {
        assert!(line.starts_with(&format!("{}d;", i + 1)));
        assert_eq!(line.split(';').count(), 4);
    }

    // Same seed, same file
    let again = scenario.run().unwrap();
    let second_path = dir.path().join("again.csv");
    export_scenario_csv(&again, &second_path).unwrap();
    assert_eq!(csv, fs::read_to_string(&second_path).unwrap());
}

#[test]
fn test_missing_scenario_file() {
    let dir = tempdir().unwrap();
    let result = load_scenario_config(&dir.path().join("nope.toml"));
    assert!(matches!(result, Err(ConfigError::IoError(_))));
}

#[test]
fn test_constants_file_overrides_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[dice]\nmax_dice_count = 5\n\n[trials]\nsingle_test = 2000").unwrap();

    let constants: SimulationConstants = load_toml(file.path()).unwrap();
    constants.validate().unwrap();
    assert_eq!(constants.dice.max_dice_count, 5);
    assert_eq!(constants.trials.single_test, 2000);
    assert_eq!(constants.trials.scenario, 100_000);

    let args = AttackArgs {
        roll: DiceNotation { count: 6, sides: 6 },
        advantage: 0,
        vicious: false,
        bonus: 0,
        armor: ArmorTier::None,
        crit: CritRule::Epic,
    };
    assert!(args.to_configuration(&constants).is_err());
}

#[test]
fn test_analysis_round_trips_through_json() {
    let args = AttackArgs {
        roll: "3d8".parse().unwrap(),
        advantage: 1,
        vicious: true,
        bonus: 2,
        armor: ArmorTier::Heavy,
        crit: CritRule::Tactical,
    };
    let config = args.to_configuration(&SimulationConstants::default()).unwrap();
    let analysis = analyze_configuration(&config, 2_000).unwrap();

    let json = serde_json::to_value(&analysis).unwrap();
    assert_eq!(json["configuration"]["armor"], "heavy");
    assert_eq!(json["configuration"]["crit_rule"], "tactical");
    assert_eq!(json["estimate"]["trials"], 2000);
    assert!(json["example"]["log"].is_array());

    let status = analysis.example.status;
    assert!(matches!(
        status,
        RollStatus::Miss | RollStatus::Hit | RollStatus::CriticalTactical
    ));
}
