use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::str::contains;
use tempfile::tempdir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures")
        .join(name)
        .canonicalize()
        .expect("fixture present")
}

fn cli() -> Command {
    cargo_bin_cmd!("mechlab-cli")
}

/// Command wired to the fixture data with a private config directory so no
/// user settings leak into default builds.
fn prepare_command() -> (Command, tempfile::TempDir) {
    let temp_dir = tempdir().expect("create temp dir");
    let mut cmd = cli();
    cmd.env("MECHLAB_EQUIPMENT_DATA", fixture("equipment.csv"))
        .env("MECHLAB_CHASSIS_DATA", fixture("chassis.json"))
        .env("XDG_CONFIG_HOME", temp_dir.path())
        .env("HOME", temp_dir.path())
        .env_remove("MECHLAB_SETTINGS")
        .env_remove("MECHLAB_ARMOR_PERCENT")
        .env_remove("MECHLAB_ENGINE")
        .env_remove("MECHLAB_HEAT_SINKS")
        .env("RUST_LOG", "error");
    (cmd, temp_dir)
}

#[test]
fn lists_chassis() {
    let (mut cmd, _temp) = prepare_command();
    cmd.arg("chassis");

    cmd.assert()
        .success()
        .stdout(contains("Available chassis (3):"))
        .stdout(contains("LCT-1V"))
        .stdout(contains("Hunchback"))
        .stdout(contains("150-260"));
}

#[test]
fn lists_equipment() {
    let (mut cmd, _temp) = prepare_command();
    cmd.arg("equipment");

    cmd.assert()
        .success()
        .stdout(contains("Available equipment (22):"))
        .stdout(contains("medium-laser"))
        .stdout(contains("engine-xl-300"));
}

#[test]
fn builds_stock_loadout() {
    let (mut cmd, _temp) = prepare_command();
    cmd.args(["build", "--chassis", "hbk-4g", "--mode", "stock"]);

    cmd.assert()
        .success()
        .stdout(contains("HBK-4G (Stock) [HBK-4G, 50 t] (stock build)"))
        .stdout(contains("ac-20, ammo-ac20, ammo-ac20"))
        .stdout(contains("Tonnage: 50.00 / 50 t"))
        .stdout(contains("Armor: 160 / 169"))
        .stdout(contains("Engine: engine-std-200"));
}

#[test]
fn stock_is_the_default_mode() {
    let (mut cmd, _temp) = prepare_command();
    cmd.args(["build", "--chassis", "JR7-D"]);

    cmd.assert()
        .success()
        .stdout(contains("(stock build)"))
        .stdout(contains("Jump jets: 4"));
}

#[test]
fn builds_empty_loadout() {
    let (mut cmd, _temp) = prepare_command();
    cmd.args(["build", "--chassis", "JR7-D", "--mode", "empty"]);

    cmd.assert()
        .success()
        .stdout(contains("Tonnage: 3.50 / 35 t"))
        .stdout(contains("Armor: 0 / 119"))
        .stdout(contains("Engine: none"));
}

#[test]
fn builds_default_loadout_from_settings_file() {
    let (mut cmd, _temp) = prepare_command();
    cmd.args(["build", "--chassis", "HBK-4G", "--mode", "default", "--settings"])
        .arg(fixture("settings.json"));

    cmd.assert()
        .success()
        .stdout(contains("(default build)"))
        .stdout(contains("Armor: 132 / 169"))
        .stdout(contains("Tonnage: 25.75 / 50 t"))
        .stdout(contains("Heat sinks: 10"));
}

#[test]
fn environment_overrides_settings_file() {
    let (mut cmd, _temp) = prepare_command();
    cmd.env("MECHLAB_ARMOR_PERCENT", "50")
        .args(["build", "--chassis", "HBK-4G", "--mode", "default", "--settings"])
        .arg(fixture("settings.json"));

    cmd.assert()
        .success()
        .stdout(contains("Armor: 84 / 169"))
        .stdout(contains("Tonnage: 22.75 / 50 t"));
}

#[test]
fn default_without_settings_uses_full_armor() {
    let (mut cmd, _temp) = prepare_command();
    cmd.args(["build", "--chassis", "HBK-4G", "--mode", "default"]);

    cmd.assert()
        .success()
        .stdout(contains("Armor: 169 / 169"))
        .stdout(contains("Engine: none"));
}

#[test]
fn default_with_out_of_range_engine_fails() {
    let (mut cmd, _temp) = prepare_command();
    cmd.args(["build", "--chassis", "LCT-1V", "--mode", "default", "--settings"])
        .arg(fixture("settings.json"));

    cmd.assert()
        .failure()
        .stderr(contains("engine rating 200 is outside LCT-1V's range 100..=190"));
}

#[test]
fn malformed_settings_file_fails() {
    let (mut cmd, temp) = prepare_command();
    let settings = temp.path().join("settings.json");
    fs::write(&settings, r#"{"armour_percent": 50}"#).expect("write settings");
    cmd.args(["build", "--chassis", "HBK-4G", "--mode", "default", "--settings"])
        .arg(&settings);

    cmd.assert()
        .failure()
        .stderr(contains("failed to resolve loadout settings"));
}

#[test]
fn clone_mode_prints_json() {
    let (mut cmd, _temp) = prepare_command();
    cmd.args(["--format", "json", "build", "--chassis", "JR7-D", "--mode", "clone"]);

    let output = cmd.output().expect("run mechlab-cli");
    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(value["mode"], "clone");
    assert_eq!(value["chassis"], "JR7-D");
    assert_eq!(value["total_tons"], 34.5);
    assert_eq!(value["engine"], "engine-std-245");
}

#[test]
fn unknown_chassis_suggests_close_match() {
    let (mut cmd, _temp) = prepare_command();
    cmd.args(["build", "--chassis", "HBK-4J"]);

    cmd.assert()
        .failure()
        .stderr(contains("unknown chassis: HBK-4J"))
        .stderr(contains("Did you mean 'HBK-4G'?"));
}

#[test]
fn stock_without_reference_data_fails() {
    let (mut cmd, _temp) = prepare_command();
    cmd.args(["build", "--chassis", "LCT-1V", "--mode", "stock"]);

    cmd.assert()
        .failure()
        .stderr(contains("chassis LCT-1V has no stock loadout data"));
}

#[test]
fn data_dir_must_contain_data_files() {
    let (mut cmd, temp) = prepare_command();
    cmd.arg("--data-dir").arg(temp.path()).arg("chassis");

    cmd.assert()
        .failure()
        .stderr(contains("equipment.csv not found in data directory"));
}

#[test]
fn data_dir_takes_precedence_over_environment() {
    let (mut cmd, temp) = prepare_command();
    let raw = fs::read_to_string(fixture("chassis.json")).expect("read chassis");
    let all: Vec<serde_json::Value> = serde_json::from_str(&raw).expect("chassis array");
    let jenner: Vec<serde_json::Value> = all
        .into_iter()
        .filter(|c| c["name"] == "JR7-D")
        .collect();
    fs::write(
        temp.path().join("chassis.json"),
        serde_json::to_string(&jenner).expect("serialize"),
    )
    .expect("write chassis");
    fs::copy(fixture("equipment.csv"), temp.path().join("equipment.csv"))
        .expect("copy equipment");

    cmd.arg("--data-dir").arg(temp.path()).arg("chassis");

    cmd.assert()
        .success()
        .stdout(contains("Available chassis (1):"))
        .stdout(contains("JR7-D"));
}
