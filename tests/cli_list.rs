//! CLI tests for list mode

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const DEV_UUID: &str = "12345678-ABCD-EF90-1234-567890ABCDEF";
const ENT_UUID: &str = "DEADBEEF-0000-1111-2222-333344445555";

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn profile_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::copy(
        fixture("development.mobileprovision"),
        dir.path().join("dev.mobileprovision"),
    )
    .unwrap();
    fs::copy(
        fixture("enterprise.mobileprovision"),
        dir.path().join("ent.mobileprovision"),
    )
    .unwrap();
    dir
}

fn listprov() -> Command {
    Command::cargo_bin("listprov").unwrap()
}

#[test]
fn table_lists_all_profiles() {
    let dir = profile_dir();
    listprov()
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(DEV_UUID))
        .stdout(predicate::str::contains(ENT_UUID))
        .stdout(predicate::str::contains("2 Provisioning Profiles found."));
}

#[test]
fn corrupt_file_is_reported_without_failing() {
    let dir = profile_dir();
    fs::write(dir.path().join("broken.mobileprovision"), b"garbage").unwrap();

    listprov()
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("2 Provisioning Profiles found."))
        .stdout(predicate::str::contains("broken.mobileprovision"))
        .stdout(predicate::str::contains("\u{274c}"));
}

#[test]
fn expired_and_valid_filters() {
    let dir = profile_dir();
    listprov()
        .arg("--dir")
        .arg(dir.path())
        .arg("--expired")
        .assert()
        .success()
        .stdout(predicate::str::contains(ENT_UUID))
        .stdout(predicate::str::contains(DEV_UUID).not());

    listprov()
        .arg("--dir")
        .arg(dir.path())
        .arg("--valid")
        .assert()
        .success()
        .stdout(predicate::str::contains(DEV_UUID))
        .stdout(predicate::str::contains(ENT_UUID).not());
}

#[test]
fn aps_env_filter_selects_push_profiles() {
    let dir = profile_dir();
    // Specific environment
    listprov()
        .arg("--dir")
        .arg(dir.path())
        .arg("--aps-env")
        .arg("production")
        .assert()
        .success()
        .stdout(predicate::str::contains(DEV_UUID))
        .stdout(predicate::str::contains(ENT_UUID).not());

    // Bare flag: push enabled, any environment. The enterprise fixture has
    // no push entitlement and must never match.
    listprov()
        .arg("--dir")
        .arg(dir.path())
        .arg("--aps-env")
        .assert()
        .success()
        .stdout(predicate::str::contains(DEV_UUID))
        .stdout(predicate::str::contains(ENT_UUID).not());

    listprov()
        .arg("--dir")
        .arg(dir.path())
        .arg("--aps-env")
        .arg("development")
        .assert()
        .success()
        .stdout(predicate::str::contains(DEV_UUID).not())
        .stdout(predicate::str::contains(ENT_UUID).not());
}

#[test]
fn team_filter_matches_name_or_id() {
    let dir = profile_dir();
    listprov()
        .arg("--dir")
        .arg(dir.path())
        .arg("--team")
        .arg("ABCD123456")
        .assert()
        .success()
        .stdout(predicate::str::contains(DEV_UUID))
        .stdout(predicate::str::contains(ENT_UUID).not());

    listprov()
        .arg("--dir")
        .arg(dir.path())
        .arg("--team")
        .arg("Example Enterprise")
        .assert()
        .success()
        .stdout(predicate::str::contains(ENT_UUID))
        .stdout(predicate::str::contains(DEV_UUID).not());
}

#[test]
fn uuid_list_mode() {
    let dir = profile_dir();
    let output = listprov()
        .arg("--dir")
        .arg(dir.path())
        .arg("--uuids")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, vec![DEV_UUID, ENT_UUID]);
}

#[test]
fn uuid_list_mode_with_print0() {
    let dir = profile_dir();
    let output = listprov()
        .arg("--dir")
        .arg(dir.path())
        .arg("--uuids")
        .arg("--print0")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(output).unwrap();
    assert_eq!(text, format!("{DEV_UUID}\0{ENT_UUID}\0"));
}

#[test]
fn path_list_mode_prints_file_paths() {
    let dir = profile_dir();
    listprov()
        .arg("--dir")
        .arg(dir.path())
        .arg("--paths")
        .assert()
        .success()
        .stdout(predicate::str::contains("dev.mobileprovision"))
        .stdout(predicate::str::contains("ent.mobileprovision"));
}

#[test]
fn json_list_output_is_valid_json() {
    let dir = profile_dir();
    fs::write(dir.path().join("broken.mobileprovision"), b"garbage").unwrap();

    let output = listprov()
        .arg("--dir")
        .arg(dir.path())
        .arg("--json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();

    assert_eq!(json["summary"]["scanned"], 3);
    assert_eq!(json["summary"]["matched"], 2);
    assert_eq!(json["summary"]["failed"], 1);
    assert_eq!(json["profiles"].as_array().unwrap().len(), 2);
    assert_eq!(json["profiles"][0]["uuid"], DEV_UUID);
    assert_eq!(json["errors"].as_array().unwrap().len(), 1);
}

#[test]
fn empty_directory_lists_nothing() {
    let dir = TempDir::new().unwrap();
    listprov()
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("0 Provisioning Profiles found."));
}

#[test]
fn conflicting_flags_are_rejected() {
    listprov()
        .arg("--expired")
        .arg("--valid")
        .assert()
        .failure();
}
