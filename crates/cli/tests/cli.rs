use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

fn state_db(dir: &TempDir) -> String {
    dir.path().join("tabtidy.sqlite").display().to_string()
}

#[test]
fn config_init_writes_example_file() {
    let dir = TempDir::new().expect("temp dir");
    let config_path = dir.path().join("config.toml");

    let mut cmd = cargo_bin_cmd!("tabtidy");
    cmd.args(["config", "init", "--path"])
        .arg(&config_path)
        .assert()
        .success();

    let content = fs::read_to_string(&config_path).expect("read config");
    assert!(content.contains("base_url"));
    assert!(content.contains("poll_interval_secs"));
}

#[test]
fn config_init_refuses_to_overwrite() {
    let dir = TempDir::new().expect("temp dir");
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, "# existing").expect("write existing");

    let mut cmd = cargo_bin_cmd!("tabtidy");
    cmd.args(["config", "init", "--path"])
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn offline_sort_of_an_empty_window_is_a_noop() {
    let dir = TempDir::new().expect("temp dir");

    let mut cmd = cargo_bin_cmd!("tabtidy");
    cmd.env("TABTIDY__GENERAL__OFFLINE", "true")
        .env("TABTIDY__GENERAL__STATE_DB_PATH", state_db(&dir))
        .arg("sort")
        .assert()
        .success()
        .stdout(predicate::str::contains("no-op"));
}

#[test]
fn offline_watch_once_succeeds() {
    let dir = TempDir::new().expect("temp dir");

    let mut cmd = cargo_bin_cmd!("tabtidy");
    cmd.env("TABTIDY__GENERAL__OFFLINE", "true")
        .env("TABTIDY__GENERAL__STATE_DB_PATH", state_db(&dir))
        .args(["watch", "--once"])
        .assert()
        .success();
}

#[test]
fn doctor_fails_when_bridge_is_unreachable() {
    let dir = TempDir::new().expect("temp dir");

    let mut cmd = cargo_bin_cmd!("tabtidy");
    cmd.env("TABTIDY__GENERAL__STATE_DB_PATH", state_db(&dir))
        .env("TABTIDY__BRIDGE__BASE_URL", "http://127.0.0.1:1")
        .env("TABTIDY__BRIDGE__TIMEOUT_SECS", "1")
        .arg("doctor")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Bridge unreachable"));
}

#[test]
fn doctor_json_reports_warn_in_offline_mode() {
    let dir = TempDir::new().expect("temp dir");

    let mut cmd = cargo_bin_cmd!("tabtidy");
    let output = cmd
        .env("TABTIDY__GENERAL__OFFLINE", "true")
        .env("TABTIDY__GENERAL__STATE_DB_PATH", state_db(&dir))
        .args(["doctor", "--json"])
        .output()
        .expect("run doctor");

    assert!(output.status.success());

    let value: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(value["overall"], "warn");
    assert_eq!(value["snapshot_store"]["status"], "ok");
    assert_eq!(value["bridge"]["status"], "warn");
}
