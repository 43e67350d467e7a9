use assert_cmd::Command;
use camino::Utf8PathBuf;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cli_env() -> (TempDir, Utf8PathBuf, Utf8PathBuf, Utf8PathBuf) {
    let tmp = tempfile::tempdir().unwrap();
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();

    let source = root.join("source");
    let dest = root.join("dest");
    fs::create_dir_all(source.join("sub")).unwrap();
    fs::write(source.join("a.txt"), "alpha").unwrap();
    fs::write(source.join("sub/b.txt"), "beta").unwrap();

    let config_path = root.join("config.json");
    (tmp, config_path, source, dest)
}

fn backup_keeper() -> Command {
    Command::cargo_bin("backup_keeper").unwrap()
}

#[test]
fn run_reports_success_and_exits_zero() {
    let (_tmp, config_path, source, dest) = cli_env();

    backup_keeper()
        .args([
            "--config",
            config_path.as_str(),
            "run",
            "--source",
            source.as_str(),
            "--destination",
            dest.as_str(),
            "--zip",
            "false",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Backup successful"));

    // Overrides are persisted to the store before the run
    let saved = fs::read_to_string(&config_path).unwrap();
    assert!(saved.contains(source.as_str()));
    assert!(saved.contains(dest.as_str()));
}

#[test]
fn run_with_missing_source_exits_nonzero() {
    let (_tmp, config_path, source, dest) = cli_env();
    let missing = source.join("nope");

    backup_keeper()
        .args([
            "--config",
            config_path.as_str(),
            "run",
            "--source",
            missing.as_str(),
            "--destination",
            dest.as_str(),
        ])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Source folder"));
}

#[test]
fn config_show_creates_the_store_with_defaults() {
    let (_tmp, config_path, _source, _dest) = cli_env();

    backup_keeper()
        .args(["--config", config_path.as_str(), "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"version_mode\": \"auto\""))
        .stdout(predicate::str::contains("version.txt"));

    assert!(config_path.exists());
}

#[test]
fn config_set_persists_values() {
    let (_tmp, config_path, _source, _dest) = cli_env();

    backup_keeper()
        .args([
            "--config",
            config_path.as_str(),
            "config",
            "set",
            "--zip",
            "false",
            "--interval",
            "5",
            "--version-mode",
            "manual",
            "--manual-version",
            "Build 7",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"backup_interval_minutes\": 5"));

    let saved = fs::read_to_string(&config_path).unwrap();
    assert!(saved.contains("\"zip\": false"));
    assert!(saved.contains("\"manual_version\": \"Build 7\""));
}

#[test]
fn config_path_can_come_from_the_environment() {
    let (_tmp, config_path, _source, _dest) = cli_env();

    backup_keeper()
        .env("BACKUP_KEEPER_CONFIG", config_path.as_str())
        .args(["config", "show"])
        .assert()
        .success();

    assert!(config_path.exists());
}
