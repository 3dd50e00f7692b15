//! Integration tests for `lexbr config`.

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_config_path_command() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("lexbr")
        .env("LEXBR_HOME", dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_creates_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    assert!(!config_path.exists());

    cargo_bin_cmd!("lexbr")
        .env("LEXBR_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config at"));

    assert!(config_path.exists());

    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("model ="));
    assert!(contents.contains("request_timeout_secs ="));
}

#[test]
fn test_config_init_fails_if_exists() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    fs::write(&config_path, "# existing config").unwrap();

    cargo_bin_cmd!("lexbr")
        .env("LEXBR_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_config_set_model_updates_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    fs::write(
        &config_path,
        "# my config\nmodel = \"gpt-4o\"\nmax_tokens = 2048\n",
    )
    .unwrap();

    cargo_bin_cmd!("lexbr")
        .env("LEXBR_HOME", dir.path())
        .args(["config", "set-model", "gpt-4o-mini"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Model set to gpt-4o-mini"));

    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("gpt-4o-mini"));
    assert!(contents.contains("# my config")); // comments preserved
    assert!(contents.contains("max_tokens = 2048")); // fields preserved
}
