//! Tests for error reporting and exit codes.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn modelsmith(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("modelsmith").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join("config"))
        .env("MODELSMITH_CACHE__ROOT", dir.path().join("cache"))
        // Nothing listens on the discard port
        .env("MODELSMITH_SOURCE__API_URL", "http://127.0.0.1:9")
        .env("MODELSMITH_SOURCE__RAW_URL", "http://127.0.0.1:9")
        .env_remove("RUST_LOG")
        .env_remove("GITHUB_TOKEN");
    cmd
}

#[test]
fn setup_without_name_fails_with_message() {
    let tmp = TempDir::new().unwrap();
    modelsmith(&tmp)
        .args(["setup", "--component", "felles", "--package", "kodeverk"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("name parameter missing"));

    assert!(!tmp.path().join("fint-consumer-").exists());
}

#[test]
fn setup_without_component_fails_with_message() {
    let tmp = TempDir::new().unwrap();
    modelsmith(&tmp)
        .args(["setup", "-n", "test"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("component parameter missing"))
        .stderr(predicate::str::contains("Suggestions:"));

    assert!(!tmp.path().join("fint-consumer-test").exists());
}

#[test]
fn unknown_command_is_a_usage_error() {
    let tmp = TempDir::new().unwrap();
    modelsmith(&tmp).arg("frobnicate").assert().code(2);
}

#[test]
fn no_arguments_prints_help_and_fails() {
    let tmp = TempDir::new().unwrap();
    modelsmith(&tmp)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn quiet_and_verbose_conflict() {
    let tmp = TempDir::new().unwrap();
    modelsmith(&tmp)
        .args(["-q", "-v", "listTags"])
        .assert()
        .code(2);
}

#[test]
fn unknown_config_key() {
    let tmp = TempDir::new().unwrap();
    modelsmith(&tmp)
        .args(["config", "get", "nope.nothing"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn missing_config_file_is_a_configuration_error() {
    let tmp = TempDir::new().unwrap();
    modelsmith(&tmp)
        .args(["--config", "does-not-exist.toml", "config", "list"])
        .assert()
        .code(4);
}

#[test]
fn unreachable_source_is_a_retrieval_error() {
    let tmp = TempDir::new().unwrap();
    modelsmith(&tmp)
        .arg("listTags")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Failed to retrieve tags from FINTmodels/fint-informasjonsmodell"));
}

#[test]
fn unreachable_source_fails_list_packages() {
    let tmp = TempDir::new().unwrap();
    modelsmith(&tmp)
        .args(["--tag", "v3.1.0", "listPackages"])
        .assert()
        .code(3);
}

#[test]
fn generated_area_on_top_of_the_cache_is_a_configuration_error() {
    let tmp = TempDir::new().unwrap();
    modelsmith(&tmp)
        .env("MODELSMITH_GENERATION__BASE_PATH", ".")
        .args(["--tag", "v3.1.0", "setup", "-n", "test", "-c", "felles"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("overlaps the artifact cache"));
}
