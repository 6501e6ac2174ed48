//! Command line behavior that needs no external tools.

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("codepush_bundle").unwrap();
    cmd.env_remove("CODEPUSH_BUNDLE_PLATFORM")
        .env_remove("CODEPUSH_BUNDLE_HERMES")
        .env_remove("CODEPUSH_BUNDLE_TIMEOUT");
    cmd
}

#[test]
fn help_lists_pipeline_flags() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--platform"))
        .stdout(predicate::str::contains("--hermes"))
        .stdout(predicate::str::contains("--skip-install"));
}

#[test]
fn platform_is_required() {
    cmd()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--platform"));
}

#[test]
fn unknown_platform_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    cmd()
        .args(["--platform", "web", "--skip-install", "--project-dir"])
        .arg(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid platform \"web\""));
}

#[test]
fn unknown_hermes_mode_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    cmd()
        .args(["--platform", "ios", "--hermes", "sometimes", "--skip-install", "--project-dir"])
        .arg(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid Hermes mode"));
}

#[test]
fn missing_package_json_fails_detection() {
    let dir = tempfile::tempdir().unwrap();
    cmd()
        .args(["--platform", "android", "--skip-install", "--project-dir"])
        .arg(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no package.json found"));
}

#[test]
fn unknown_project_kind_prints_hint() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("package.json"),
        r#"{"dependencies": {"left-pad": "1.3.0"}}"#,
    )
    .unwrap();
    cmd()
        .args(["--platform", "ios", "--skip-install", "--json", "--project-dir"])
        .arg(dir.path())
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("could not determine project type"))
        .stderr(predicate::str::contains("react-native or expo"));
}

#[test]
fn zero_timeout_is_rejected() {
    cmd()
        .args(["--platform", "ios", "--timeout", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--timeout must be at least 1 second"));
}

#[test]
fn verbose_echoes_resolved_options() {
    let dir = tempfile::tempdir().unwrap();
    cmd()
        .args(["--platform", "ios", "--hermes", "off", "--skip-install", "--verbose"])
        .arg("--project-dir")
        .arg(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Options: BundleOptions"))
        .stderr(predicate::str::contains("hermes: Off"));
}

#[test]
fn missing_project_dir_is_a_detection_error() {
    let dir = tempfile::tempdir().unwrap();
    cmd()
        .args(["--platform", "android", "--project-dir"])
        .arg(dir.path().join("nope"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("project directory does not exist"));
}
