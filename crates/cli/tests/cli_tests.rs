use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("prompt-curator").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Curate text-to-image prompts"));
}

#[test]
fn test_cli_serve_help() {
    let mut cmd = Command::cargo_bin("prompt-curator").unwrap();
    cmd.arg("serve").arg("--help").assert().success().stdout(predicate::str::contains("port"));
}

#[test]
fn test_cli_list_rejects_unknown_sort() {
    let mut cmd = Command::cargo_bin("prompt-curator").unwrap();
    cmd.args(["list", "--sort", "random"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown sort order"));
}

#[test]
fn test_cli_health_fails_without_server() {
    let mut cmd = Command::cargo_bin("prompt-curator").unwrap();
    cmd.args(["--url", "http://127.0.0.1:9", "health"])
        .env("RUST_LOG", "off")
        .assert()
        .failure()
        .stderr(predicate::str::contains("HTTP request failed"));
}
