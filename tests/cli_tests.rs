//! CLI-level checks for argument handling and fatal-error exit behavior.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn rejects_unknown_target() {
    Command::cargo_bin("chat-packager")
        .unwrap()
        .args(["--target", "installer"])
        .assert()
        .failure();
}

#[test]
fn missing_icon_source_aborts_with_nonzero_exit() {
    // An empty checkout has no icon source, so the first pipeline stage
    // must abort before any artifact is produced.
    let dir = tempfile::tempdir().unwrap();

    Command::cargo_bin("chat-packager")
        .unwrap()
        .args(["--target", "client"])
        .arg("--project-root")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing asset"));

    assert!(!dir.path().join("dist").exists());
}

#[test]
fn nonexistent_project_root_is_rejected() {
    Command::cargo_bin("chat-packager")
        .unwrap()
        .args(["--target", "client", "--project-root", "/no/such/checkout"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid arguments"));
}
