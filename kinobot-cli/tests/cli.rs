//! Binary smoke tests. No database required: clap handles --help and
//! argument errors before any connection is attempted.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_all_subcommands() {
    Command::cargo_bin("kinobot")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("init")
                .and(predicate::str::contains("user"))
                .and(predicate::str::contains("code"))
                .and(predicate::str::contains("stat"))
                .and(predicate::str::contains("admin"))
                .and(predicate::str::contains("channel")),
        );
}

#[test]
fn unknown_subcommand_fails() {
    Command::cargo_bin("kinobot")
        .unwrap()
        .arg("frobnicate")
        .assert()
        .failure();
}

#[test]
fn channel_add_rejects_unknown_kind() {
    Command::cargo_bin("kinobot")
        .unwrap()
        .args(["channel", "add", "@somewhere", "optional"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn stat_bump_requires_valid_field() {
    Command::cargo_bin("kinobot")
        .unwrap()
        .args(["stat", "bump", "abc", "clicked"])
        .assert()
        .failure();
}
