//! Tests for `strata run`.

#![cfg(unix)]

use crate::support::*;

#[test]
fn test_run_injects_env_vars() {
    let t = Test::with_secrets(&[("INJECTED_VAR", "injected_value")]);

    let output = t.run(&["sh", "-c", "echo $INJECTED_VAR"]);
    assert_success(&output);
    assert_eq!(stdout(&output), "injected_value\n");
}

#[test]
fn test_run_inherits_environment() {
    let t = Test::with_secrets(&[("FROM_STRATA", "s")]);

    let output = t
        .cmd()
        .env("FROM_PARENT", "p")
        .args(["run", "--", "sh", "-c", "echo $FROM_PARENT-$FROM_STRATA"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_eq!(stdout(&output), "p-s\n");
}

#[test]
fn test_run_overrides_inherited_value() {
    let t = Test::with_secrets(&[("SHADOWED", "strata")]);

    let output = t
        .cmd()
        .env("SHADOWED", "parent")
        .args(["run", "sh", "-c", "echo $SHADOWED"])
        .output()
        .unwrap();
    assert_eq!(stdout(&output), "strata\n");
}

#[test]
fn test_run_propagates_exit_code() {
    let t = Test::init();

    let output = t.run(&["sh", "-c", "exit 7"]);
    assert_eq!(output.status.code(), Some(7));
}

#[test]
fn test_run_skips_missing_personal() {
    let t = Test::init();
    assert_success(&t.set_personal("TOKEN", "alice-only"));
    let bob = t.add_person(BOB, 1);
    assert_success(&t.invite(BOB, &t.write_pub("bob.pub", &bob)));
    std::fs::remove_file(t.env_file(LOCAL, "personal_secrets.json")).unwrap();

    let output = t
        .cmd_as(BOB)
        .args(["run", "--", "sh", "-c", "test -z \"${TOKEN+set}\""])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stderr_contains(&output, "missing personal values: TOKEN");
}

#[test]
fn test_run_missing_program_fails() {
    let t = Test::init();

    let output = t.run(&["strata-no-such-program"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to start strata-no-such-program");
}

#[test]
fn test_run_requires_command() {
    let t = Test::init();
    t.cmd().arg("run").assert().failure();
}
