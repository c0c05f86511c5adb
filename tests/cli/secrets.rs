//! Tests for `strata set/get/rm`.

use predicates::prelude::*;

use crate::support::*;

#[test]
fn test_set_and_get_roundtrip() {
    let t = Test::init();

    let output = t.set("DATABASE_URL", "postgres://localhost/db");
    assert_success(&output);
    assert_stderr_contains(&output, "set DATABASE_URL in local");

    assert_value(&t, "DATABASE_URL", "postgres://localhost/db");
}

#[test]
fn test_values_are_encrypted_at_rest() {
    let t = Test::with_secrets(STANDARD_SECRETS);

    let secrets = t.read(&t.env_file(LOCAL, "secrets.json"));
    for (name, value) in STANDARD_SECRETS {
        assert!(secrets.contains(name));
        assert!(!secrets.contains(value));
    }
}

#[test]
fn test_set_overwrites() {
    let t = Test::with_secrets(&[("KEY", "old")]);

    assert_success(&t.set("KEY", "new"));

    assert_value(&t, "KEY", "new");
}

#[test]
fn test_set_from_stdin() {
    let t = Test::init();

    t.cmd()
        .args(["set", "PIPED"])
        .write_stdin("from-stdin\n")
        .assert()
        .success();

    assert_value(&t, "PIPED", "from-stdin");
}

#[test]
fn test_invalid_names_rejected() {
    let t = Test::init();

    assert_failure(&t.set("123BAD", "value"));
    assert_failure(&t.set("KEY-WITH-DASH", "value"));
    assert_failure(&t.set("KEY.WITH.DOT", "value"));
}

#[test]
fn test_get_prints_value_without_newline() {
    let t = Test::init();
    assert_success(&t.set("TEMPLATE", "host=db port=5432"));

    let output = t.get("TEMPLATE");
    assert_success(&output);
    assert_eq!(output.stdout, b"host=db port=5432");
}

#[test]
fn test_get_missing_suggests() {
    let t = Test::with_secrets(&[("DATABASE_URL", "x")]);

    t.cmd()
        .args(["get", "DATABASE"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("did you mean: DATABASE_URL"));
}

#[test]
fn test_rm_removes() {
    let t = Test::with_secrets(&[("GONE", "x"), ("KEPT", "y")]);

    assert_success(&t.rm("GONE"));

    assert_failure(&t.get("GONE"));
    assert_value(&t, "KEPT", "y");
}

#[test]
fn test_rm_missing_fails() {
    let t = Test::init();
    let output = t.rm("NOPE");
    assert_failure(&output);
    assert_stderr_contains(&output, "NOPE does not exist");
}

#[test]
fn test_personal_value_stays_out_of_shared_file() {
    let t = Test::init();

    assert_success(&t.set_personal("TOKEN", "alice-token"));

    assert_value(&t, "TOKEN", "alice-token");
    let shared = t.read(&t.env_file(LOCAL, "secrets.json"));
    assert!(shared.contains("\"name\": \"TOKEN\""));
    assert!(shared.contains("\"personal\": true"));
    assert!(!shared.contains("\"value\""));
    assert!(t.env_file(LOCAL, "personal_secrets.json").exists());
}

#[test]
fn test_shared_cannot_become_personal() {
    let t = Test::with_secrets(&[("SHARED", "x")]);

    let output = t.set_personal("SHARED", "mine");
    assert_failure(&output);
    assert_stderr_contains(&output, "SHARED is shared");
    assert_stderr_contains(&output, "strata rm SHARED");
    assert_value(&t, "SHARED", "x");
}

#[test]
fn test_personal_stays_personal() {
    let t = Test::init();
    assert_success(&t.set_personal("TOKEN", "one"));

    let output = t.set("TOKEN", "two");
    assert_success(&output);
    assert_stderr_contains(&output, "TOKEN is personal");

    assert_value(&t, "TOKEN", "two");
    let shared = t.read(&t.env_file(LOCAL, "secrets.json"));
    assert!(!shared.contains("\"value\""));
}

#[test]
fn test_unknown_integration_rejected() {
    let t = Test::init();

    t.cmd()
        .args(["set", "REF", "x://y", "-i", "lastpass"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown integration"));
}

#[test]
fn test_unconfigured_integration_degrades() {
    let t = Test::init();
    assert_success(
        &t.cmd()
            .args(["set", "OP_REF", "op://vault/item/field", "-i", "1password"])
            .output()
            .unwrap(),
    );

    t.cmd()
        .args(["get", "OP_REF"])
        .assert()
        .success()
        .stdout("ERROR see terminal output")
        .stderr(predicate::str::contains("could not resolve OP_REF"));
}
