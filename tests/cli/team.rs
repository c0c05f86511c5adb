//! Tests for invite, uninvite, machine-add, machine-rm and list-invites.

use predicates::prelude::*;

use crate::support::*;

fn with_bob() -> Test {
    let t = Test::with_secrets(&[("SHARED", "for-everyone")]);
    let bob = t.add_person(BOB, 1);
    assert_success(&t.invite(BOB, &t.write_pub("bob.pub", &bob)));
    t
}

#[test]
fn test_invited_user_can_read() {
    let t = with_bob();

    t.cmd_as(BOB)
        .args(["get", "SHARED"])
        .assert()
        .success()
        .stdout("for-everyone");
}

#[test]
fn test_uninvited_user_is_denied() {
    let t = Test::with_secrets(&[("SHARED", "x")]);
    t.add_person(BOB, 1);

    t.cmd_as(BOB)
        .args(["get", "SHARED"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("are you invited?"))
        .stderr(predicate::str::contains("strata -e local invite"));
}

#[test]
fn test_invite_twice_fails() {
    let t = with_bob();

    let output = t.invite(BOB, &t.dir.path().join("bob.pub"));
    assert_failure(&output);
    assert_stderr_contains(&output, "bob is already invited");
}

#[test]
fn test_invite_skips_unusable_keys() {
    let t = Test::init();
    t.add_person(BOB, 1);
    let contents = format!("{}\n{}", keys::ed25519_line(), keys::public_line(1, "bob"));
    let file = t.write_pub("bob.keys", &contents);

    let output = t.invite(BOB, &file);
    assert_success(&output);
    assert_stderr_contains(&output, "skipped a key for bob");
    assert_stderr_contains(&output, "(1 key)");
}

#[test]
fn test_invite_with_only_unusable_keys_fails() {
    let t = Test::init();
    let file = t.write_pub("ed.pub", &keys::ed25519_line());

    let output = t.invite("carol", &file);
    assert_failure(&output);
    assert_stderr_contains(&output, "none of the keys for carol");
}

#[test]
fn test_uninvite_revokes_without_rotating() {
    let t = with_bob();
    let secrets_before = t.read(&t.env_file(LOCAL, "secrets.json"));

    let output = t.uninvite(BOB);
    assert_success(&output);
    assert_stderr_contains(&output, "rotate those secrets");

    assert_eq!(t.read(&t.env_file(LOCAL, "secrets.json")), secrets_before);
    assert_failure(&t.cmd_as(BOB).args(["get", "SHARED"]).output().unwrap());
    assert_value(&t, "SHARED", "for-everyone");
}

#[test]
fn test_uninvite_unknown_fails() {
    let t = Test::init();
    let output = t.uninvite("nobody");
    assert_failure(&output);
    assert_stderr_contains(&output, "nobody is not invited");
}

#[test]
fn test_last_recipient_cannot_be_removed() {
    let t = Test::init();
    let output = t.uninvite(ALICE);
    assert_failure(&output);
    assert_stderr_contains(&output, "without recipients");
}

#[test]
fn test_headless_invite() {
    let t = Test::init();
    let file = t.write_pub("ci.pub", &keys::public_line(2, "ci"));

    t.cmd()
        .args(["invite", "ci-runner", "--headless", "--key"])
        .arg(&file)
        .assert()
        .success();

    let keys_json = t.read(&t.env_file(LOCAL, "keys.json"));
    assert!(keys_json.contains("\"headless\": true"));
}

#[test]
fn test_machine_add_and_rm() {
    let t = Test::init();
    let file = t.write_pub("box.pub", &keys::public_line(2, "root@box"));

    t.cmd()
        .args(["machine-add", "box-1"])
        .arg(&file)
        .assert()
        .success();
    assert!(t
        .read(&t.env_file(LOCAL, "keys.json"))
        .contains("\"machineName\": \"box-1\""));

    t.cmd()
        .args(["machine-rm", "box-1"])
        .assert()
        .success()
        .stderr(predicate::str::contains("removed machine box-1"));
    assert!(!t.read(&t.env_file(LOCAL, "keys.json")).contains("box-1"));
}

#[test]
fn test_machine_key_file_must_hold_one_key() {
    let t = Test::init();
    let contents = format!("{}\n{}", keys::public_line(1, "a"), keys::public_line(2, "b"));
    let file = t.write_pub("two.pub", &contents);

    t.cmd()
        .args(["machine-add", "box-1"])
        .arg(&file)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("expected one public key"));
}

#[test]
fn test_list_invites_groups_by_kind() {
    let t = with_bob();
    let file = t.write_pub("box.pub", &keys::public_line(2, "root@box"));
    assert_success(
        &t.cmd()
            .args(["machine-add", "box-1"])
            .arg(&file)
            .output()
            .unwrap(),
    );

    let output = t.list_invites();
    assert_success(&output);
    let out = stdout(&output);
    let users = out.find("Users").expect("users section");
    let machines = out.find("Machines").expect("machines section");
    assert!(users < machines);
    assert!(out.contains("alice  1 key"));
    assert!(out.contains("bob  1 key"));
    assert!(out.contains("box-1  1 key"));
    assert!(!out.contains("Headless"));
}

#[test]
fn test_list_invites_needs_no_key() {
    let t = with_bob();
    t.add_person("mallory", 2);

    t.cmd_as("mallory")
        .arg("list-invites")
        .assert()
        .success()
        .stdout(predicate::str::contains("alice"));
}

#[test]
fn test_invites_on_overlay_go_to_root() {
    let t = Test::init();
    assert_success(&t.overlay("dev", LOCAL));
    let bob = t.add_person(BOB, 1);
    let file = t.write_pub("bob.pub", &bob);

    t.cmd()
        .args(["-e", "dev", "invite", BOB, "--key"])
        .arg(&file)
        .assert()
        .success();

    assert!(t.read(&t.env_file(LOCAL, "keys.json")).contains("bob"));
    t.cmd_as(BOB)
        .args(["-e", "dev", "list-invites"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dev inherits recipients from local"));
}
