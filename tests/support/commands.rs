//! Command helper methods for Test.

use std::process::Output;

use assert_cmd::Command;

use super::{Test, ALICE, LOCAL};

impl Test {
    /// A strata command run as alice in the `local` environment.
    pub fn cmd(&self) -> Command {
        self.cmd_as(ALICE)
    }

    /// A strata command run with `person`'s key directory.
    ///
    /// Sets:
    /// - HOME and USERPROFILE to the temporary home
    /// - STRATA_SSH_DIR to the person's key directory
    /// - STRATA_ENV to `local`
    /// - the project directory as working directory
    pub fn cmd_as(&self, person: &str) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("strata").expect("failed to find strata binary");
        cmd.env("HOME", self.home.path());
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("STRATA_SSH_DIR", self.key_dir(person));
        cmd.env("STRATA_ENV", LOCAL);
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("STRATA_LOG");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// `strata init <env> --user alice --key <alice's pub>`
    pub fn init_cmd(&self, env: &str) -> Output {
        let key = self.key_dir(ALICE).join("id_rsa.pub");
        self.cmd()
            .args(["init", env, "--user", ALICE, "--key"])
            .arg(key)
            .output()
            .expect("failed to run strata init")
    }

    pub fn overlay(&self, name: &str, base: &str) -> Output {
        self.cmd()
            .args(["overlay", name, base])
            .output()
            .expect("failed to run strata overlay")
    }

    pub fn set(&self, key: &str, val: &str) -> Output {
        self.cmd()
            .args(["set", key, val])
            .output()
            .expect("failed to run strata set")
    }

    pub fn set_in(&self, env: &str, key: &str, val: &str) -> Output {
        self.cmd()
            .args(["-e", env, "set", key, val])
            .output()
            .expect("failed to run strata set")
    }

    pub fn set_personal(&self, key: &str, val: &str) -> Output {
        self.cmd()
            .args(["set", key, val, "--personal"])
            .output()
            .expect("failed to run strata set --personal")
    }

    pub fn get(&self, key: &str) -> Output {
        self.cmd()
            .args(["get", key])
            .output()
            .expect("failed to run strata get")
    }

    pub fn get_in(&self, env: &str, key: &str) -> Output {
        self.cmd()
            .args(["-e", env, "get", key])
            .output()
            .expect("failed to run strata get")
    }

    pub fn rm(&self, key: &str) -> Output {
        self.cmd()
            .args(["rm", key])
            .output()
            .expect("failed to run strata rm")
    }

    pub fn envfile(&self) -> Output {
        self.cmd()
            .arg("envfile")
            .output()
            .expect("failed to run strata envfile")
    }

    /// `strata invite <handle> --key <file>`
    pub fn invite(&self, handle: &str, key_file: &std::path::Path) -> Output {
        self.cmd()
            .args(["invite", handle, "--key"])
            .arg(key_file)
            .output()
            .expect("failed to run strata invite")
    }

    pub fn uninvite(&self, handle: &str) -> Output {
        self.cmd()
            .args(["uninvite", handle])
            .output()
            .expect("failed to run strata uninvite")
    }

    pub fn list_invites(&self) -> Output {
        self.cmd()
            .arg("list-invites")
            .output()
            .expect("failed to run strata list-invites")
    }

    /// `strata run -- <command>`
    pub fn run(&self, command: &[&str]) -> Output {
        let mut cmd = self.cmd();
        cmd.arg("run").arg("--");
        for arg in command {
            cmd.arg(arg);
        }
        cmd.output().expect("failed to run strata run")
    }
}
