//! Test support utilities for strata integration tests.
//!
//! Provides isolated workspaces, key fixtures and command shortcuts.

#![allow(dead_code)]

pub mod commands;
pub mod fixtures;
pub mod keys;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Test environment with isolated temp directories.
///
/// Each test gets its own project dir and home dir. Child processes get
/// `.current_dir()` and explicit environment variables, so tests can run
/// in parallel.
pub struct Test {
    /// Project directory; `.strata/` is created here
    pub dir: TempDir,
    /// Home directory holding one key directory per person
    pub home: TempDir,
}

impl Test {
    /// Empty project, with alice's key installed.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let home = TempDir::new().expect("failed to create temp home");
        let t = Self { dir, home };
        keys::install(&t.key_dir(ALICE), 0);
        t
    }

    /// Project with `local` created for alice.
    pub fn init() -> Self {
        let t = Self::new();
        let output = t.init_cmd(LOCAL);
        assert!(
            output.status.success(),
            "Failed to initialize: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        t
    }

    /// Project with `local` created and shared secrets set.
    pub fn with_secrets(secrets: &[(&str, &str)]) -> Self {
        let t = Self::init();
        for (k, v) in secrets {
            let output = t.set(k, v);
            assert!(
                output.status.success(),
                "Failed to set secret {}: {}",
                k,
                String::from_utf8_lossy(&output.stderr)
            );
        }
        t
    }

    /// Key directory of `person`.
    pub fn key_dir(&self, person: &str) -> PathBuf {
        self.home.path().join(format!("ssh-{}", person))
    }

    /// Install key `index` for `person`, returning the public line.
    pub fn add_person(&self, person: &str, index: usize) -> String {
        keys::install(&self.key_dir(person), index)
    }

    /// Write a public key file into the project dir.
    pub fn write_pub(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, format!("{}\n", contents)).expect("failed to write key file");
        path
    }

    pub fn store(&self) -> PathBuf {
        self.dir.path().join(".strata")
    }

    pub fn env_file(&self, env: &str, file: &str) -> PathBuf {
        self.store().join(env).join(file)
    }

    pub fn read(&self, path: &Path) -> String {
        std::fs::read_to_string(path).expect("failed to read file")
    }
}
