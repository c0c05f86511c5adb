//! Key fixtures for unit tests.
//!
//! RSA generation is slow, so a few 2048-bit keys are generated once per
//! test binary and shared.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use rand::rngs::OsRng;
use rsa::pkcs1::EncodeRsaPrivateKey;
use rsa::pkcs8::EncodePrivateKey;
use rsa::RsaPrivateKey;
use ssh_key::private::{Ed25519Keypair, KeypairData, RsaKeypair};
use ssh_key::public::KeyData;
use tempfile::TempDir;

use crate::core::config::Workspace;

const KEY_COUNT: usize = 3;

static KEYS: OnceLock<Vec<RsaPrivateKey>> = OnceLock::new();

/// One of a fixed set of RSA keys.
pub fn rsa_key(index: usize) -> &'static RsaPrivateKey {
    let keys = KEYS.get_or_init(|| {
        (0..KEY_COUNT)
            .map(|_| RsaPrivateKey::new(&mut OsRng, 2048).unwrap())
            .collect()
    });
    &keys[index]
}

/// `ssh-rsa AAAA... comment`
pub fn authorized_line(key: &RsaPrivateKey, comment: &str) -> String {
    let public = ssh_key::public::RsaPublicKey::try_from(&key.to_public_key()).unwrap();
    ssh_key::PublicKey::new(KeyData::Rsa(public), comment)
        .to_openssh()
        .unwrap()
}

pub fn pkcs1_pem(key: &RsaPrivateKey) -> String {
    key.to_pkcs1_pem(rsa::pkcs1::LineEnding::LF)
        .unwrap()
        .to_string()
}

pub fn pkcs8_pem(key: &RsaPrivateKey) -> String {
    key.to_pkcs8_pem(rsa::pkcs8::LineEnding::LF)
        .unwrap()
        .to_string()
}

pub fn openssh_pem(key: &RsaPrivateKey) -> String {
    let keypair = RsaKeypair::try_from(key).unwrap();
    ssh_key::PrivateKey::new(KeypairData::Rsa(keypair), "test")
        .unwrap()
        .to_openssh(ssh_key::LineEnding::LF)
        .unwrap()
        .to_string()
}

fn ed25519_private() -> ssh_key::PrivateKey {
    let keypair = Ed25519Keypair::from_seed(&[3u8; 32]);
    ssh_key::PrivateKey::new(KeypairData::Ed25519(keypair), "ed").unwrap()
}

pub fn ed25519_authorized_line() -> String {
    ed25519_private().public_key().to_openssh().unwrap()
}

pub fn ed25519_openssh_pem() -> String {
    ed25519_private()
        .to_openssh(ssh_key::LineEnding::LF)
        .unwrap()
        .to_string()
}

/// Write `<name>` and `<name>.pub` into `dir` for key `index`.
pub fn install_key(dir: &Path, name: &str, index: usize) -> String {
    std::fs::create_dir_all(dir).unwrap();
    let key = rsa_key(index);
    let public = authorized_line(key, &format!("{}@test", name));
    std::fs::write(dir.join(name), pkcs1_pem(key)).unwrap();
    std::fs::write(dir.join(format!("{}.pub", name)), format!("{}\n", public)).unwrap();
    public
}

/// Like [`install_key`], with the private half in the OpenSSH container
/// `ssh-keygen` writes by default.
pub fn install_openssh_key(dir: &Path, name: &str, index: usize) -> String {
    std::fs::create_dir_all(dir).unwrap();
    let key = rsa_key(index);
    let public = authorized_line(key, &format!("{}@test", name));
    std::fs::write(dir.join(name), openssh_pem(key)).unwrap();
    std::fs::write(dir.join(format!("{}.pub", name)), format!("{}\n", public)).unwrap();
    public
}

/// A temporary `.strata/` with an empty local key directory.
pub struct Sandbox {
    pub dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn store_dir(&self) -> PathBuf {
        self.dir.path().join(".strata")
    }

    pub fn key_dir(&self) -> PathBuf {
        self.dir.path().join("ssh")
    }

    /// Workspace that sees the local key directory.
    pub fn workspace(&self) -> Workspace {
        Workspace::new(self.store_dir(), self.key_dir())
    }

    /// Workspace of someone holding only key `index`.
    pub fn workspace_for(&self, person: &str, index: usize) -> Workspace {
        let dir = self.dir.path().join(format!("ssh-{}", person));
        install_key(&dir, "id_rsa", index);
        Workspace::new(self.store_dir(), dir)
    }
}
