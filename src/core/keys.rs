//! Local private key discovery.
//!
//! Scans a key directory (normally `~/.ssh`) for `*.pub` files and pairs
//! each with its private half, the same file name without `.pub`.

use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::core::cipher::{self, PrivateKey};
use crate::error::{Result, StoreError};

/// A local keypair whose public half is an authorized recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalKey {
    /// Contents of the `.pub` file.
    pub public_key: String,
    /// Path of the private key.
    pub private_path: PathBuf,
}

impl LocalKey {
    pub fn load_private(&self) -> Result<PrivateKey> {
        PrivateKey::load(&self.private_path)
    }
}

/// Every local keypair in `key_dir`, ordered by file name.
///
/// A missing directory yields an empty list. Public keys without a private
/// half are skipped.
pub fn scan(key_dir: &Path) -> Result<Vec<LocalKey>> {
    let entries = match std::fs::read_dir(key_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(dir = %key_dir.display(), "key directory missing");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(StoreError::ReadFailed {
                path: key_dir.to_path_buf(),
                source,
            }
            .into())
        }
    };

    let mut public_paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "pub") && path.is_file())
        .collect();
    public_paths.sort();

    let mut keys = Vec::new();
    for public_path in public_paths {
        let private_path = public_path.with_extension("");
        if !private_path.is_file() {
            trace!(path = %public_path.display(), "no private half, skipping");
            continue;
        }

        let public_key = match std::fs::read_to_string(&public_path) {
            Ok(contents) => contents.trim().to_string(),
            Err(e) => {
                debug!(path = %public_path.display(), error = %e, "unreadable public key");
                continue;
            }
        };

        keys.push(LocalKey {
            public_key,
            private_path,
        });
    }

    Ok(keys)
}

/// Local keypairs whose public key is one of `authorized`.
///
/// Keys are compared on algorithm and key material only. An empty result
/// means the caller is not a recipient. When several match, callers use
/// the first.
pub fn find_usable(key_dir: &Path, authorized: &[&str]) -> Result<Vec<LocalKey>> {
    let wanted: Vec<String> = authorized
        .iter()
        .filter_map(|key| cipher::fingerprint(key))
        .collect();

    let usable: Vec<LocalKey> = scan(key_dir)?
        .into_iter()
        .filter(|local| {
            cipher::fingerprint(&local.public_key).is_some_and(|fp| wanted.contains(&fp))
        })
        .collect();

    debug!(
        dir = %key_dir.display(),
        authorized = authorized.len(),
        usable = usable.len(),
        "local key scan"
    );
    Ok(usable)
}
