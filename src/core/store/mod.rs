//! Persisted environment state.
//!
//! Every environment is a directory under `.strata/` holding JSON files:
//!
//! ```text
//! .strata/<env>/keys.json               keyring (root environments only)
//! .strata/<env>/overlay.json            { "base": "<env>" }, marks an overlay
//! .strata/<env>/secrets.json            shared sealed values
//! .strata/<env>/personal_secrets.json   this user's sealed values (git-ignored)
//! ```
//!
//! Writes replace the whole file atomically (temp file + rename). There is
//! no locking: concurrent writers race and the last rename wins.

use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{debug, trace};

use crate::error::{Result, StoreError};

mod keyring;
mod overlay;
mod secrets;

pub use keyring::Keyring;
pub use overlay::OverlayConfig;
pub use secrets::SecretsFile;

/// Read and parse a JSON file.
///
/// # Returns
///
/// `None` if the file does not exist.
///
/// # Errors
///
/// Returns `StoreError::Corrupted` if the contents do not parse.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            trace!(path = %path.display(), "not found");
            return Ok(None);
        }
        Err(source) => {
            return Err(StoreError::ReadFailed {
                path: path.to_path_buf(),
                source,
            }
            .into())
        }
    };

    serde_json::from_str(&contents)
        .map(Some)
        .map_err(|source| {
            StoreError::Corrupted {
                path: path.to_path_buf(),
                source,
            }
            .into()
        })
}

/// Serialize `value` and atomically replace `path`, creating parent
/// directories as needed.
pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T, what: &'static str) -> Result<()> {
    let mut json =
        serde_json::to_string_pretty(value).map_err(|source| StoreError::Serialize { what, source })?;
    json.push('\n');

    let dir = path
        .parent()
        .ok_or_else(|| StoreError::NotFound(path.to_path_buf()))?;
    let write_failed = |source| StoreError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    std::fs::create_dir_all(dir).map_err(write_failed)?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_failed)?;
    tmp.write_all(json.as_bytes()).map_err(write_failed)?;
    tmp.as_file().sync_all().map_err(write_failed)?;
    tmp.persist(path).map_err(|e| write_failed(e.error))?;

    debug!(path = %path.display(), what, "saved");
    Ok(())
}
