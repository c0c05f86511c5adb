//! Machine recipient commands.

use std::path::Path;

use tracing::info;

use crate::cli::{open_vault, output};
use crate::core::lookup;
use crate::error::{Error, Result};

/// Add a machine from its public key file.
pub fn add(env: Option<String>, name: &str, key_file: &Path) -> Result<()> {
    info!(name, key = %key_file.display(), "adding machine");
    let mut vault = open_vault(env)?;

    let mut keys = lookup::read_key_file(key_file)?;
    if keys.len() != 1 {
        return Err(Error::Other(format!(
            "expected one public key in {}, found {}",
            key_file.display(),
            keys.len()
        )));
    }
    let key = keys.remove(0);

    let outcome = vault.add_machine(name, key)?;
    output::warnings(&outcome.warnings);
    output::success(&format!(
        "added machine {} to {}",
        output::key(name),
        output::path(vault.root())
    ));
    Ok(())
}

/// Remove a machine.
pub fn rm(env: Option<String>, name: &str) -> Result<()> {
    info!(name, "removing machine");
    let mut vault = open_vault(env)?;
    let outcome = vault.remove_machine(name)?;
    output::warnings(&outcome.warnings);
    output::success(&format!(
        "removed machine {} from {}",
        output::key(name),
        output::path(vault.root())
    ));
    Ok(())
}
