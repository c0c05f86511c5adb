//! Invite and uninvite commands.

use std::path::Path;

use tracing::info;

use crate::cli::{open_vault, output};
use crate::core::domain::RecipientKind;
use crate::core::vault::Invitee;
use crate::error::Result;

/// Invite a user by handle, or a key file under a label with `headless`.
pub fn invite(env: Option<String>, handle: &str, key_file: Option<&Path>, headless: bool) -> Result<()> {
    info!(handle, headless, "inviting");
    let mut vault = open_vault(env)?;
    let keys = super::public_keys(vault.workspace(), handle, key_file)?;

    let kind = if headless {
        RecipientKind::Headless
    } else {
        RecipientKind::User
    };
    let outcome = vault.invite(Invitee {
        kind,
        identity: handle.to_string(),
        keys,
    })?;
    output::warnings(&outcome.warnings);

    output::success(&format!(
        "invited {} to {} ({} key{})",
        output::key(handle),
        output::path(vault.root()),
        outcome.value,
        if outcome.value == 1 { "" } else { "s" }
    ));
    output::hint("commit the updated keys.json");
    Ok(())
}

/// Remove every key of a user or headless label.
pub fn uninvite(env: Option<String>, handle: &str) -> Result<()> {
    info!(handle, "uninviting");
    let mut vault = open_vault(env)?;
    let outcome = vault.uninvite(handle)?;
    output::warnings(&outcome.warnings);
    output::success(&format!(
        "removed {} from {}",
        output::key(handle),
        output::path(vault.root())
    ));
    Ok(())
}
