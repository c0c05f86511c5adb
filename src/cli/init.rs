//! Environment creation commands.

use std::path::Path;

use tracing::info;

use crate::cli::{output, team};
use crate::core::config::Workspace;
use crate::core::overlay;
use crate::core::vault::{init_environment, Invitee};
use crate::error::Result;

/// Create a root environment readable by `user`.
pub fn init(environment: &str, user: &str, key_file: Option<&Path>) -> Result<()> {
    info!(environment, user, "initializing environment");
    let ws = Workspace::open_or_create()?;
    let keys = team::public_keys(&ws, user, key_file)?;

    let outcome = init_environment(&ws, environment, Invitee::user(user, keys))?;
    output::warnings(&outcome.warnings);

    output::success(&format!(
        "created {} for {}",
        output::path(environment),
        output::key(user)
    ));
    output::hint(&format!(
        "commit .strata/{}/keys.json, then: {}",
        environment,
        output::cmd(&format!("strata -e {} set NAME VALUE", environment))
    ));
    Ok(())
}

/// Create `name` layered on top of `base`.
pub fn overlay(name: &str, base: &str) -> Result<()> {
    info!(name, base, "creating overlay");
    let ws = Workspace::discover()?;
    overlay::create_overlay(&ws, name, base)?;
    output::success(&format!(
        "created {} on top of {}",
        output::path(name),
        output::path(base)
    ));
    Ok(())
}
