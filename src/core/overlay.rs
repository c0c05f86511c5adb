//! Overlay chain resolution.
//!
//! An overlay names exactly one base environment and inherits its key
//! material. Following bases from any environment ends at a root, the only
//! kind of environment with a keyring.
//!
//! Chains are walked iteratively with a visited set, so a cyclic overlay
//! graph is reported as [`OverlayError::Cycle`] instead of looping.

use tracing::debug;

use crate::core::config::Workspace;
use crate::core::store::OverlayConfig;
use crate::core::validation::validate_env_name;
use crate::error::{OverlayError, Result, StoreError};

/// Whether `env` is an overlay.
pub fn is_overlay(ws: &Workspace, env: &str) -> bool {
    OverlayConfig::path(ws, env).is_file()
}

/// Ordered environments from the root to `env`, inclusive.
///
/// A root yields `[env]`.
///
/// # Errors
///
/// - `OverlayError::Cycle` if a base repeats.
/// - `OverlayError::UnknownEnvironment` if a base does not exist.
/// - `StoreError::Corrupted` if an overlay file does not parse.
pub fn build_chain(ws: &Workspace, env: &str) -> Result<Vec<String>> {
    let mut chain = vec![env.to_string()];
    let mut current = env.to_string();

    while let Some(overlay) = OverlayConfig::load(ws, &current)? {
        let base = overlay.base;
        if chain.contains(&base) {
            chain.push(base);
            return Err(OverlayError::Cycle { chain }.into());
        }
        if !ws.env_exists(&base) {
            return Err(OverlayError::UnknownEnvironment(base).into());
        }
        chain.push(base.clone());
        current = base;
    }

    chain.reverse();
    debug!(env, chain = ?chain, "overlay chain");
    Ok(chain)
}

/// The root environment `env` ultimately inherits from.
pub fn resolve_root(ws: &Workspace, env: &str) -> Result<String> {
    let chain = build_chain(ws, env)?;
    chain
        .into_iter()
        .next()
        .ok_or_else(|| StoreError::NotFound(ws.env_dir(env)).into())
}

/// Create `name` as an overlay of `base`.
///
/// # Errors
///
/// - `OverlayError::UnknownEnvironment` if `base` does not exist.
/// - `OverlayError::AlreadyExists` if `name` does.
pub fn create_overlay(ws: &Workspace, name: &str, base: &str) -> Result<()> {
    validate_env_name(name)?;

    if !ws.env_exists(base) {
        return Err(OverlayError::UnknownEnvironment(base.to_string()).into());
    }
    if ws.env_exists(name) {
        return Err(OverlayError::AlreadyExists(name.to_string()).into());
    }

    let root = resolve_root(ws, base)?;
    OverlayConfig {
        base: base.to_string(),
    }
    .save(ws, name)?;

    debug!(name, base, root = %root, "overlay created");
    Ok(())
}
