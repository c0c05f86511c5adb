//! Overlay markers (`overlay.json`).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{read_json, write_json};
use crate::core::config::Workspace;
use crate::core::constants;
use crate::error::Result;

/// Presence of this file makes an environment an overlay of `base`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayConfig {
    pub base: String,
}

impl OverlayConfig {
    pub fn path(ws: &Workspace, env: &str) -> PathBuf {
        ws.env_file(env, constants::OVERLAY_FILE)
    }

    /// `None` if `env` is not an overlay.
    pub fn load(ws: &Workspace, env: &str) -> Result<Option<Self>> {
        read_json(&Self::path(ws, env))
    }

    pub fn save(&self, ws: &Workspace, env: &str) -> Result<()> {
        write_json(&Self::path(ws, env), self, "overlay config")
    }
}
