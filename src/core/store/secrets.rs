//! Shared and personal secrets files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{read_json, write_json};
use crate::core::config::Workspace;
use crate::core::constants;
use crate::core::domain::EncryptedSecret;
use crate::error::Result;

/// One `secrets.json` or `personal_secrets.json`. Names are unique per file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretsFile {
    #[serde(default)]
    pub secrets: Vec<EncryptedSecret>,
}

impl SecretsFile {
    pub fn path(ws: &Workspace, env: &str, personal: bool) -> PathBuf {
        let file = if personal {
            constants::PERSONAL_SECRETS_FILE
        } else {
            constants::SECRETS_FILE
        };
        ws.env_file(env, file)
    }

    /// Load the shared file. `None` means no secrets have been set yet.
    pub fn load_shared(ws: &Workspace, env: &str) -> Result<Option<Self>> {
        read_json(&Self::path(ws, env, false))
    }

    /// Load this user's personal file, creating an empty one if missing.
    pub fn load_personal(ws: &Workspace, env: &str) -> Result<Self> {
        let path = Self::path(ws, env, true);
        match read_json(&path)? {
            Some(file) => Ok(file),
            None => {
                debug!(env, "creating personal secrets file");
                let file = Self::default();
                file.save(ws, env, true)?;
                Ok(file)
            }
        }
    }

    /// Load either flavor, treating a missing file as empty.
    pub fn load_or_default(ws: &Workspace, env: &str, personal: bool) -> Result<Self> {
        if personal {
            Self::load_personal(ws, env)
        } else {
            Ok(Self::load_shared(ws, env)?.unwrap_or_default())
        }
    }

    pub fn save(&self, ws: &Workspace, env: &str, personal: bool) -> Result<()> {
        let what = if personal {
            "personal secrets"
        } else {
            "secrets"
        };
        write_json(&Self::path(ws, env, personal), self, what)
    }

    pub fn get(&self, name: &str) -> Option<&EncryptedSecret> {
        self.secrets.iter().find(|s| s.name == name)
    }

    /// Replace the entry with the same name in place, or append.
    pub fn upsert(&mut self, secret: EncryptedSecret) {
        match self.secrets.iter_mut().find(|s| s.name == secret.name) {
            Some(existing) => *existing = secret,
            None => self.secrets.push(secret),
        }
    }

    /// Drop the entry with this name. Returns whether one was present.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.secrets.len();
        self.secrets.retain(|s| s.name != name);
        self.secrets.len() != before
    }

    pub fn names(&self) -> Vec<String> {
        self.secrets.iter().map(|s| s.name.clone()).collect()
    }

    pub fn has_personal(&self) -> bool {
        self.secrets.iter().any(|s| s.personal)
    }
}
