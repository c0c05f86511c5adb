//! Root environment keyrings (`keys.json`).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{read_json, write_json};
use crate::core::config::Workspace;
use crate::core::constants;
use crate::core::domain::{Recipient, RecipientKind};
use crate::error::{AccessError, Result, TeamError};

/// Recipients of a root environment, each holding a wrapped copy of the
/// environment key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyring {
    #[serde(default)]
    pub recipients: Vec<Recipient>,
}

impl Keyring {
    pub fn path(ws: &Workspace, root: &str) -> PathBuf {
        ws.env_file(root, constants::KEYS_FILE)
    }

    pub fn exists(ws: &Workspace, root: &str) -> bool {
        Self::path(ws, root).is_file()
    }

    /// Load the keyring of a root environment.
    ///
    /// # Errors
    ///
    /// Returns `AccessError::NoKeyring` if the file does not exist, or
    /// `StoreError::Corrupted` if it does not parse.
    pub fn load(ws: &Workspace, root: &str) -> Result<Self> {
        let path = Self::path(ws, root);
        debug!(path = %path.display(), "reading keyring");
        read_json(&path)?.ok_or_else(|| {
            AccessError::NoKeyring {
                environment: root.to_string(),
            }
            .into()
        })
    }

    pub fn save(&self, ws: &Workspace, root: &str) -> Result<()> {
        write_json(&Self::path(ws, root), self, "keyring")
    }

    /// Authorized-key lines of every recipient.
    pub fn public_keys(&self) -> Vec<&str> {
        self.recipients
            .iter()
            .map(|r| r.public_key.as_str())
            .collect()
    }

    /// The entry created for `public_key`, compared by fingerprint.
    pub fn find_by_key(&self, public_key: &str) -> Option<&Recipient> {
        self.recipients.iter().find(|r| r.holds_key(public_key))
    }

    /// Reject an identity that already has entries.
    ///
    /// # Errors
    ///
    /// Returns `TeamError::AlreadyInvited`.
    pub fn ensure_identity_free(&self, identity: &str) -> Result<()> {
        if self.recipients.iter().any(|r| r.identity() == identity) {
            return Err(TeamError::AlreadyInvited(identity.to_string()).into());
        }
        Ok(())
    }

    /// Reject a key that is already a recipient under any identity.
    ///
    /// # Errors
    ///
    /// Returns `TeamError::DuplicateKey` naming the current holder.
    pub fn ensure_key_free(&self, public_key: &str) -> Result<()> {
        match self.find_by_key(public_key) {
            Some(existing) => Err(TeamError::DuplicateKey(existing.identity().to_string()).into()),
            None => Ok(()),
        }
    }

    pub fn push(&mut self, recipient: Recipient) {
        self.recipients.push(recipient);
    }

    /// Remove every key of a user or headless label.
    ///
    /// # Returns
    ///
    /// Number of entries removed.
    ///
    /// # Errors
    ///
    /// Returns `TeamError::NotInvited` if nothing matched.
    pub fn remove_user(&mut self, username: &str) -> Result<usize> {
        self.remove_where(username, |r| {
            r.kind() != RecipientKind::Machine && r.identity() == username
        })
    }

    /// Remove a machine's entries.
    pub fn remove_machine(&mut self, name: &str) -> Result<usize> {
        self.remove_where(name, |r| r.machine_name.as_deref() == Some(name))
    }

    fn remove_where(&mut self, identity: &str, matches: impl Fn(&Recipient) -> bool) -> Result<usize> {
        let before = self.recipients.len();
        self.recipients.retain(|r| !matches(r));
        let removed = before - self.recipients.len();

        if removed == 0 {
            return Err(TeamError::NotInvited(identity.to_string()).into());
        }
        debug!(identity, removed, "recipients removed");
        Ok(removed)
    }

    /// Identities grouped by kind, with key counts, in first-seen order.
    pub fn grouped(&self) -> Vec<(RecipientKind, String, usize)> {
        let mut groups: Vec<(RecipientKind, String, usize)> = Vec::new();
        for r in &self.recipients {
            let kind = r.kind();
            match groups
                .iter_mut()
                .find(|(k, id, _)| *k == kind && id == r.identity())
            {
                Some((_, _, count)) => *count += 1,
                None => groups.push((kind, r.identity().to_string(), 1)),
            }
        }
        groups
    }
}
