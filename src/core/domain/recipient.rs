//! Keyring entries.

use serde::{Deserialize, Serialize};

use crate::core::cipher;
use crate::core::types::{IdentityName, PublicKey};

/// How a recipient was invited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RecipientKind {
    /// A person, identified by a handle whose keys were looked up.
    User,
    /// A key added under a free-form label instead of a handle.
    Headless,
    /// A server or service, identified by machine name.
    Machine,
}

impl std::fmt::Display for RecipientKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecipientKind::User => write!(f, "user"),
            RecipientKind::Headless => write!(f, "headless"),
            RecipientKind::Machine => write!(f, "machine"),
        }
    }
}

/// One authorized party of a root environment.
///
/// Holds the environment key wrapped for `public_key`. Exactly one of
/// `username` and `machine_name` is set; headless entries use `username`
/// as a label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<IdentityName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine_name: Option<IdentityName>,
    pub public_key: PublicKey,
    pub encrypted_shared_key: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub headless: bool,
}

impl Recipient {
    /// Build an entry of the given kind.
    pub fn new(
        kind: RecipientKind,
        identity: &str,
        public_key: PublicKey,
        encrypted_shared_key: String,
    ) -> Self {
        let (username, machine_name) = match kind {
            RecipientKind::Machine => (None, Some(identity.to_string())),
            RecipientKind::User | RecipientKind::Headless => (Some(identity.to_string()), None),
        };
        Self {
            username,
            machine_name,
            public_key: public_key.trim().to_string(),
            encrypted_shared_key,
            headless: kind == RecipientKind::Headless,
        }
    }

    /// Handle, label or machine name.
    pub fn identity(&self) -> &str {
        self.username
            .as_deref()
            .or(self.machine_name.as_deref())
            .unwrap_or_default()
    }

    pub fn kind(&self) -> RecipientKind {
        if self.machine_name.is_some() && self.username.is_none() {
            RecipientKind::Machine
        } else if self.headless {
            RecipientKind::Headless
        } else {
            RecipientKind::User
        }
    }

    /// Whether this entry was created for `public_key`, ignoring comments.
    pub fn holds_key(&self, public_key: &str) -> bool {
        match (
            cipher::fingerprint(&self.public_key),
            cipher::fingerprint(public_key),
        ) {
            (Some(ours), Some(theirs)) => ours == theirs,
            _ => false,
        }
    }
}
