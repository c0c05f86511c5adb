//! Recipient operations.
//!
//! Inviting wraps the environment key for each new public key. Removing a
//! recipient only drops their wrapped copy: the environment key is not
//! rotated and no secret is re-encrypted.

use tracing::{debug, info};

use super::Vault;
use crate::core::cipher::{self, SymmetricKey};
use crate::core::config::Workspace;
use crate::core::domain::{Outcome, Recipient, RecipientKind, Warning};
use crate::core::overlay;
use crate::core::store::Keyring;
use crate::core::types::PublicKey;
use crate::core::validation::validate_identity;
use crate::error::{CipherError, Error, Result, TeamError};

/// Someone to add to a keyring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invitee {
    pub kind: RecipientKind,
    pub identity: String,
    pub keys: Vec<PublicKey>,
}

impl Invitee {
    /// A person with every key published for their handle.
    pub fn user(username: impl Into<String>, keys: Vec<PublicKey>) -> Self {
        Self {
            kind: RecipientKind::User,
            identity: username.into(),
            keys,
        }
    }

    /// A single key under a free-form label.
    pub fn headless(label: impl Into<String>, key: PublicKey) -> Self {
        Self {
            kind: RecipientKind::Headless,
            identity: label.into(),
            keys: vec![key],
        }
    }

    pub fn machine(name: impl Into<String>, key: PublicKey) -> Self {
        Self {
            kind: RecipientKind::Machine,
            identity: name.into(),
            keys: vec![key],
        }
    }
}

/// Wrap `key` for each of the invitee's keys and add them to `keyring`.
///
/// Keys that cannot encrypt are skipped with a warning.
///
/// # Errors
///
/// - `TeamError::AlreadyInvited` if the identity has entries.
/// - `TeamError::DuplicateKey` if a key is already a recipient.
/// - `TeamError::NoUsableKeys` if every key was skipped.
pub(super) fn admit(
    keyring: &mut Keyring,
    key: &SymmetricKey,
    invitee: &Invitee,
    warnings: &mut Vec<Warning>,
) -> Result<usize> {
    validate_identity(&invitee.identity)?;
    keyring.ensure_identity_free(&invitee.identity)?;

    let mut admitted = 0;
    for public_key in &invitee.keys {
        let wrapped = match cipher::wrap_symmetric_key(key, public_key) {
            Ok(wrapped) => wrapped,
            Err(Error::Cipher(
                e @ (CipherError::UnsupportedKeyType(_) | CipherError::InvalidPublicKey(_)),
            )) => {
                debug!(identity = %invitee.identity, error = %e, "key skipped");
                warnings.push(Warning::SkippedKey {
                    identity: invitee.identity.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
            Err(e) => return Err(e),
        };

        keyring.ensure_key_free(public_key)?;
        keyring.push(Recipient::new(
            invitee.kind,
            &invitee.identity,
            public_key.clone(),
            wrapped,
        ));
        admitted += 1;
    }

    if admitted == 0 {
        return Err(TeamError::NoUsableKeys(invitee.identity.clone()).into());
    }
    Ok(admitted)
}

impl Vault {
    /// Add a recipient to the root keyring.
    ///
    /// # Returns
    ///
    /// Number of keys added.
    pub fn invite(&mut self, invitee: Invitee) -> Result<Outcome<usize>> {
        let mut warnings = Vec::new();
        let mut keyring = self.keyring.clone();

        let admitted = admit(&mut keyring, &self.key, &invitee, &mut warnings)?;
        keyring.save(&self.ws, self.root())?;
        self.keyring = keyring;

        info!(
            identity = %invitee.identity,
            kind = %invitee.kind,
            keys = admitted,
            root = %self.chain[0],
            "invited"
        );
        Ok(Outcome::with_warnings(admitted, warnings))
    }

    /// Invite a user with every key found for their handle.
    pub fn invite_user(&mut self, username: &str, keys: Vec<PublicKey>) -> Result<Outcome<usize>> {
        self.invite(Invitee::user(username, keys))
    }

    /// Invite a single key under a label.
    pub fn invite_headless(&mut self, label: &str, key: PublicKey) -> Result<Outcome<usize>> {
        self.invite(Invitee::headless(label, key))
    }

    /// Add a machine recipient.
    pub fn add_machine(&mut self, name: &str, key: PublicKey) -> Result<Outcome<usize>> {
        self.invite(Invitee::machine(name, key))
    }

    /// Remove every key of a user or headless label.
    ///
    /// # Errors
    ///
    /// - `TeamError::NotInvited` if the identity has no entries.
    /// - `TeamError::LastRecipient` if nobody would be left.
    pub fn uninvite(&mut self, username: &str) -> Result<Outcome<usize>> {
        let mut keyring = self.keyring.clone();
        let removed = keyring.remove_user(username)?;
        self.replace_keyring(keyring, username, removed)
    }

    /// Remove a machine recipient.
    pub fn remove_machine(&mut self, name: &str) -> Result<Outcome<usize>> {
        let mut keyring = self.keyring.clone();
        let removed = keyring.remove_machine(name)?;
        self.replace_keyring(keyring, name, removed)
    }

    fn replace_keyring(
        &mut self,
        keyring: Keyring,
        identity: &str,
        removed: usize,
    ) -> Result<Outcome<usize>> {
        if keyring.recipients.is_empty() {
            return Err(TeamError::LastRecipient(identity.to_string()).into());
        }

        keyring.save(&self.ws, self.root())?;
        self.keyring = keyring;

        info!(identity, removed, root = %self.chain[0], "recipient removed");
        Ok(Outcome::with_warnings(
            removed,
            vec![Warning::NotRotated {
                identity: identity.to_string(),
            }],
        ))
    }
}

/// Root and keyring of an environment, without unlocking it.
pub fn recipients_of(ws: &Workspace, environment: &str) -> Result<(String, Keyring)> {
    let root = overlay::resolve_root(ws, environment)?;
    let keyring = Keyring::load(ws, &root)?;
    Ok((root, keyring))
}
