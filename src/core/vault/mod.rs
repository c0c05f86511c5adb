//! The secret resolution engine.
//!
//! [`Vault::open`] finds the root of an environment's overlay chain, picks a
//! local private key that is a recipient of the root's keyring and unwraps
//! the environment key. Every read and write goes through an open vault.

mod lifecycle;
mod resolve;
mod secrets;
mod team;

pub use lifecycle::init_environment;
pub use resolve::Resolution;
pub use secrets::SetOptions;
pub use team::{recipients_of, Invitee};

use tracing::debug;

use crate::core::cipher::{self, SymmetricKey};
use crate::core::config::Workspace;
use crate::core::keys::{self, LocalKey};
use crate::core::overlay;
use crate::core::store::Keyring;
use crate::core::validation::validate_env_name;
use crate::error::{AccessError, Result};

/// An unlocked environment.
pub struct Vault {
    pub(super) ws: Workspace,
    pub(super) environment: String,
    pub(super) chain: Vec<String>,
    pub(super) keyring: Keyring,
    pub(super) key: SymmetricKey,
    pub(super) local_key: LocalKey,
}

impl std::fmt::Debug for Vault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vault")
            .field("environment", &self.environment)
            .field("chain", &self.chain)
            .field("recipients", &self.keyring.recipients.len())
            .field("local_key", &self.local_key.private_path)
            .finish_non_exhaustive()
    }
}

impl Vault {
    /// Open an environment.
    ///
    /// # Errors
    ///
    /// - `OverlayError` if the overlay chain is broken.
    /// - `AccessError::NoKeyring` if the root has no keyring.
    /// - `AccessError::NotInvited` if no local private key is a recipient.
    /// - `CipherError` if the environment key cannot be unwrapped.
    pub fn open(ws: Workspace, environment: &str) -> Result<Self> {
        validate_env_name(environment)?;

        let chain = overlay::build_chain(&ws, environment)?;
        let root = chain[0].clone();
        let keyring = Keyring::load(&ws, &root)?;

        let (key, local_key) = unlock(&ws, environment, &keyring)?;
        debug!(
            environment,
            root = %root,
            key = %local_key.private_path.display(),
            "environment unlocked"
        );

        Ok(Self {
            ws,
            environment: environment.to_string(),
            chain,
            keyring,
            key,
            local_key,
        })
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Root environment holding the keyring.
    pub fn root(&self) -> &str {
        &self.chain[0]
    }

    /// Environments from root to this one.
    pub fn chain(&self) -> &[String] {
        &self.chain
    }

    pub fn keyring(&self) -> &Keyring {
        &self.keyring
    }

    /// The local key used to unlock.
    pub fn local_key(&self) -> &LocalKey {
        &self.local_key
    }

    pub fn workspace(&self) -> &Workspace {
        &self.ws
    }
}

/// Unwrap the environment key with the first usable local key.
fn unlock(ws: &Workspace, environment: &str, keyring: &Keyring) -> Result<(SymmetricKey, LocalKey)> {
    let not_invited = || AccessError::NotInvited {
        environment: environment.to_string(),
    };

    let local_key = keys::find_usable(ws.key_dir(), &keyring.public_keys())?
        .into_iter()
        .next()
        .ok_or_else(not_invited)?;

    let recipient = keyring
        .find_by_key(&local_key.public_key)
        .ok_or_else(not_invited)?;

    let identity = local_key.load_private()?;
    let key = cipher::unwrap_symmetric_key(&recipient.encrypted_shared_key, &identity)?;

    Ok((key, local_key))
}
