//! Environment creation and per-environment setup.

use tracing::info;

use super::team::{admit, Invitee};
use super::Vault;
use crate::core::cipher::SymmetricKey;
use crate::core::config::{ensure_gitignore, Workspace};
use crate::core::domain::{Integration, Outcome, Warning};
use crate::core::integration::OnePasswordFile;
use crate::core::keys;
use crate::core::store::Keyring;
use crate::core::validation::validate_env_name;
use crate::error::{OverlayError, Result};

/// Create a root environment with a fresh key wrapped for `first`.
///
/// Warns when none of the local keys can open the new environment, which
/// happens when someone initializes on behalf of another person.
///
/// # Errors
///
/// - `OverlayError::AlreadyExists` if the environment exists.
/// - `TeamError::NoUsableKeys` if none of the keys can encrypt.
pub fn init_environment(ws: &Workspace, environment: &str, first: Invitee) -> Result<Outcome<()>> {
    validate_env_name(environment)?;
    if ws.env_exists(environment) {
        return Err(OverlayError::AlreadyExists(environment.to_string()).into());
    }

    let key = SymmetricKey::generate()?;
    let mut keyring = Keyring::default();
    let mut warnings = Vec::new();
    let admitted = admit(&mut keyring, &key, &first, &mut warnings)?;

    keyring.save(ws, environment)?;
    ensure_gitignore(ws)?;

    if keys::find_usable(ws.key_dir(), &keyring.public_keys())?.is_empty() {
        warnings.push(Warning::NoLocalKey {
            environment: environment.to_string(),
        });
    }

    info!(
        environment,
        identity = %first.identity,
        keys = admitted,
        "environment created"
    );
    Ok(Outcome::with_warnings((), warnings))
}

impl Vault {
    /// Store the credential an integration needs, sealed with the
    /// environment key, next to the root keyring.
    pub fn setup_integration(&self, integration: Integration, token: &str) -> Result<()> {
        match integration {
            Integration::OnePassword => {
                OnePasswordFile::store(&self.ws, self.root(), &self.key, token)?;
            }
        }
        ensure_gitignore(&self.ws)?;

        info!(%integration, root = %self.chain[0], "integration configured");
        Ok(())
    }
}
