//! External secret references.
//!
//! A secret tagged with an [`Integration`] stores a reference (such as
//! `op://vault/item/field`) instead of the value itself. References are
//! resolved at read time; a failure never aborts resolution, the caller
//! substitutes a sentinel value and reports a warning.
//!
//! ## Requirements
//!
//! - `op` CLI on `PATH` for 1Password references
//! - A service account token stored with `strata integrate 1password`

use std::path::PathBuf;
use std::process::{Command, Stdio};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use zeroize::Zeroizing;

use crate::core::cipher::{self, SymmetricKey};
use crate::core::config::Workspace;
use crate::core::constants;
use crate::core::domain::Integration;
use crate::core::store::{read_json, write_json};
use crate::error::{IntegrationError, Result};

const OP_TOKEN_VAR: &str = "OP_SERVICE_ACCOUNT_TOKEN";

/// What a resolver may use besides the reference itself.
pub struct ResolveContext<'a> {
    /// Environment being resolved.
    pub environment: &'a str,
    /// Decrypted 1Password service account token, if configured.
    pub onepassword_token: Option<&'a str>,
}

/// Turns integration references into plaintext.
pub trait ReferenceResolver {
    /// # Errors
    ///
    /// Returns `IntegrationError` describing why the reference could not be
    /// resolved.
    fn resolve(
        &self,
        integration: Integration,
        reference: &str,
        ctx: &ResolveContext<'_>,
    ) -> Result<Zeroizing<String>>;
}

/// Resolves references with each integration's command-line tool.
pub struct CliResolver;

impl CliResolver {
    fn op_read(reference: &str, token: &str) -> Result<Zeroizing<String>> {
        let op = which::which("op").map_err(|_| IntegrationError::ToolMissing("op".to_string()))?;

        let output = Command::new(op)
            .args(["read", "--no-newline", reference])
            .env(OP_TOKEN_VAR, token)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| IntegrationError::Failed {
                integration: Integration::OnePassword.to_string(),
                reason: format!("failed to run op: {}", e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(IntegrationError::Failed {
                integration: Integration::OnePassword.to_string(),
                reason: stderr.trim().to_string(),
            }
            .into());
        }

        String::from_utf8(output.stdout)
            .map(Zeroizing::new)
            .map_err(|_| {
                IntegrationError::Failed {
                    integration: Integration::OnePassword.to_string(),
                    reason: "op returned non UTF-8 output".to_string(),
                }
                .into()
            })
    }
}

impl ReferenceResolver for CliResolver {
    fn resolve(
        &self,
        integration: Integration,
        reference: &str,
        ctx: &ResolveContext<'_>,
    ) -> Result<Zeroizing<String>> {
        trace!(%integration, environment = ctx.environment, "resolving reference");
        match integration {
            Integration::OnePassword => {
                let token = ctx.onepassword_token.ok_or_else(|| {
                    IntegrationError::NotConfigured(integration.to_string())
                })?;
                Self::op_read(reference, token)
            }
        }
    }
}

/// Sealed 1Password service account token (`<root>/1password.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnePasswordFile {
    pub encrypted_service_account: String,
}

impl OnePasswordFile {
    pub fn path(ws: &Workspace, root: &str) -> PathBuf {
        ws.env_file(root, constants::ONEPASSWORD_FILE)
    }

    /// Seal and store a token.
    pub fn store(ws: &Workspace, root: &str, key: &SymmetricKey, token: &str) -> Result<()> {
        let file = Self {
            encrypted_service_account: cipher::seal(key, token.trim())?,
        };
        write_json(&Self::path(ws, root), &file, "1password integration")?;
        debug!(root, "1password token stored");
        Ok(())
    }

    /// Open the stored token. `None` if the integration was never set up.
    pub fn token(ws: &Workspace, root: &str, key: &SymmetricKey) -> Result<Option<Zeroizing<String>>> {
        match read_json::<Self>(&Self::path(ws, root))? {
            Some(file) => Ok(Some(cipher::open(key, &file.encrypted_service_account)?)),
            None => Ok(None),
        }
    }
}
