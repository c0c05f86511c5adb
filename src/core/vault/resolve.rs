//! Layered resolution of an environment's variables.

use std::collections::BTreeMap;

use tracing::{debug, warn};
use zeroize::Zeroizing;

use super::Vault;
use crate::core::cipher;
use crate::core::constants;
use crate::core::domain::{ResolvedVar, Warning};
use crate::core::integration::{OnePasswordFile, ReferenceResolver, ResolveContext};
use crate::core::store::SecretsFile;
use crate::error::Result;

/// Decrypted variables of an environment, with the warnings raised while
/// layering them.
#[derive(Debug, Default)]
pub struct Resolution {
    pub vars: BTreeMap<String, ResolvedVar>,
    pub warnings: Vec<Warning>,
}

impl Resolution {
    pub fn get(&self, name: &str) -> Option<&ResolvedVar> {
        self.vars.get(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.vars.keys().cloned().collect()
    }

    /// Variables to export into a process: everything with a value.
    pub fn exports(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars
            .iter()
            .filter(|(_, var)| !var.value.is_empty())
            .map(|(name, var)| (name.as_str(), var.value.as_str()))
    }
}

impl Vault {
    /// Decrypt and layer every variable along the chain.
    ///
    /// Shared values from later layers replace earlier ones. A personal
    /// name registers an empty placeholder unless a value is already
    /// present; each layer that declares personal names then contributes
    /// its own personal file, which always wins. Personal names left empty
    /// are reported in a single [`Warning::MissingPersonal`].
    ///
    /// # Errors
    ///
    /// Returns `CipherError` if any stored value fails to decrypt, or
    /// `StoreError::Corrupted` for unreadable files. Integration failures
    /// are warnings.
    pub fn resolve(&self, resolver: &dyn ReferenceResolver) -> Result<Resolution> {
        let mut vars: BTreeMap<String, ResolvedVar> = BTreeMap::new();
        let mut personal_layers = Vec::new();

        for layer in &self.chain {
            let Some(shared) = SecretsFile::load_shared(&self.ws, layer)? else {
                continue;
            };

            for secret in &shared.secrets {
                if secret.personal {
                    let filled = vars
                        .get(&secret.name)
                        .is_some_and(|existing| !existing.value.is_empty());
                    if !filled {
                        vars.insert(
                            secret.name.clone(),
                            ResolvedVar {
                                value: Zeroizing::new(String::new()),
                                personal: true,
                                integration: secret.integration,
                                layer: layer.clone(),
                            },
                        );
                    }
                } else {
                    vars.insert(
                        secret.name.clone(),
                        ResolvedVar {
                            value: cipher::open(&self.key, &secret.value)?,
                            personal: false,
                            integration: secret.integration,
                            layer: layer.clone(),
                        },
                    );
                }
            }

            if shared.has_personal() {
                personal_layers.push(layer.clone());
            }
        }

        for layer in personal_layers {
            let personal = SecretsFile::load_personal(&self.ws, &layer)?;
            for secret in &personal.secrets {
                vars.insert(
                    secret.name.clone(),
                    ResolvedVar {
                        value: cipher::open(&self.key, &secret.value)?,
                        personal: true,
                        integration: secret.integration,
                        layer: layer.clone(),
                    },
                );
            }
        }

        let mut warnings = self.resolve_references(&mut vars, resolver)?;

        let missing: Vec<String> = vars
            .iter()
            .filter(|(_, var)| var.is_missing())
            .map(|(name, _)| name.clone())
            .collect();
        if !missing.is_empty() {
            debug!(count = missing.len(), "personal values missing");
            warnings.push(Warning::MissingPersonal { names: missing });
        }

        debug!(
            environment = %self.environment,
            vars = vars.len(),
            warnings = warnings.len(),
            "resolved"
        );
        Ok(Resolution { vars, warnings })
    }

    /// Replace integration references with their values.
    fn resolve_references(
        &self,
        vars: &mut BTreeMap<String, ResolvedVar>,
        resolver: &dyn ReferenceResolver,
    ) -> Result<Vec<Warning>> {
        let mut warnings = Vec::new();
        let needs_resolution = vars
            .values()
            .any(|var| var.integration.is_some() && !var.value.is_empty());
        if !needs_resolution {
            return Ok(warnings);
        }

        let token = OnePasswordFile::token(&self.ws, self.root(), &self.key)?;
        let ctx = ResolveContext {
            environment: &self.environment,
            onepassword_token: token.as_ref().map(|t| t.as_str()),
        };

        for (name, var) in vars.iter_mut() {
            let Some(integration) = var.integration else {
                continue;
            };
            if var.value.is_empty() {
                continue;
            }

            match resolver.resolve(integration, &var.value, &ctx) {
                Ok(value) => var.value = value,
                Err(e) => {
                    warn!(name = %name, %integration, error = %e, "reference not resolved");
                    var.value = Zeroizing::new(constants::INTEGRATION_FAILURE_SENTINEL.to_string());
                    warnings.push(Warning::IntegrationFailed {
                        name: name.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(warnings)
    }
}
