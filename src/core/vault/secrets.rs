//! Secret operations.
//!
//! Reads go through full resolution. Writes only ever touch the current
//! environment's files; flavor rules are checked against the whole chain.

use std::collections::BTreeMap;

use tracing::{debug, info};
use zeroize::Zeroizing;

use super::Vault;
use crate::core::cipher;
use crate::core::domain::{EncryptedSecret, Integration, Outcome, Warning};
use crate::core::integration::ReferenceResolver;
use crate::core::store::SecretsFile;
use crate::core::validation::validate_secret_name;
use crate::error::{Result, SecretError};

/// How a value is stored by [`Vault::set`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetOptions {
    /// Store in this user's personal file; only honored for new names.
    pub personal: bool,
    /// The value is a reference for this integration.
    pub integration: Option<Integration>,
}

/// Flavor of a name as declared by the shared files of the chain.
#[derive(Debug, Clone)]
struct Declaration {
    personal: bool,
    layer: String,
}

impl Vault {
    /// One resolved value.
    ///
    /// # Errors
    ///
    /// Returns `SecretError::NotFound` with close matches if the name is
    /// not defined anywhere in the chain.
    pub fn get(
        &self,
        name: &str,
        resolver: &dyn ReferenceResolver,
    ) -> Result<Outcome<Zeroizing<String>>> {
        let resolution = self.resolve(resolver)?;
        let var = resolution.vars.get(name).ok_or_else(|| {
            SecretError::not_found_with_suggestions(name.to_string(), &resolution.names())
        })?;
        Ok(Outcome::with_warnings(var.value.clone(), resolution.warnings))
    }

    /// Set a value in this environment.
    ///
    /// An existing name keeps its flavor: asking for personal on a shared
    /// name is rejected, and a shared write to a personal name updates the
    /// personal value with a [`Warning::CoercedToPersonal`]. A new personal
    /// name also gets an empty placeholder in the shared file.
    ///
    /// # Errors
    ///
    /// - `ValidationError` for an invalid name.
    /// - `SecretError::FlavorFlip` when setting a shared name as personal.
    /// - `SecretError::IntegrationMismatch` when the integration differs from
    ///   the stored entry.
    pub fn set(&self, name: &str, value: &str, options: SetOptions) -> Result<Outcome<()>> {
        validate_secret_name(name)?;

        let mut outcome = Outcome::new(());
        let declarations = self.declarations(&self.chain)?;
        let mut personal = options.personal;

        if let Some(existing) = declarations.get(name) {
            if options.personal && !existing.personal {
                return Err(SecretError::FlavorFlip(name.to_string()).into());
            }
            if !options.personal && existing.personal {
                personal = true;
                outcome.warn(Warning::CoercedToPersonal {
                    name: name.to_string(),
                });
            }
        }

        let env = self.environment.as_str();
        let mut shared = SecretsFile::load_or_default(&self.ws, env, false)?;

        if let Some(own) = shared.get(name) {
            if own.integration != options.integration {
                return Err(SecretError::IntegrationMismatch {
                    name: name.to_string(),
                    existing: integration_label(own.integration),
                    requested: integration_label(options.integration),
                }
                .into());
            }
        }

        let sealed = cipher::seal(&self.key, value)?;

        if personal {
            let mut mine = SecretsFile::load_personal(&self.ws, env)?;
            mine.upsert(EncryptedSecret::new(name, sealed, true, options.integration));
            mine.save(&self.ws, env, true)?;

            if shared.get(name).is_none() {
                shared.upsert(EncryptedSecret::placeholder(name, options.integration));
                shared.save(&self.ws, env, false)?;
            }
        } else {
            shared.upsert(EncryptedSecret::new(name, sealed, false, options.integration));
            shared.save(&self.ws, env, false)?;
        }

        info!(name, environment = env, personal, "secret set");
        Ok(outcome)
    }

    /// Remove a name from this environment.
    ///
    /// A name defined only by an underlay is left alone with a
    /// [`Warning::InheritedValue`]. Removing a name that an underlay also
    /// defines yields [`Warning::StillServedByUnderlay`].
    ///
    /// # Errors
    ///
    /// Returns `SecretError::NotFound` if no layer defines the name.
    pub fn remove(&self, name: &str) -> Result<Outcome<()>> {
        let mut outcome = Outcome::new(());
        let declarations = self.declarations(&self.chain)?;
        let declared = declarations.get(name).ok_or_else(|| {
            let available: Vec<String> = declarations.keys().cloned().collect();
            SecretError::not_found_with_suggestions(name.to_string(), &available)
        })?;

        let env = self.environment.as_str();
        let mut shared = SecretsFile::load_or_default(&self.ws, env, false)?;
        let Some(own) = shared.get(name).cloned() else {
            outcome.warn(Warning::InheritedValue {
                name: name.to_string(),
                layer: declared.layer.clone(),
            });
            return Ok(outcome);
        };

        shared.remove(name);
        shared.save(&self.ws, env, false)?;

        if own.personal {
            let mut mine = SecretsFile::load_personal(&self.ws, env)?;
            if mine.remove(name) {
                mine.save(&self.ws, env, true)?;
            }
        }

        let underlays = &self.chain[..self.chain.len() - 1];
        if let Some(below) = self.declarations(underlays)?.get(name) {
            outcome.warn(Warning::StillServedByUnderlay {
                name: name.to_string(),
                layer: below.layer.clone(),
            });
        }

        info!(name, environment = env, personal = own.personal, "secret removed");
        Ok(outcome)
    }

    /// Names declared by the shared files of `layers`, layered like
    /// [`Vault::resolve`] without decrypting anything.
    fn declarations(&self, layers: &[String]) -> Result<BTreeMap<String, Declaration>> {
        let mut declared: BTreeMap<String, Declaration> = BTreeMap::new();

        for layer in layers {
            let Some(shared) = SecretsFile::load_shared(&self.ws, layer)? else {
                continue;
            };
            for secret in shared.secrets {
                let keep_existing = secret.personal
                    && declared.get(&secret.name).is_some_and(|d| !d.personal);
                if keep_existing {
                    continue;
                }
                declared.insert(
                    secret.name,
                    Declaration {
                        personal: secret.personal,
                        layer: layer.clone(),
                    },
                );
            }
        }

        debug!(layers = layers.len(), names = declared.len(), "declarations");
        Ok(declared)
    }
}

fn integration_label(integration: Option<Integration>) -> String {
    integration
        .map(|i| i.to_string())
        .unwrap_or_else(|| "none".to_string())
}
