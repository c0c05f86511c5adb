//! Secret types.
//!
//! [`EncryptedSecret`] is the persisted record; [`ResolvedVar`] is the
//! in-memory plaintext produced by resolution and never written anywhere.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::core::types::{EncryptedValue, EnvName, SecretName};
use crate::error::SecretError;

/// External source a secret's plaintext refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Integration {
    /// Value is an `op://` reference resolved through 1Password.
    #[serde(rename = "1password")]
    OnePassword,
}

impl Integration {
    pub fn as_str(&self) -> &'static str {
        match self {
            Integration::OnePassword => "1password",
        }
    }
}

impl std::fmt::Display for Integration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Integration {
    type Err = SecretError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "1password" => Ok(Integration::OnePassword),
            other => Err(SecretError::UnknownIntegration(other.to_string())),
        }
    }
}

/// A named sealed value in a secrets file.
///
/// A personal entry in a shared file is a placeholder with an empty value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedSecret {
    pub name: SecretName,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value: EncryptedValue,
    #[serde(default)]
    pub personal: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integration: Option<Integration>,
}

impl EncryptedSecret {
    pub fn new(
        name: impl Into<SecretName>,
        value: EncryptedValue,
        personal: bool,
        integration: Option<Integration>,
    ) -> Self {
        Self {
            name: name.into(),
            value,
            personal,
            integration,
        }
    }

    /// Shared-file marker announcing a personal name.
    pub fn placeholder(name: impl Into<SecretName>, integration: Option<Integration>) -> Self {
        Self::new(name, String::new(), true, integration)
    }

    pub fn is_placeholder(&self) -> bool {
        self.personal && self.value.is_empty()
    }
}

impl std::fmt::Display for EncryptedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A decrypted variable after layering.
#[derive(Clone)]
pub struct ResolvedVar {
    /// Plaintext; empty for a personal name nobody supplied.
    pub value: Zeroizing<String>,
    pub personal: bool,
    pub integration: Option<Integration>,
    /// Environment in the chain that supplied the value.
    pub layer: EnvName,
}

impl ResolvedVar {
    pub fn is_missing(&self) -> bool {
        self.personal && self.value.is_empty()
    }
}

impl std::fmt::Debug for ResolvedVar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedVar")
            .field("value", &"[redacted]")
            .field("personal", &self.personal)
            .field("integration", &self.integration)
            .field("layer", &self.layer)
            .finish()
    }
}
