//! Non-fatal conditions surfaced beside a result.

use crate::core::types::{EnvName, IdentityName, SecretName};

/// A degraded but non-fatal condition.
///
/// Operations never abort for these; they are returned to the caller to
/// be shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// Personal names without a value anywhere in the chain.
    MissingPersonal { names: Vec<SecretName> },

    /// A personal name was set without `--personal` and stayed personal.
    CoercedToPersonal { name: SecretName },

    /// The name lives only in an underlay; nothing was removed.
    InheritedValue { name: SecretName, layer: EnvName },

    /// Removed here, but an underlay still provides a value.
    StillServedByUnderlay { name: SecretName, layer: EnvName },

    /// A public key that cannot be used for encryption was ignored.
    SkippedKey { identity: IdentityName, reason: String },

    /// None of the local private keys can open the new environment.
    NoLocalKey { environment: EnvName },

    /// An integration reference could not be resolved.
    IntegrationFailed { name: SecretName, reason: String },

    /// Access was removed without rotating the environment key.
    NotRotated { identity: IdentityName },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::MissingPersonal { names } => {
                write!(f, "missing personal values: {}", names.join(", "))
            }
            Warning::CoercedToPersonal { name } => write!(
                f,
                "{} is personal; updated your personal value instead of sharing it",
                name
            ),
            Warning::InheritedValue { name, layer } => write!(
                f,
                "{} is inherited from {}; nothing removed (remove it there instead)",
                name, layer
            ),
            Warning::StillServedByUnderlay { name, layer } => {
                write!(f, "{} is still provided by {}", name, layer)
            }
            Warning::SkippedKey { identity, reason } => {
                write!(f, "skipped a key for {}: {}", identity, reason)
            }
            Warning::NoLocalKey { environment } => write!(
                f,
                "no local private key matches a recipient of {}; you will not be able to open it from this machine",
                environment
            ),
            Warning::IntegrationFailed { name, reason } => {
                write!(f, "could not resolve {}: {}", name, reason)
            }
            Warning::NotRotated { identity } => write!(
                f,
                "{} can no longer open the environment key, but anything they already read stays exposed; rotate those secrets",
                identity
            ),
        }
    }
}

/// A result paired with the warnings raised while producing it.
#[derive(Debug)]
pub struct Outcome<T> {
    pub value: T,
    pub warnings: Vec<Warning>,
}

impl<T> Outcome<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(value: T, warnings: Vec<Warning>) -> Self {
        Self { value, warnings }
    }

    pub fn warn(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }
}
