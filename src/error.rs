//! Error types.
//!
//! Each concern gets its own enum; `Error` wraps them so `?` works across
//! module boundaries. Non-fatal conditions are not errors: see
//! [`crate::core::domain::Warning`].

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error(transparent)]
    Overlay(#[from] OverlayError),

    #[error(transparent)]
    Secret(#[from] SecretError),

    #[error(transparent)]
    Team(#[from] TeamError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Integration(#[from] IntegrationError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Remediation hint shown under the error message, if one applies.
    pub fn hint(&self) -> Option<String> {
        match self {
            Error::Store(StoreError::NoWorkspace) => Some("run: strata init <environment>".into()),
            Error::Access(AccessError::NoKeyring { environment }) => {
                Some(format!("run: strata init {}", environment))
            }
            Error::Access(AccessError::NotInvited { environment }) => Some(format!(
                "ask an existing recipient to run: strata -e {} invite <you>",
                environment
            )),
            Error::Access(AccessError::NoEnvironment) => {
                Some("pass -e <environment> or set STRATA_ENV".into())
            }
            Error::Secret(SecretError::FlavorFlip(name)) => Some(format!(
                "run: strata rm {} and set it again as personal",
                name
            )),
            Error::Secret(SecretError::IntegrationMismatch { name, .. }) => {
                Some(format!("run: strata rm {} and set it again", name))
            }
            Error::Integration(IntegrationError::NotConfigured(integration)) => {
                Some(format!("run: strata integrate {}", integration))
            }
            _ => None,
        }
    }
}

/// Persisted-state failures.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("no .strata directory found here or in any parent directory")]
    NoWorkspace,

    #[error("not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("{} is corrupted: {source}", .path.display())]
    Corrupted {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} is corrupted: {source}", .path.display())]
    CorruptedConfig {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to read {}: {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize {what}: {source}")]
    Serialize {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Authentication, decryption and key-material failures.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("secure random source unavailable: {0}")]
    Entropy(String),

    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("authentication failed: ciphertext was tampered with or the key is wrong")]
    Authentication,

    #[error("malformed ciphertext: {0}")]
    Malformed(String),

    #[error("invalid symmetric key length: expected 32 bytes, got {0}")]
    InvalidKeyLength(usize),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("unsupported key type {0}: only ssh-rsa keys can be used for encryption")]
    UnsupportedKeyType(String),

    #[error("{0} keys can only sign, not decrypt")]
    SignatureOnlyKey(String),

    #[error("unrecognized private key format in {0}")]
    UnknownKeyFormat(String),

    #[error("private key {0} is passphrase protected")]
    EncryptedPrivateKey(String),

    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("failed to unwrap the shared key: {0}")]
    UnwrapFailed(String),
}

/// Who may open an environment.
#[derive(Error, Debug)]
pub enum AccessError {
    #[error("no keyring for environment {environment}")]
    NoKeyring { environment: String },

    #[error("no local private key matches a recipient of {environment}; are you invited?")]
    NotInvited { environment: String },

    #[error("could not infer environment")]
    NoEnvironment,
}

/// Overlay graph failures.
#[derive(Error, Debug)]
pub enum OverlayError {
    #[error("environment {0} does not exist")]
    UnknownEnvironment(String),

    #[error("environment {0} already exists")]
    AlreadyExists(String),

    #[error("overlay cycle detected: {}", .chain.join(" -> "))]
    Cycle { chain: Vec<String> },
}

/// Secret-level failures, including flavor consistency violations.
#[derive(Error, Debug)]
pub enum SecretError {
    #[error("{name} does not exist{}", suggestion_suffix(.suggestions))]
    NotFound {
        name: String,
        suggestions: Vec<String>,
    },

    #[error("{0} is shared; it cannot be set as personal")]
    FlavorFlip(String),

    #[error("{name} uses integration {existing}, not {requested}")]
    IntegrationMismatch {
        name: String,
        existing: String,
        requested: String,
    },

    #[error("unknown integration \"{0}\"")]
    UnknownIntegration(String),
}

impl SecretError {
    /// Build a not-found error carrying close matches from `available`.
    pub fn not_found_with_suggestions(name: String, available: &[String]) -> Self {
        let upper = name.to_ascii_uppercase();
        let suggestions = available
            .iter()
            .filter(|candidate| {
                let c = candidate.to_ascii_uppercase();
                c.contains(&upper) || upper.contains(&c)
            })
            .take(3)
            .cloned()
            .collect();
        SecretError::NotFound { name, suggestions }
    }
}

fn suggestion_suffix(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean: {}?)", suggestions.join(", "))
    }
}

/// Recipient management failures.
#[derive(Error, Debug)]
pub enum TeamError {
    #[error("{0} is already invited")]
    AlreadyInvited(String),

    #[error("public key is already a recipient (as {0})")]
    DuplicateKey(String),

    #[error("{0} is not invited to this environment")]
    NotInvited(String),

    #[error("none of the keys for {0} can be used for encryption")]
    NoUsableKeys(String),

    #[error("removing {0} would leave the environment without recipients")]
    LastRecipient(String),
}

/// Input validation failures.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("name cannot be empty")]
    EmptyName,

    #[error("invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },
}

/// Identity key lookup failures.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("no public keys found for {0}")]
    NotFound(String),

    #[error("key lookup for {identity} failed: {reason}")]
    Request { identity: String, reason: String },
}

/// External reference resolution failures.
#[derive(Error, Debug)]
pub enum IntegrationError {
    #[error("{0} integration is not set up for this environment")]
    NotConfigured(String),

    #[error("{0} CLI not found on PATH")]
    ToolMissing(String),

    #[error("{integration} lookup failed: {reason}")]
    Failed { integration: String, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
