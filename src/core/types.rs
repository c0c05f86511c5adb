//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

/// A secret name (e.g., DATABASE_URL, API_KEY).
///
/// Must be a valid environment variable name.
pub type SecretName = String;

/// A sealed secret value: base64 of nonce followed by AES-GCM output.
pub type EncryptedValue = String;

/// An OpenSSH authorized-key line (`ssh-rsa AAAA... comment`).
pub type PublicKey = String;

/// An environment name (e.g., local, staging, prod).
pub type EnvName = String;

/// A recipient identity: a user handle, headless label, or machine name.
pub type IdentityName = String;
