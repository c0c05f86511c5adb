//! Envelope cryptography.
//!
//! Secret values are sealed with a per-environment symmetric key
//! (AES-256-GCM). That key is wrapped once per recipient with the
//! recipient's public key.
//!
//! ## Backends
//!
//! - **symmetric**: AES-256-GCM with a random 96-bit nonce per value.
//! - **ssh**: RSA PKCS#1 v1.5 key wrapping for `ssh-rsa` recipients.
//!
//! ## Adding a New Key Type
//!
//! 1. Implement the `Cipher` trait
//! 2. Add a variant to `PrivateKey` if it needs a new container format
//! 3. Re-export from this module

use zeroize::Zeroizing;

use crate::error::{CipherError, Result};

mod ssh;
mod symmetric;

pub use self::ssh::{fingerprint, parse_recipient, PrivateKey, Rsa};
pub use self::symmetric::{open, seal, SymmetricKey, KEY_SIZE, NONCE_SIZE};

/// Asymmetric key-wrapping backend.
///
/// Wraps short payloads (the environment's symmetric key) for a single
/// recipient and unwraps them with the matching private key.
pub trait Cipher {
    /// Type representing a recipient public key.
    type Recipient;

    /// Type representing a private identity/key.
    type Identity;

    /// Encrypt `payload` for one recipient.
    ///
    /// # Returns
    ///
    /// Base64 encoded ciphertext.
    ///
    /// # Errors
    ///
    /// Returns `CipherError` if encryption fails.
    fn wrap(&self, payload: &[u8], recipient: &Self::Recipient) -> Result<String>;

    /// Decrypt a wrapped payload with a private identity.
    ///
    /// # Errors
    ///
    /// Returns `CipherError` if the ciphertext is malformed or the key
    /// cannot decrypt it.
    fn unwrap(&self, encrypted: &str, identity: &Self::Identity) -> Result<Zeroizing<Vec<u8>>>;

    /// Backend name for display.
    fn name(&self) -> &'static str;
}

/// Wrap a symmetric key for an authorized-key line.
///
/// # Errors
///
/// Returns `CipherError::UnsupportedKeyType` for non-RSA keys.
pub fn wrap_symmetric_key(key: &SymmetricKey, public_key: &str) -> Result<String> {
    let recipient = parse_recipient(public_key)?;
    Rsa.wrap(key.as_bytes(), &recipient)
}

/// Unwrap a symmetric key with a local private key.
///
/// # Errors
///
/// Returns `CipherError` if decryption fails or the result is not a 32-byte key.
pub fn unwrap_symmetric_key(encrypted: &str, identity: &PrivateKey) -> Result<SymmetricKey> {
    let bytes = Rsa.unwrap(encrypted, identity)?;
    SymmetricKey::from_bytes(&bytes).map_err(|_| {
        CipherError::UnwrapFailed(format!(
            "expected a {}-byte key, got {} bytes",
            KEY_SIZE,
            bytes.len()
        ))
        .into()
    })
}
