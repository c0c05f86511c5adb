//! Symmetric authenticated encryption of secret values.
//!
//! Wire format: `base64(nonce || ciphertext || tag)` with the standard
//! padded alphabet.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::trace;
use zeroize::Zeroizing;

use crate::error::{CipherError, Result};

/// Symmetric key size in bytes (AES-256).
pub const KEY_SIZE: usize = 32;

/// AES-GCM nonce size in bytes.
pub const NONCE_SIZE: usize = 12;

const TAG_SIZE: usize = 16;

/// A 256-bit environment key, wiped from memory on drop.
#[derive(Clone)]
pub struct SymmetricKey(Zeroizing<[u8; KEY_SIZE]>);

impl SymmetricKey {
    /// Generate a fresh key from the OS random source.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::Entropy` if the OS cannot supply random bytes.
    /// No fallback key is ever substituted.
    pub fn generate() -> Result<Self> {
        let mut bytes = Zeroizing::new([0u8; KEY_SIZE]);
        OsRng
            .try_fill_bytes(&mut bytes[..])
            .map_err(|e| CipherError::Entropy(e.to_string()))?;
        Ok(Self(bytes))
    }

    /// Build a key from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::InvalidKeyLength` unless exactly 32 bytes are given.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let array: [u8; KEY_SIZE] = bytes
            .try_into()
            .map_err(|_| CipherError::InvalidKeyLength(bytes.len()))?;
        Ok(Self(Zeroizing::new(array)))
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0[..]
    }

    fn cipher(&self) -> Aes256Gcm {
        Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.0[..]))
    }
}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SymmetricKey(..)")
    }
}

/// Seal a plaintext value.
///
/// A fresh random nonce is drawn per call, so sealing the same plaintext
/// twice yields different ciphertexts.
///
/// # Errors
///
/// Returns `CipherError` if the random source or the cipher fails.
pub fn seal(key: &SymmetricKey, plaintext: &str) -> Result<String> {
    trace!(plaintext_len = plaintext.len(), "sealing");

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    OsRng
        .try_fill_bytes(&mut nonce_bytes)
        .map_err(|e| CipherError::Entropy(e.to_string()))?;
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = key
        .cipher()
        .encrypt(nonce, plaintext.as_bytes())
        .map_err(|e| CipherError::EncryptionFailed(e.to_string()))?;

    let mut out = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    out.extend_from_slice(&nonce_bytes);
    out.extend_from_slice(&ciphertext);

    Ok(BASE64.encode(out))
}

/// Open a sealed value.
///
/// # Errors
///
/// - `CipherError::Malformed` if the input is not base64, is too short to
///   hold a nonce and tag, or decrypts to invalid UTF-8.
/// - `CipherError::Authentication` if the tag does not verify (tampering,
///   truncation or wrong key). Partial plaintext is never returned.
pub fn open(key: &SymmetricKey, sealed: &str) -> Result<Zeroizing<String>> {
    trace!(ciphertext_len = sealed.len(), "opening");

    let data = BASE64
        .decode(sealed.trim())
        .map_err(|e| CipherError::Malformed(format!("invalid base64: {}", e)))?;

    if data.len() < NONCE_SIZE + TAG_SIZE {
        return Err(CipherError::Malformed("ciphertext too short".to_string()).into());
    }

    let (nonce, payload) = data.split_at(NONCE_SIZE);
    let plaintext = key
        .cipher()
        .decrypt(Nonce::from_slice(nonce), payload)
        .map_err(|_| CipherError::Authentication)?;

    String::from_utf8(plaintext)
        .map(Zeroizing::new)
        .map_err(|_| CipherError::Malformed("plaintext is not valid UTF-8".to_string()).into())
}
