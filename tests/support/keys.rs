//! SSH key fixtures.
//!
//! RSA generation is slow, so a small pool of keys is generated once per
//! test binary.

use std::path::Path;
use std::sync::OnceLock;

use rand::rngs::OsRng;
use rsa::pkcs1::EncodeRsaPrivateKey;
use rsa::RsaPrivateKey;
use ssh_key::private::{Ed25519Keypair, KeypairData};
use ssh_key::public::KeyData;

const POOL_SIZE: usize = 3;

static POOL: OnceLock<Vec<RsaPrivateKey>> = OnceLock::new();

/// Key `index` of the pool.
pub fn rsa_key(index: usize) -> &'static RsaPrivateKey {
    let pool = POOL.get_or_init(|| {
        (0..POOL_SIZE)
            .map(|_| RsaPrivateKey::new(&mut OsRng, 2048).expect("failed to generate RSA key"))
            .collect()
    });
    &pool[index]
}

/// Authorized-key line for key `index`.
pub fn public_line(index: usize, comment: &str) -> String {
    let public = ssh_key::public::RsaPublicKey::try_from(&rsa_key(index).to_public_key())
        .expect("failed to convert public key");
    ssh_key::PublicKey::new(KeyData::Rsa(public), comment)
        .to_openssh()
        .expect("failed to encode public key")
}

/// An Ed25519 authorized-key line, which cannot be used for encryption.
pub fn ed25519_line() -> String {
    let keypair = Ed25519Keypair::from_seed(&[5u8; 32]);
    ssh_key::PrivateKey::new(KeypairData::Ed25519(keypair), "ed@test")
        .expect("failed to build ed25519 key")
        .public_key()
        .to_openssh()
        .expect("failed to encode ed25519 key")
}

/// Write `id_rsa` and `id_rsa.pub` for key `index` into `dir`.
pub fn install(dir: &Path, index: usize) -> String {
    std::fs::create_dir_all(dir).expect("failed to create key dir");
    let public = public_line(index, &format!("key{}@test", index));
    let pem = rsa_key(index)
        .to_pkcs1_pem(rsa::pkcs1::LineEnding::LF)
        .expect("failed to encode private key");
    std::fs::write(dir.join("id_rsa"), pem.as_bytes()).expect("failed to write private key");
    std::fs::write(dir.join("id_rsa.pub"), format!("{}\n", public))
        .expect("failed to write public key");
    public
}
