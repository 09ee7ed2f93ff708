//! Master password handling: salt generation, PBKDF2 key derivation and
//! the verification hash.
//!
//! Two different values are computed from the master password and they
//! must never be confused:
//!
//! - the **master key** is PBKDF2-HMAC-SHA256 over the password and the
//!   per-vault salt; it encrypts entry fields and is never stored;
//! - the **verification hash** is a plain SHA-256 of the password, stored
//!   in the vault so an unlock attempt can be checked before any
//!   decryption happens. It is not salted and is never used as a key.

use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use super::keys::{MasterKey, KEY_LEN};
use crate::errors::{Result, VaultError};

/// Length of the per-vault salt in bytes.
pub const SALT_LEN: usize = 16;

/// PBKDF2 iteration count. Changing it makes existing vaults unopenable.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// A per-vault salt.
pub type Salt = [u8; SALT_LEN];

/// Generate a cryptographically random 16-byte salt.
pub fn generate_salt() -> Salt {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    salt
}

/// Derive the 32-byte master key from a password and the vault salt.
///
/// The same password + salt always produce the same key, which is what
/// lets a vault be unlocked without ever storing the key.
pub fn derive_master_key(password: &[u8], salt: &[u8]) -> Result<MasterKey> {
    if salt.len() != SALT_LEN {
        return Err(VaultError::KeyDerivationFailed(format!(
            "salt must be {SALT_LEN} bytes, got {}",
            salt.len()
        )));
    }

    let mut bytes = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password, salt, PBKDF2_ITERATIONS, &mut bytes);

    let key = MasterKey::new(bytes);
    bytes.zeroize();
    Ok(key)
}

/// Lowercase hex SHA-256 of the UTF-8 password bytes.
pub fn hash_for_verification(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Check a password against a stored verification hash.
///
/// The comparison runs in constant time over the hex digests.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let actual = hash_for_verification(password);
    actual.as_bytes().ct_eq(stored_hash.as_bytes()).into()
}
