//! Random password generation for new entries.

use rand::Rng;
use zeroize::Zeroizing;

use crate::errors::{Result, VaultError};

/// Characters a generated password is drawn from.
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*";

/// Generate a random password of `length` characters.
///
/// Each character is picked uniformly from `CHARSET` using the
/// thread-local CSPRNG.
pub fn generate_password(length: usize) -> Result<Zeroizing<String>> {
    if length == 0 {
        return Err(VaultError::CommandFailed(
            "password length must be at least 1".into(),
        ));
    }

    let mut rng = rand::rng();
    let password: String = (0..length)
        .map(|_| char::from(CHARSET[rng.random_range(0..CHARSET.len())]))
        .collect();

    Ok(Zeroizing::new(password))
}
