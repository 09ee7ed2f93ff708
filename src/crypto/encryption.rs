//! AES-256-CBC field encryption.
//!
//! Each call to `encrypt` generates a fresh random 16-byte IV and
//! prepends it to the ciphertext.  `decrypt` splits the IV back out
//! before decrypting.
//!
//! Layout of the returned byte buffer:
//!   [ 16-byte IV | AES-256-CBC ciphertext, PKCS#7 padded ]
//!
//! There is no authentication tag. A flipped bit in the ciphertext is
//! only caught when it happens to break the padding.

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::RngCore;

use crate::errors::{Result, VaultError};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Size of the CBC initialization vector in bytes.
pub const IV_LEN: usize = 16;

/// Encrypt `plaintext` with a 32-byte `key`.
///
/// Returns the IV prepended to the ciphertext (IV || ciphertext).
pub fn encrypt(key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    // Fresh IV per call.
    let mut iv = [0u8; IV_LEN];
    rand::rng().fill_bytes(&mut iv);

    let cipher = Aes256CbcEnc::new_from_slices(key, &iv)
        .map_err(|e| VaultError::EncryptionFailed(format!("invalid key length: {e}")))?;

    let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    let mut output = Vec::with_capacity(IV_LEN + ciphertext.len());
    output.extend_from_slice(&iv);
    output.extend_from_slice(&ciphertext);
    Ok(output)
}

/// Decrypt data that was produced by `encrypt`.
///
/// Short input, a bad key length and broken padding all map to the same
/// `DecryptionFailed` error so callers cannot tell them apart.
pub fn decrypt(key: &[u8], iv_and_ciphertext: &[u8]) -> Result<Vec<u8>> {
    if iv_and_ciphertext.len() < IV_LEN {
        return Err(VaultError::DecryptionFailed);
    }

    let (iv, ciphertext) = iv_and_ciphertext.split_at(IV_LEN);

    let cipher =
        Aes256CbcDec::new_from_slices(key, iv).map_err(|_| VaultError::DecryptionFailed)?;

    cipher
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| VaultError::DecryptionFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_is_iv_plus_whole_blocks() {
        let key = [7u8; 32];
        // 5 bytes pad up to one block; 16 bytes pad up to two.
        assert_eq!(encrypt(&key, b"hello").unwrap().len(), IV_LEN + 16);
        assert_eq!(encrypt(&key, &[0u8; 16]).unwrap().len(), IV_LEN + 32);
        assert_eq!(encrypt(&key, b"").unwrap().len(), IV_LEN + 16);
    }

    #[test]
    fn empty_plaintext_roundtrips() {
        let key = [9u8; 32];
        let blob = encrypt(&key, b"").unwrap();
        assert_eq!(decrypt(&key, &blob).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn encrypt_rejects_short_key() {
        let result = encrypt(&[1u8; 16], b"data");
        assert!(matches!(result, Err(VaultError::EncryptionFailed(_))));
    }

    #[test]
    fn decrypt_rejects_iv_only_blob() {
        let key = [3u8; 32];
        // An IV with no ciphertext blocks has no padding to strip.
        let result = decrypt(&key, &[0u8; IV_LEN]);
        assert!(matches!(result, Err(VaultError::DecryptionFailed)));
    }

    #[test]
    fn decrypt_rejects_partial_block() {
        let key = [3u8; 32];
        let mut blob = encrypt(&key, b"some field").unwrap();
        blob.pop();
        assert!(matches!(decrypt(&key, &blob), Err(VaultError::DecryptionFailed)));
    }
}
