//! Cryptographic primitives for LocalVault.
//!
//! This module provides:
//! - AES-256-CBC field encryption and decryption (`encryption`)
//! - PBKDF2 master-key derivation and the verification hash (`kdf`)
//! - The zeroize-on-drop `MasterKey` (`keys`)
//! - Random password generation (`password`)

pub mod encryption;
pub mod kdf;
pub mod keys;
pub mod password;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, derive_master_key, ...};
pub use encryption::{decrypt, encrypt};
pub use kdf::{derive_master_key, generate_salt, hash_for_verification, verify_password, Salt};
pub use keys::MasterKey;
pub use password::generate_password;
