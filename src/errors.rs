use std::path::PathBuf;

use thiserror::Error;

/// All errors that can occur in LocalVault.
#[derive(Debug, Error)]
pub enum VaultError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed — wrong key or corrupted data")]
    DecryptionFailed,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Master credential errors ---
    #[error("Wrong master password")]
    WrongPassword,

    #[error("Vault is not initialized — no master password has been set")]
    VaultNotInitialized,

    #[error("Vault already has a master password")]
    MasterAlreadyExists,

    // --- Vault errors ---
    #[error("Vault not found at {0}")]
    VaultNotFound(PathBuf),

    #[error("Invalid vault format: {0}")]
    InvalidVaultFormat(String),

    #[error("Entry {0} not found")]
    EntryNotFound(i64),

    #[error("Setting '{key}' holds a {found} value, not {expected}")]
    SettingTypeMismatch {
        key: String,
        expected: &'static str,
        found: String,
    },

    // --- Storage errors ---
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    // --- Catalog errors ---
    #[error("Vault catalog error: {0}")]
    CatalogError(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for LocalVault results.
pub type Result<T> = std::result::Result<T, VaultError>;
