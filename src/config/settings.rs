use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{Result, VaultError};

/// Application configuration, loaded from `<data_dir>/localvault.toml`.
///
/// Every field has a sensible default so LocalVault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// File name of the vault used when none is given (e.g. "default.vault").
    #[serde(default = "default_vault")]
    pub default_vault: String,

    /// File name of the vault catalog inside the data directory.
    #[serde(default = "default_catalog_file")]
    pub catalog_file: String,

    /// Minimum length accepted for a new master password.
    #[serde(default = "default_min_password_len")]
    pub min_password_len: usize,

    /// Length of passwords produced by `generate` when not specified.
    #[serde(default = "default_generated_password_len")]
    pub generated_password_len: usize,

    /// Log filter used when `LOCALVAULT_LOG` is not set (e.g. "warn", "debug").
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_vault() -> String {
    "default.vault".to_string()
}

fn default_catalog_file() -> String {
    "vaults.json".to_string()
}

fn default_min_password_len() -> usize {
    8
}

fn default_generated_password_len() -> usize {
    16
}

fn default_log_level() -> String {
    "warn".to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_vault: default_vault(),
            catalog_file: default_catalog_file(),
            min_password_len: default_min_password_len(),
            generated_password_len: default_generated_password_len(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the data directory.
    pub const FILE_NAME: &'static str = "localvault.toml";

    /// Load settings from `<data_dir>/localvault.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let config_path = data_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            VaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Path of a named vault file inside the data directory.
    ///
    /// Names without an extension get `.vault` appended.
    pub fn vault_path(&self, data_dir: &Path, name: &str) -> PathBuf {
        if Path::new(name).extension().is_some() {
            data_dir.join(name)
        } else {
            data_dir.join(format!("{name}.vault"))
        }
    }

    /// Path of the default vault.
    pub fn default_vault_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.default_vault)
    }

    /// Path of the vault catalog file.
    pub fn catalog_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.catalog_file)
    }
}

// ── Tests ────────────────────────────────────────────────────────────
