//! Vault catalog: the list of known vault files.
//!
//! The catalog only tracks where vaults live and when they were last
//! opened; it never reads vault content.  Entries are unique by path and
//! are stored as JSON at `<data_dir>/vaults.json` (configurable).

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::{Result, VaultError};

/// One known vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultInfo {
    pub name: String,
    pub path: PathBuf,
    pub last_accessed: DateTime<Utc>,
}

impl VaultInfo {
    /// A catalog record stamped with the current time.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            last_accessed: Utc::now(),
        }
    }
}

/// On-disk shape of the catalog file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    vaults: Vec<VaultInfo>,
}

/// The set of known vaults, persisted after every change.
#[derive(Debug)]
pub struct VaultCatalog {
    file: PathBuf,
    vaults: Vec<VaultInfo>,
}

impl VaultCatalog {
    /// Load the catalog from `file`.
    ///
    /// A missing file is an empty catalog.  Records whose vault file no
    /// longer exists are dropped.
    pub fn load(file: &Path) -> Result<Self> {
        let vaults = if file.exists() {
            let contents = fs::read_to_string(file)?;
            let parsed: CatalogFile = serde_json::from_str(&contents).map_err(|e| {
                VaultError::CatalogError(format!("failed to parse {}: {e}", file.display()))
            })?;
            parsed.vaults
        } else {
            Vec::new()
        };

        let before = vaults.len();
        let vaults: Vec<VaultInfo> = vaults.into_iter().filter(|v| v.path.exists()).collect();
        if vaults.len() < before {
            info!(pruned = before - vaults.len(), "dropped catalog records for missing vaults");
        }

        Ok(Self {
            file: file.to_path_buf(),
            vaults,
        })
    }

    /// Known vaults in the order they were first added.
    pub fn vaults(&self) -> &[VaultInfo] {
        &self.vaults
    }

    /// Known vaults, most recently accessed first.
    pub fn recent(&self) -> Vec<VaultInfo> {
        let mut list = self.vaults.clone();
        list.sort_by(|a, b| b.last_accessed.cmp(&a.last_accessed));
        list
    }

    /// Look up a vault by path.
    pub fn find(&self, path: &Path) -> Option<&VaultInfo> {
        self.vaults.iter().find(|v| v.path == path)
    }

    pub fn len(&self) -> usize {
        self.vaults.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vaults.is_empty()
    }

    /// Add a vault, or update name and last-accessed time if its path
    /// is already known.
    pub fn add_vault(&mut self, vault: VaultInfo) -> Result<()> {
        match self.vaults.iter_mut().find(|v| v.path == vault.path) {
            Some(existing) => {
                existing.name = vault.name;
                existing.last_accessed = vault.last_accessed;
                debug!(path = %existing.path.display(), "updated catalog record");
            }
            None => {
                debug!(path = %vault.path.display(), "added catalog record");
                self.vaults.push(vault);
            }
        }
        self.save()
    }

    /// Forget a vault.  Returns `false` if the path was not known.
    pub fn remove_vault(&mut self, path: &Path) -> Result<bool> {
        let before = self.vaults.len();
        self.vaults.retain(|v| v.path != path);
        if self.vaults.len() == before {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Stamp a known vault as accessed now.  Returns `false` if the path
    /// was not known.
    pub fn update_last_accessed(&mut self, path: &Path) -> Result<bool> {
        let Some(vault) = self.vaults.iter_mut().find(|v| v.path == path) else {
            return Ok(false);
        };
        vault.last_accessed = Utc::now();
        self.save()?;
        Ok(true)
    }

    /// Write the catalog to disk atomically (temp file + rename).
    fn save(&self) -> Result<()> {
        let body = serde_json::to_string_pretty(&CatalogFileRef {
            vaults: &self.vaults,
        })
        .map_err(|e| VaultError::SerializationError(format!("catalog: {e}")))?;

        let parent = self.file.parent().unwrap_or(Path::new("."));
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
        let tmp_path = parent.join(format!(
            ".{}.tmp",
            self.file.file_name().unwrap_or_default().to_string_lossy()
        ));

        fs::write(&tmp_path, body)?;
        fs::rename(&tmp_path, &self.file)?;
        Ok(())
    }
}

/// Borrowing twin of `CatalogFile` so saving does not clone the list.
#[derive(Serialize)]
struct CatalogFileRef<'a> {
    vaults: &'a [VaultInfo],
}
