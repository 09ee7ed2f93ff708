//! Unlocked vault session.
//!
//! The store itself is stateless about locking; this is the caller-side
//! object that pairs an open `VaultStore` with the `MasterKey` derived at
//! unlock time.  The key is zeroed when the session is locked or dropped,
//! including when it is dropped on an error path.

use std::path::Path;

use tracing::{info, warn};

use crate::crypto::kdf::{derive_master_key, generate_salt, hash_for_verification};
use crate::crypto::keys::MasterKey;
use crate::errors::{Result, VaultError};
use crate::vault::{EntryField, EntryFields, SettingValue, VaultEntry, VaultStore};

/// An open vault together with its master key.
pub struct VaultSession {
    store: VaultStore,
    key: MasterKey,
}

impl VaultSession {
    /// Initialize a new vault at `path` with `password` and unlock it.
    ///
    /// The file is created if needed.  Fails with `MasterAlreadyExists`
    /// if the vault already has a master password.
    pub fn create(path: &Path, password: &str) -> Result<Self> {
        let store = VaultStore::open(path)?;
        if store.is_initialized()? {
            return Err(VaultError::MasterAlreadyExists);
        }

        let salt = generate_salt();
        store.create_master(&hash_for_verification(password), &salt)?;
        let key = derive_master_key(password.as_bytes(), &salt)?;

        Ok(Self { store, key })
    }

    /// Open an existing vault and unlock it with `password`.
    pub fn unlock(path: &Path, password: &str) -> Result<Self> {
        let store = VaultStore::open(path)?;
        Self::unlock_store(store, password)
    }

    /// Unlock an already-open store.
    pub fn unlock_store(store: VaultStore, password: &str) -> Result<Self> {
        let Some(salt) = store.get_salt()? else {
            return Err(VaultError::VaultNotInitialized);
        };

        if !store.verify(&hash_for_verification(password))? {
            warn!(path = %store.path().display(), "unlock rejected");
            return Err(VaultError::WrongPassword);
        }

        let key = derive_master_key(password.as_bytes(), &salt)?;
        info!(path = %store.path().display(), "vault unlocked");
        Ok(Self { store, key })
    }

    /// Lock the session: the key is zeroed and the still-open store is
    /// handed back.
    pub fn lock(self) -> VaultStore {
        let Self { store, key } = self;
        drop(key);
        info!(path = %store.path().display(), "vault locked");
        store
    }

    /// The underlying store (for settings and other key-less calls).
    pub fn store(&self) -> &VaultStore {
        &self.store
    }

    pub fn path(&self) -> &Path {
        self.store.path()
    }

    // ------------------------------------------------------------------
    // Entry operations with the session key
    // ------------------------------------------------------------------

    pub fn add_entry(&self, fields: &EntryFields) -> Result<i64> {
        self.store.add_entry(fields, &self.key)
    }

    pub fn update_entry(&self, entry: &VaultEntry) -> Result<bool> {
        self.store.update_entry(entry, &self.key)
    }

    pub fn delete_entry(&self, id: i64) -> Result<bool> {
        self.store.delete_entry(id)
    }

    pub fn get_entry(&self, id: i64) -> Result<Option<VaultEntry>> {
        self.store.get_entry(id, &self.key)
    }

    pub fn get_entry_field(&self, id: i64, field: EntryField) -> Result<Option<String>> {
        self.store.get_entry_field(id, field, &self.key)
    }

    pub fn entries(&self) -> Result<Vec<VaultEntry>> {
        self.store.get_all_entries(&self.key)
    }

    /// Entries sorted by `modified_at`, newest first.
    pub fn entries_by_modified(&self) -> Result<Vec<VaultEntry>> {
        let mut entries = self.entries()?;
        entries.sort_by(|a, b| b.modified_at.cmp(&a.modified_at));
        Ok(entries)
    }

    // ------------------------------------------------------------------
    // Settings passthrough
    // ------------------------------------------------------------------

    pub fn set_setting(&self, key: &str, value: impl Into<SettingValue>) -> Result<()> {
        self.store.set_setting(key, value)
    }
}
