//! Vault module: encrypted credential storage.
//!
//! This module provides:
//! - `EntryFields` / `VaultEntry` credential types (`entry`)
//! - Typed setting values (`settings`)
//! - The SQLite-backed `VaultStore` (`store`)
//! - Typed per-vault preferences on top of the settings table (`preferences`)

pub mod entry;
pub mod preferences;
pub mod settings;
pub mod store;

// Re-export the most commonly used items.
pub use entry::{EntryField, EntryFields, VaultEntry};
pub use preferences::{BackupFrequency, SyncOption, VaultPreferences};
pub use settings::SettingValue;
pub use store::VaultStore;
