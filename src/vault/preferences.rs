//! Per-vault preferences stored in the vault's own settings table.
//!
//! Keeping them inside the vault file means a vault carries its backup,
//! sync and generator preferences with it when it is copied elsewhere.
//! The sync fields are placeholders only; nothing here syncs.

use crate::errors::Result;

use super::store::VaultStore;

/// How often an automatic backup should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupFrequency {
    Never = 0,
    Daily = 1,
    Weekly = 2,
    Monthly = 3,
}

impl BackupFrequency {
    fn from_i64(v: i64) -> Self {
        match v {
            0 => BackupFrequency::Never,
            1 => BackupFrequency::Daily,
            3 => BackupFrequency::Monthly,
            _ => BackupFrequency::Weekly,
        }
    }
}

/// What a future sync would cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOption {
    PasswordsOnly = 0,
    SettingsOnly = 1,
    Everything = 2,
}

impl SyncOption {
    fn from_i64(v: i64) -> Self {
        match v {
            0 => SyncOption::PasswordsOnly,
            1 => SyncOption::SettingsOnly,
            _ => SyncOption::Everything,
        }
    }
}

/// Typed view over the well-known keys of the settings table.
#[derive(Debug, Clone, PartialEq)]
pub struct VaultPreferences {
    pub auto_backup_enabled: bool,
    pub backup_frequency: BackupFrequency,
    pub backup_location: String,
    pub max_backup_count: i64,

    pub sync_enabled: bool,
    pub sync_account_email: String,
    pub sync_option: SyncOption,
    pub auto_sync_enabled: bool,

    pub show_password_strength: bool,
    pub require_password_confirmation: bool,
    pub default_password_length: i64,
}

// ── Setting keys ─────────────────────────────────────────────────────

const AUTO_BACKUP_ENABLED: &str = "backup.autoBackupEnabled";
const BACKUP_FREQUENCY: &str = "backup.backupFrequency";
const BACKUP_LOCATION: &str = "backup.backupLocation";
const MAX_BACKUP_COUNT: &str = "backup.maxBackupCount";
const SYNC_ENABLED: &str = "sync.syncEnabled";
const SYNC_ACCOUNT_EMAIL: &str = "sync.syncAccountEmail";
const SYNC_OPTION: &str = "sync.syncOption";
const AUTO_SYNC_ENABLED: &str = "sync.autoSyncEnabled";
const SHOW_PASSWORD_STRENGTH: &str = "vault.showPasswordStrength";
const REQUIRE_PASSWORD_CONFIRMATION: &str = "vault.requirePasswordConfirmation";
const DEFAULT_PASSWORD_LENGTH: &str = "vault.defaultPasswordLength";

impl Default for VaultPreferences {
    fn default() -> Self {
        Self {
            auto_backup_enabled: false,
            backup_frequency: BackupFrequency::Weekly,
            backup_location: "backups".to_string(),
            max_backup_count: 10,
            sync_enabled: false,
            sync_account_email: String::new(),
            sync_option: SyncOption::Everything,
            auto_sync_enabled: false,
            show_password_strength: true,
            require_password_confirmation: true,
            default_password_length: 16,
        }
    }
}

impl VaultPreferences {
    /// Read preferences from the vault, using defaults for unset keys.
    pub fn load(store: &VaultStore) -> Result<Self> {
        let d = Self::default();
        Ok(Self {
            auto_backup_enabled: store.get_bool(AUTO_BACKUP_ENABLED, d.auto_backup_enabled)?,
            backup_frequency: BackupFrequency::from_i64(
                store.get_int(BACKUP_FREQUENCY, d.backup_frequency as i64)?,
            ),
            backup_location: store.get_string(BACKUP_LOCATION, &d.backup_location)?,
            max_backup_count: store.get_int(MAX_BACKUP_COUNT, d.max_backup_count)?,
            sync_enabled: store.get_bool(SYNC_ENABLED, d.sync_enabled)?,
            sync_account_email: store.get_string(SYNC_ACCOUNT_EMAIL, &d.sync_account_email)?,
            sync_option: SyncOption::from_i64(store.get_int(SYNC_OPTION, d.sync_option as i64)?),
            auto_sync_enabled: store.get_bool(AUTO_SYNC_ENABLED, d.auto_sync_enabled)?,
            show_password_strength: store
                .get_bool(SHOW_PASSWORD_STRENGTH, d.show_password_strength)?,
            require_password_confirmation: store
                .get_bool(REQUIRE_PASSWORD_CONFIRMATION, d.require_password_confirmation)?,
            default_password_length: store
                .get_int(DEFAULT_PASSWORD_LENGTH, d.default_password_length)?,
        })
    }

    /// Write every preference to the vault.
    pub fn save(&self, store: &VaultStore) -> Result<()> {
        store.set_setting(AUTO_BACKUP_ENABLED, self.auto_backup_enabled)?;
        store.set_setting(BACKUP_FREQUENCY, self.backup_frequency as i64)?;
        store.set_setting(BACKUP_LOCATION, self.backup_location.as_str())?;
        store.set_setting(MAX_BACKUP_COUNT, self.max_backup_count)?;
        store.set_setting(SYNC_ENABLED, self.sync_enabled)?;
        store.set_setting(SYNC_ACCOUNT_EMAIL, self.sync_account_email.as_str())?;
        store.set_setting(SYNC_OPTION, self.sync_option as i64)?;
        store.set_setting(AUTO_SYNC_ENABLED, self.auto_sync_enabled)?;
        store.set_setting(SHOW_PASSWORD_STRENGTH, self.show_password_strength)?;
        store.set_setting(
            REQUIRE_PASSWORD_CONFIRMATION,
            self.require_password_confirmation,
        )?;
        store.set_setting(DEFAULT_PASSWORD_LENGTH, self.default_password_length)?;
        Ok(())
    }
}
