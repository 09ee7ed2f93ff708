//! SQLite-backed vault file.
//!
//! `VaultStore` owns one vault file and exposes the master credential,
//! entry CRUD and the typed settings table.  It never holds the master
//! key: every call that touches entry content takes the key as a
//! parameter, so "unlocked" is a property of the caller's session, not
//! of the store.
//!
//! Schema (one file per vault):
//!
//! ```text
//! user(id, master_password_hash TEXT, salt BLOB)          -- at most one row
//! passwords(id AUTOINCREMENT, title_encrypted BLOB, username_encrypted BLOB,
//!           password_encrypted BLOB, url_encrypted BLOB, notes_encrypted BLOB,
//!           created_at DATETIME, modified_at DATETIME)
//! vault_settings(key TEXT PRIMARY KEY, value TEXT, type TEXT)
//! ```
//!
//! Every `*_encrypted` column holds an independent `IV || ciphertext`
//! blob, so one field can be decrypted without touching the others.
//! Listing decrypts every row, which is fine for a personal vault of a
//! few thousand entries.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use subtle::ConstantTimeEq;
use tracing::{debug, info, warn};
use zeroize::Zeroize;

use crate::crypto::encryption::{decrypt, encrypt};
use crate::crypto::kdf::{Salt, SALT_LEN};
use crate::crypto::keys::MasterKey;
use crate::errors::{Result, VaultError};

use super::entry::{EntryField, EntryFields, VaultEntry};
use super::settings::SettingValue;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS user (
        id                   INTEGER PRIMARY KEY AUTOINCREMENT,
        master_password_hash TEXT NOT NULL,
        salt                 BLOB NOT NULL
    );
    CREATE TABLE IF NOT EXISTS passwords (
        id                 INTEGER PRIMARY KEY AUTOINCREMENT,
        title_encrypted    BLOB NOT NULL,
        username_encrypted BLOB NOT NULL,
        password_encrypted BLOB NOT NULL,
        url_encrypted      BLOB,
        notes_encrypted    BLOB,
        created_at         DATETIME NOT NULL,
        modified_at        DATETIME NOT NULL
    );
    CREATE TABLE IF NOT EXISTS vault_settings (
        key   TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        type  TEXT NOT NULL
    );";

const SELECT_ENTRY: &str = "SELECT id, title_encrypted, username_encrypted, password_encrypted,
            url_encrypted, notes_encrypted, created_at, modified_at
     FROM passwords";

/// An entry row as read from disk, before decryption.
struct RawEntry {
    id: i64,
    blobs: [Option<Vec<u8>>; 5],
    created_at: String,
    modified_at: String,
}

impl RawEntry {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            blobs: [row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?, row.get(5)?],
            created_at: row.get(6)?,
            modified_at: row.get(7)?,
        })
    }

    fn decrypt(self, key: &MasterKey) -> Result<VaultEntry> {
        let [title, username, secret, url, notes] = self.blobs;
        Ok(VaultEntry {
            id: self.id,
            fields: EntryFields {
                title: decrypt_field(title.as_deref(), key)?,
                username: decrypt_field(username.as_deref(), key)?,
                secret: decrypt_field(secret.as_deref(), key)?,
                url: decrypt_field(url.as_deref(), key)?,
                notes: decrypt_field(notes.as_deref(), key)?,
            },
            created_at: parse_timestamp(&self.created_at)?,
            modified_at: parse_timestamp(&self.modified_at)?,
        })
    }
}

/// The main vault handle.  Open one with `VaultStore::open`, then pass
/// the session's `MasterKey` into the entry methods.
pub struct VaultStore {
    /// Path to the vault file on disk (`:memory:` for in-memory stores).
    path: PathBuf,
    conn: Connection,
}

impl VaultStore {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Open (or create) the vault file at `path` and make sure the
    /// schema exists.
    ///
    /// A freshly created file is uninitialized until `create_master`
    /// is called.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|e| storage_error("open", e))?;
        let store = Self::with_connection(path.to_path_buf(), conn)?;

        // Owner-only access to the vault file.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            if let Err(e) = std::fs::set_permissions(path, perms) {
                warn!(path = %path.display(), error = %e, "could not restrict vault permissions");
            }
        }

        info!(path = %path.display(), "opened vault");
        Ok(store)
    }

    /// Open a throwaway in-memory vault (for tests).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| storage_error("open", e))?;
        Self::with_connection(PathBuf::from(":memory:"), conn)
    }

    fn with_connection(path: PathBuf, conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA).map_err(|e| match e {
            rusqlite::Error::SqliteFailure(ref err, _)
                if err.code == rusqlite::ErrorCode::NotADatabase =>
            {
                warn!(path = %path.display(), "file is not a vault");
                VaultError::InvalidVaultFormat(format!("{} is not a vault file", path.display()))
            }
            other => storage_error("create schema", other),
        })?;
        Ok(Self { path, conn })
    }

    // ------------------------------------------------------------------
    // Master credential
    // ------------------------------------------------------------------

    /// Store the master password hash and salt.  Only allowed once.
    pub fn create_master(&self, password_hash: &str, salt: &Salt) -> Result<()> {
        let inserted = self
            .conn
            .execute(
                "INSERT INTO user (master_password_hash, salt)
                 SELECT ?1, ?2 WHERE NOT EXISTS (SELECT 1 FROM user)",
                params![password_hash, &salt[..]],
            )
            .map_err(|e| storage_error("create_master", e))?;

        if inserted == 0 {
            warn!(path = %self.path.display(), "master credential already exists");
            return Err(VaultError::MasterAlreadyExists);
        }

        info!(path = %self.path.display(), "vault initialized");
        Ok(())
    }

    /// Returns `true` once a master credential has been stored.
    pub fn is_initialized(&self) -> Result<bool> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM user", [], |row| row.get(0))
            .map_err(|e| storage_error("is_initialized", e))?;
        Ok(count > 0)
    }

    /// Compare a verification hash against the stored one.
    ///
    /// Returns `false` for an uninitialized vault.  The comparison is
    /// constant-time.  A match does not unlock anything by itself; the
    /// caller still derives the key from the password and salt.
    pub fn verify(&self, password_hash: &str) -> Result<bool> {
        let stored: Option<String> = self
            .conn
            .query_row(
                "SELECT master_password_hash FROM user ORDER BY id LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| storage_error("verify", e))?;

        Ok(stored.is_some_and(|s| s.as_bytes().ct_eq(password_hash.as_bytes()).into()))
    }

    /// The stored salt, or `None` for an uninitialized vault.
    pub fn get_salt(&self) -> Result<Option<Salt>> {
        let blob: Option<Vec<u8>> = self
            .conn
            .query_row("SELECT salt FROM user ORDER BY id LIMIT 1", [], |row| {
                row.get(0)
            })
            .optional()
            .map_err(|e| storage_error("get_salt", e))?;

        blob.map(|bytes| {
            Salt::try_from(bytes.as_slice()).map_err(|_| {
                VaultError::InvalidVaultFormat(format!(
                    "stored salt is {} bytes, expected {SALT_LEN}",
                    bytes.len()
                ))
            })
        })
        .transpose()
    }

    // ------------------------------------------------------------------
    // Entries
    // ------------------------------------------------------------------

    /// Encrypt every field of `fields` separately and insert a new row.
    ///
    /// Returns the id assigned by the store.
    pub fn add_entry(&self, fields: &EntryFields, key: &MasterKey) -> Result<i64> {
        let blobs = encrypt_fields(fields, key)?;
        let now = format_timestamp(Utc::now());

        self.conn
            .execute(
                "INSERT INTO passwords (title_encrypted, username_encrypted, password_encrypted,
                                        url_encrypted, notes_encrypted, created_at, modified_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
                params![blobs[0], blobs[1], blobs[2], blobs[3], blobs[4], now],
            )
            .map_err(|e| storage_error("add_entry", e))?;

        let id = self.conn.last_insert_rowid();
        debug!(id, "added entry");
        Ok(id)
    }

    /// Re-encrypt all fields of an existing entry and bump `modified_at`.
    ///
    /// Returns `false` if no entry has `entry.id`.  `created_at` is
    /// never changed.
    pub fn update_entry(&self, entry: &VaultEntry, key: &MasterKey) -> Result<bool> {
        let blobs = encrypt_fields(&entry.fields, key)?;
        let now = format_timestamp(Utc::now());

        let updated = self
            .conn
            .execute(
                "UPDATE passwords
                 SET title_encrypted = ?1, username_encrypted = ?2, password_encrypted = ?3,
                     url_encrypted = ?4, notes_encrypted = ?5, modified_at = ?6
                 WHERE id = ?7",
                params![blobs[0], blobs[1], blobs[2], blobs[3], blobs[4], now, entry.id],
            )
            .map_err(|e| storage_error("update_entry", e))?;

        if updated == 0 {
            debug!(id = entry.id, "update of missing entry");
            return Ok(false);
        }
        debug!(id = entry.id, "updated entry");
        Ok(true)
    }

    /// Remove an entry.  Returns `false` if it did not exist.
    pub fn delete_entry(&self, id: i64) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM passwords WHERE id = ?1", params![id])
            .map_err(|e| storage_error("delete_entry", e))?;

        debug!(id, deleted = deleted > 0, "delete entry");
        Ok(deleted > 0)
    }

    /// Decrypt and return one entry, or `None` if the id is unknown.
    pub fn get_entry(&self, id: i64, key: &MasterKey) -> Result<Option<VaultEntry>> {
        let raw = self
            .conn
            .query_row(
                &format!("{SELECT_ENTRY} WHERE id = ?1"),
                params![id],
                RawEntry::from_row,
            )
            .optional()
            .map_err(|e| storage_error("get_entry", e))?;

        raw.map(|r| r.decrypt(key)).transpose()
    }

    /// Decrypt every entry, in insertion order.
    ///
    /// A row that fails to decrypt is skipped and logged by id; the rest
    /// are still returned.  `get_entry` on that id reports the error.
    pub fn get_all_entries(&self, key: &MasterKey) -> Result<Vec<VaultEntry>> {
        let raws = self.query_raw_entries()?;
        let mut entries = Vec::with_capacity(raws.len());
        for raw in raws {
            let id = raw.id;
            match raw.decrypt(key) {
                Ok(entry) => entries.push(entry),
                Err(e) => warn!(id, error = %e, "skipping unreadable entry"),
            }
        }
        Ok(entries)
    }

    /// Decrypt a single field of one entry without touching the others.
    pub fn get_entry_field(
        &self,
        id: i64,
        field: EntryField,
        key: &MasterKey,
    ) -> Result<Option<String>> {
        let blob: Option<Option<Vec<u8>>> = self
            .conn
            .query_row(
                &format!("SELECT {} FROM passwords WHERE id = ?1", field.column()),
                params![id],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| storage_error("get_entry_field", e))?;

        blob.map(|b| decrypt_field(b.as_deref(), key)).transpose()
    }

    /// Entries whose title, username or url contain `query`
    /// (case-insensitive).  Decrypts the whole table.
    pub fn search_entries(&self, query: &str, key: &MasterKey) -> Result<Vec<VaultEntry>> {
        let mut entries = self.get_all_entries(key)?;
        entries.retain(|e| e.fields.matches(query));
        Ok(entries)
    }

    /// Number of stored entries (no decryption).
    pub fn entry_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM passwords", [], |row| row.get(0))
            .map_err(|e| storage_error("entry_count", e))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    fn query_raw_entries(&self) -> Result<Vec<RawEntry>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_ENTRY} ORDER BY id"))
            .map_err(|e| storage_error("get_all_entries", e))?;

        let rows = stmt
            .query_map([], RawEntry::from_row)
            .map_err(|e| storage_error("get_all_entries", e))?;

        let mut raws = Vec::new();
        for row in rows {
            raws.push(row.map_err(|e| storage_error("get_all_entries", e))?);
        }
        Ok(raws)
    }

    // ------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------

    /// Insert or overwrite a setting.
    pub fn set_setting(&self, key: &str, value: impl Into<SettingValue>) -> Result<()> {
        let value = value.into();
        self.conn
            .execute(
                "INSERT INTO vault_settings (key, value, type) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, type = excluded.type",
                params![key, value.to_stored(), value.type_tag()],
            )
            .map_err(|e| storage_error("set_setting", e))?;

        debug!(key, type_tag = value.type_tag(), "stored setting");
        Ok(())
    }

    /// Read a setting, or `None` if it is not set.
    pub fn get_setting(&self, key: &str) -> Result<Option<SettingValue>> {
        let row: Option<(String, String)> = self
            .conn
            .query_row(
                "SELECT value, type FROM vault_settings WHERE key = ?1",
                params![key],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()
            .map_err(|e| storage_error("get_setting", e))?;

        row.map(|(value, tag)| SettingValue::from_stored(key, &value, &tag))
            .transpose()
    }

    /// Read a setting, falling back to `default` when it is not set.
    pub fn get_setting_or(
        &self,
        key: &str,
        default: impl Into<SettingValue>,
    ) -> Result<SettingValue> {
        Ok(self.get_setting(key)?.unwrap_or_else(|| default.into()))
    }

    pub fn get_bool(&self, key: &str, default: bool) -> Result<bool> {
        self.get_typed(key, default, "bool", SettingValue::as_bool)
    }

    pub fn get_int(&self, key: &str, default: i64) -> Result<i64> {
        self.get_typed(key, default, "int", SettingValue::as_int)
    }

    pub fn get_double(&self, key: &str, default: f64) -> Result<f64> {
        self.get_typed(key, default, "double", SettingValue::as_double)
    }

    pub fn get_string(&self, key: &str, default: &str) -> Result<String> {
        self.get_typed(key, default.to_string(), "string", |v| {
            v.as_str().map(str::to_string)
        })
    }

    fn get_typed<T>(
        &self,
        key: &str,
        default: T,
        expected: &'static str,
        extract: impl Fn(&SettingValue) -> Option<T>,
    ) -> Result<T> {
        match self.get_setting(key)? {
            None => Ok(default),
            Some(value) => extract(&value).ok_or_else(|| mismatch(key, expected, &value)),
        }
    }

    /// Returns `true` if the setting exists.
    pub fn has_setting(&self, key: &str) -> Result<bool> {
        let found: Option<i64> = self
            .conn
            .query_row(
                "SELECT 1 FROM vault_settings WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| storage_error("has_setting", e))?;
        Ok(found.is_some())
    }

    /// Remove a setting.  Returns `false` if it was not set.
    pub fn remove_setting(&self, key: &str) -> Result<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM vault_settings WHERE key = ?1", params![key])
            .map_err(|e| storage_error("remove_setting", e))?;
        Ok(removed > 0)
    }

    /// All setting keys, sorted.
    pub fn list_setting_keys(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM vault_settings ORDER BY key")
            .map_err(|e| storage_error("list_setting_keys", e))?;

        let keys = stmt
            .query_map([], |row| row.get(0))
            .map_err(|e| storage_error("list_setting_keys", e))?
            .collect::<rusqlite::Result<Vec<String>>>()
            .map_err(|e| storage_error("list_setting_keys", e))?;
        Ok(keys)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the path to the vault file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

// ----------------------------------------------------------------------
// Helpers
// ----------------------------------------------------------------------

/// Log a storage failure and wrap it.
fn storage_error(op: &'static str, e: rusqlite::Error) -> VaultError {
    warn!(op, error = %e, "vault storage operation failed");
    VaultError::Storage(e)
}

fn mismatch(key: &str, expected: &'static str, found: &SettingValue) -> VaultError {
    VaultError::SettingTypeMismatch {
        key: key.to_string(),
        expected,
        found: found.type_tag().to_string(),
    }
}

fn encrypt_fields(fields: &EntryFields, key: &MasterKey) -> Result<[Vec<u8>; 5]> {
    let k = key.as_bytes();
    Ok([
        encrypt(k, fields.title.as_bytes())?,
        encrypt(k, fields.username.as_bytes())?,
        encrypt(k, fields.secret.as_bytes())?,
        encrypt(k, fields.url.as_bytes())?,
        encrypt(k, fields.notes.as_bytes())?,
    ])
}

/// Decrypt one column.  A NULL column (nullable url/notes) is empty.
fn decrypt_field(blob: Option<&[u8]>, key: &MasterKey) -> Result<String> {
    let Some(blob) = blob else {
        return Ok(String::new());
    };
    let plaintext = decrypt(key.as_bytes(), blob)?;

    // A wrong key that happens to yield valid padding gives garbage,
    // which is almost never valid UTF-8.
    String::from_utf8(plaintext).map_err(|e| {
        let mut bad_bytes = e.into_bytes();
        bad_bytes.zeroize();
        VaultError::DecryptionFailed
    })
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored timestamp.  Besides RFC 3339, naive ISO timestamps
/// without an offset are accepted and read as local time, which is how
/// older vault files wrote them.
fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| {
            Local
                .from_local_datetime(&naive)
                .earliest()
                .map_or_else(|| naive.and_utc(), |dt| dt.with_timezone(&Utc))
        })
        .ok_or_else(|| VaultError::InvalidVaultFormat(format!("bad timestamp '{s}'")))
}
