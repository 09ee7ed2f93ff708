//! Integration tests for the LocalVault vault store.

use std::thread::sleep;
use std::time::Duration;

use localvault::crypto::{generate_salt, hash_for_verification, MasterKey};
use localvault::errors::VaultError;
use localvault::vault::{EntryField, EntryFields, SettingValue, VaultStore};
use tempfile::TempDir;

/// Helper: create a temporary vault file path inside a fresh temp dir.
fn vault_path() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("test.vault");
    (dir, path)
}

fn key() -> MasterKey {
    MasterKey::new([0x3Cu8; 32])
}

fn bank() -> EntryFields {
    EntryFields::new("Bank", "alice", "p@ss", "bank.com", "")
}

// ---------------------------------------------------------------------------
// Master credential
// ---------------------------------------------------------------------------

#[test]
fn new_vault_is_uninitialized() {
    let store = VaultStore::open_in_memory().unwrap();
    assert!(!store.is_initialized().unwrap());
    assert_eq!(store.get_salt().unwrap(), None);
    assert!(!store.verify(&hash_for_verification("anything")).unwrap());
}

#[test]
fn create_master_only_once() {
    let store = VaultStore::open_in_memory().unwrap();
    let salt1 = generate_salt();
    let salt2 = generate_salt();

    store
        .create_master(&hash_for_verification("first"), &salt1)
        .expect("first create");
    let second = store.create_master(&hash_for_verification("second"), &salt2);
    assert!(matches!(second, Err(VaultError::MasterAlreadyExists)));

    // Only the first credential is visible.
    assert_eq!(store.get_salt().unwrap(), Some(salt1));
    assert!(store.verify(&hash_for_verification("first")).unwrap());
    assert!(!store.verify(&hash_for_verification("second")).unwrap());
}

#[test]
fn master_credential_survives_reopen() {
    let (_dir, path) = vault_path();
    let salt = generate_salt();

    {
        let store = VaultStore::open(&path).unwrap();
        store
            .create_master(&hash_for_verification("pw"), &salt)
            .unwrap();
    }

    let store = VaultStore::open(&path).unwrap();
    assert!(store.is_initialized().unwrap());
    assert_eq!(store.get_salt().unwrap(), Some(salt));
    assert!(store.verify(&hash_for_verification("pw")).unwrap());
}

// ---------------------------------------------------------------------------
// Entry lifecycle
// ---------------------------------------------------------------------------

#[test]
fn entry_crud_lifecycle() {
    let store = VaultStore::open_in_memory().unwrap();
    let k = key();

    let id = store.add_entry(&bank(), &k).unwrap();
    let entry = store.get_entry(id, &k).unwrap().expect("entry exists");
    assert_eq!(entry.id, id);
    assert_eq!(entry.fields, bank());
    assert_eq!(entry.created_at, entry.modified_at);

    sleep(Duration::from_millis(5));

    let mut changed = entry.clone();
    changed.fields.secret = "n3w-p@ss".to_string();
    assert!(store.update_entry(&changed, &k).unwrap());

    let updated = store.get_entry(id, &k).unwrap().expect("entry exists");
    assert_eq!(updated.fields.secret, "n3w-p@ss");
    assert_eq!(updated.fields.title, "Bank");
    assert_eq!(updated.created_at, entry.created_at);
    assert!(updated.modified_at > entry.modified_at);

    assert!(store.delete_entry(id).unwrap());
    assert!(store.get_entry(id, &k).unwrap().is_none());
}

#[test]
fn missing_entries_are_reported_not_raised() {
    let store = VaultStore::open_in_memory().unwrap();
    let k = key();

    assert!(store.get_entry(99, &k).unwrap().is_none());
    assert!(!store.delete_entry(99).unwrap());
    assert!(store.get_entry_field(99, EntryField::Title, &k).unwrap().is_none());

    let id = store.add_entry(&bank(), &k).unwrap();
    let mut ghost = store.get_entry(id, &k).unwrap().unwrap();
    ghost.id = id + 100;
    assert!(!store.update_entry(&ghost, &k).unwrap());
}

#[test]
fn delete_twice_fails_second_time() {
    let store = VaultStore::open_in_memory().unwrap();
    let id = store.add_entry(&bank(), &key()).unwrap();
    assert!(store.delete_entry(id).unwrap());
    assert!(!store.delete_entry(id).unwrap());
}

#[test]
fn ids_are_never_reused() {
    let (_dir, path) = vault_path();
    let k = key();

    let store = VaultStore::open(&path).unwrap();
    let a = store.add_entry(&bank(), &k).unwrap();
    let b = store.add_entry(&bank(), &k).unwrap();
    assert!(b > a);

    // Deleting the highest id must not free it up for the next insert.
    assert!(store.delete_entry(b).unwrap());
    let c = store.add_entry(&bank(), &k).unwrap();
    assert!(c > b);
    drop(store);

    let store = VaultStore::open(&path).unwrap();
    assert!(store.delete_entry(c).unwrap());
    let d = store.add_entry(&bank(), &k).unwrap();
    assert!(d > c);
}

#[test]
fn get_all_entries_in_insertion_order() {
    let store = VaultStore::open_in_memory().unwrap();
    let k = key();

    for title in ["Mail", "Bank", "Router"] {
        store
            .add_entry(&EntryFields::new(title, "u", "p", "", ""), &k)
            .unwrap();
    }

    let titles: Vec<String> = store
        .get_all_entries(&k)
        .unwrap()
        .into_iter()
        .map(|e| e.fields.title.clone())
        .collect();
    assert_eq!(titles, ["Mail", "Bank", "Router"]);
    assert_eq!(store.entry_count().unwrap(), 3);
}

#[test]
fn single_field_is_decrypted_alone() {
    let store = VaultStore::open_in_memory().unwrap();
    let k = key();
    let id = store
        .add_entry(
            &EntryFields::new("Mail", "bob@example.org", "hunter2", "mail.example.org", "2FA on"),
            &k,
        )
        .unwrap();

    let get = |f| store.get_entry_field(id, f, &k).unwrap().unwrap();
    assert_eq!(get(EntryField::Title), "Mail");
    assert_eq!(get(EntryField::Username), "bob@example.org");
    assert_eq!(get(EntryField::Secret), "hunter2");
    assert_eq!(get(EntryField::Url), "mail.example.org");
    assert_eq!(get(EntryField::Notes), "2FA on");
}

#[test]
fn search_matches_title_username_and_url() {
    let store = VaultStore::open_in_memory().unwrap();
    let k = key();
    store.add_entry(&bank(), &k).unwrap();
    store
        .add_entry(&EntryFields::new("Mail", "bob", "x", "mail.example.org", "bank notes"), &k)
        .unwrap();

    assert_eq!(store.search_entries("BANK", &k).unwrap().len(), 1);
    assert_eq!(store.search_entries("example", &k).unwrap().len(), 1);
    assert_eq!(store.search_entries("", &k).unwrap().len(), 2);
    assert!(store.search_entries("zzz", &k).unwrap().is_empty());
}

#[test]
fn wrong_key_fails_to_read_entries() {
    let store = VaultStore::open_in_memory().unwrap();
    let id = store.add_entry(&bank(), &key()).unwrap();

    let wrong = MasterKey::new([0x3Du8; 32]);
    match store.get_entry(id, &wrong) {
        Err(VaultError::DecryptionFailed) => {}
        Ok(Some(entry)) => assert_ne!(entry.fields, bank()),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn damaged_entry_is_skipped_when_listing() {
    let (_dir, path) = vault_path();
    let k = key();

    {
        let store = VaultStore::open(&path).unwrap();
        for title in ["Bank", "Mail", "Router"] {
            store
                .add_entry(&EntryFields::new(title, "u", "p", "x.example", ""), &k)
                .unwrap();
        }
    }

    // Truncate one blob behind the store's back.
    let conn = rusqlite::Connection::open(&path).unwrap();
    conn.execute("UPDATE passwords SET notes_encrypted = x'0102' WHERE id = 2", [])
        .unwrap();
    drop(conn);

    let store = VaultStore::open(&path).unwrap();
    let ids: Vec<i64> = store
        .get_all_entries(&k)
        .unwrap()
        .iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(ids, [1, 3]);
    assert_eq!(store.search_entries("example", &k).unwrap().len(), 2);
    assert!(matches!(store.get_entry(2, &k), Err(VaultError::DecryptionFailed)));
    assert!(store.get_entry(1, &k).unwrap().is_some());
    assert_eq!(store.entry_count().unwrap(), 3);
}

#[test]
fn entries_survive_reopen() {
    let (_dir, path) = vault_path();
    let k = key();

    let id = {
        let store = VaultStore::open(&path).unwrap();
        store.add_entry(&bank(), &k).unwrap()
    };

    let store = VaultStore::open(&path).unwrap();
    let entry = store.get_entry(id, &k).unwrap().unwrap();
    assert_eq!(entry.fields, bank());
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[test]
fn bool_setting_roundtrip() {
    let store = VaultStore::open_in_memory().unwrap();
    store.set_setting("backup.enabled", true).unwrap();
    assert!(store.get_bool("backup.enabled", false).unwrap());
    assert_eq!(
        store.get_setting_or("backup.enabled", false).unwrap(),
        SettingValue::Bool(true)
    );
}

#[test]
fn int_setting_comes_back_as_int() {
    let store = VaultStore::open_in_memory().unwrap();
    store.set_setting("backup.count", 10).unwrap();

    assert_eq!(store.get_setting("backup.count").unwrap(), Some(SettingValue::Int(10)));
    assert_eq!(store.get_int("backup.count", 0).unwrap(), 10);
    assert!(matches!(
        store.get_string("backup.count", ""),
        Err(VaultError::SettingTypeMismatch { .. })
    ));
}

#[test]
fn double_and_string_settings_roundtrip() {
    let store = VaultStore::open_in_memory().unwrap();
    store.set_setting("ui.scale", 1.25).unwrap();
    store.set_setting("backup.location", "backups").unwrap();

    assert_eq!(store.get_double("ui.scale", 0.0).unwrap(), 1.25);
    assert_eq!(store.get_string("backup.location", "").unwrap(), "backups");
}

#[test]
fn missing_setting_returns_default() {
    let store = VaultStore::open_in_memory().unwrap();
    assert!(!store.has_setting("nope").unwrap());
    assert_eq!(store.get_setting("nope").unwrap(), None);
    assert_eq!(store.get_int("nope", 7).unwrap(), 7);
    assert_eq!(
        store.get_setting_or("nope", "fallback").unwrap(),
        SettingValue::Text("fallback".into())
    );
}

#[test]
fn set_setting_overwrites_value_and_type() {
    let store = VaultStore::open_in_memory().unwrap();
    store.set_setting("k", "ten").unwrap();
    store.set_setting("k", 10).unwrap();

    assert_eq!(store.get_setting("k").unwrap(), Some(SettingValue::Int(10)));
    assert_eq!(store.list_setting_keys().unwrap(), ["k"]);
}

#[test]
fn remove_and_list_settings() {
    let store = VaultStore::open_in_memory().unwrap();
    store.set_setting("sync.enabled", false).unwrap();
    store.set_setting("backup.count", 3).unwrap();

    assert_eq!(
        store.list_setting_keys().unwrap(),
        ["backup.count", "sync.enabled"]
    );
    assert!(store.remove_setting("sync.enabled").unwrap());
    assert!(!store.remove_setting("sync.enabled").unwrap());
    assert!(!store.has_setting("sync.enabled").unwrap());
    assert_eq!(store.list_setting_keys().unwrap(), ["backup.count"]);
}
