//! Credential records stored in a vault.
//!
//! `EntryFields` holds the five text fields of a credential in plaintext;
//! it only exists in memory and is wiped on drop.  On disk every field is
//! a separate `IV || ciphertext` blob, see `VaultStore`.

use std::fmt;

use chrono::{DateTime, Utc};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// The plaintext text fields of one credential.
#[derive(Clone, Default, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct EntryFields {
    pub title: String,
    pub username: String,
    /// The stored password itself.
    pub secret: String,
    pub url: String,
    pub notes: String,
}

impl EntryFields {
    pub fn new(
        title: impl Into<String>,
        username: impl Into<String>,
        secret: impl Into<String>,
        url: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            username: username.into(),
            secret: secret.into(),
            url: url.into(),
            notes: notes.into(),
        }
    }

    /// Case-insensitive substring match on title, username and url.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        [&self.title, &self.username, &self.url]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

impl fmt::Debug for EntryFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryFields")
            .field("title", &self.title)
            .field("username", &self.username)
            .field("secret", &"[REDACTED]")
            .field("url", &self.url)
            .field("notes", &"[REDACTED]")
            .finish()
    }
}

/// A decrypted credential together with its store-assigned metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultEntry {
    /// Row id assigned by the store; never reused after deletion.
    pub id: i64,
    pub fields: EntryFields,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// Names a single encrypted column of the `passwords` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryField {
    Title,
    Username,
    Secret,
    Url,
    Notes,
}

impl EntryField {
    pub const ALL: [EntryField; 5] = [
        EntryField::Title,
        EntryField::Username,
        EntryField::Secret,
        EntryField::Url,
        EntryField::Notes,
    ];

    /// The column holding this field's ciphertext.
    pub(crate) fn column(self) -> &'static str {
        match self {
            EntryField::Title => "title_encrypted",
            EntryField::Username => "username_encrypted",
            EntryField::Secret => "password_encrypted",
            EntryField::Url => "url_encrypted",
            EntryField::Notes => "notes_encrypted",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EntryField::Title => "title",
            EntryField::Username => "username",
            EntryField::Secret => "password",
            EntryField::Url => "url",
            EntryField::Notes => "notes",
        }
    }
}

impl std::str::FromStr for EntryField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "title" => Ok(EntryField::Title),
            "username" | "user" => Ok(EntryField::Username),
            "password" | "secret" => Ok(EntryField::Secret),
            "url" => Ok(EntryField::Url),
            "notes" => Ok(EntryField::Notes),
            other => Err(format!("unknown entry field '{other}'")),
        }
    }
}
