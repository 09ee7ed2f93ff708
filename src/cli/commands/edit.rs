//! `localvault edit`: change fields of an existing entry.

use crate::cli::output;
use crate::cli::{open_session, read_entry_secret, Cli};
use crate::config::Settings;
use crate::crypto::generate_password;
use crate::errors::{Result, VaultError};

/// Arguments of the `edit` command.  `None` leaves a field unchanged.
pub struct EditArgs<'a> {
    pub title: Option<&'a str>,
    pub username: Option<&'a str>,
    pub url: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub prompt_password: bool,
    pub generate: bool,
    pub length: Option<usize>,
}

impl EditArgs<'_> {
    fn changes_anything(&self) -> bool {
        self.title.is_some()
            || self.username.is_some()
            || self.url.is_some()
            || self.notes.is_some()
            || self.prompt_password
            || self.generate
    }
}

/// Execute the `edit` command.
pub fn execute(cli: &Cli, settings: &Settings, id: i64, args: &EditArgs<'_>) -> Result<()> {
    if !args.changes_anything() {
        output::info("Nothing to change.");
        output::tip("Pass --title, --username, --url, --notes, --password or --generate.");
        return Ok(());
    }

    let session = open_session(cli, settings)?;
    let mut entry = session.get_entry(id)?.ok_or(VaultError::EntryNotFound(id))?;

    if let Some(title) = args.title {
        entry.fields.title = title.to_string();
    }
    if let Some(username) = args.username {
        entry.fields.username = username.to_string();
    }
    if let Some(url) = args.url {
        entry.fields.url = url.to_string();
    }
    if let Some(notes) = args.notes {
        entry.fields.notes = notes.to_string();
    }
    if args.generate {
        let pw = generate_password(args.length.unwrap_or(settings.generated_password_len))?;
        entry.fields.secret = pw.to_string();
    } else if args.prompt_password {
        entry.fields.secret = read_entry_secret()?.to_string();
    }

    if !session.update_entry(&entry)? {
        return Err(VaultError::EntryNotFound(id));
    }

    output::success(&format!("Updated entry {id} ('{}')", entry.fields.title));
    Ok(())
}
