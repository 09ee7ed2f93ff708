//! `localvault add`: store a new credential.

use crate::cli::output;
use crate::cli::{open_session, read_entry_secret, Cli};
use crate::config::Settings;
use crate::crypto::generate_password;
use crate::errors::Result;
use crate::vault::EntryFields;

/// Arguments of the `add` command.
pub struct AddArgs<'a> {
    pub title: &'a str,
    pub username: &'a str,
    pub url: &'a str,
    pub notes: &'a str,
    pub generate: bool,
    pub length: Option<usize>,
}

/// Execute the `add` command.
pub fn execute(cli: &Cli, settings: &Settings, args: &AddArgs<'_>) -> Result<()> {
    let session = open_session(cli, settings)?;

    let secret = if args.generate {
        generate_password(args.length.unwrap_or(settings.generated_password_len))?
    } else {
        read_entry_secret()?
    };

    let fields = EntryFields::new(
        args.title,
        args.username,
        secret.as_str(),
        args.url,
        args.notes,
    );
    let id = session.add_entry(&fields)?;

    output::success(&format!("Added '{}' as entry {id}", args.title));
    if args.generate {
        output::tip(&format!("Run `localvault get {id}` to print the generated password."));
    }

    Ok(())
}
