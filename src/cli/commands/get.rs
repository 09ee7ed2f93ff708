//! `localvault get`: print a single field of an entry.

use crate::cli::{open_session, Cli};
use crate::config::Settings;
use crate::errors::{Result, VaultError};
use crate::vault::EntryField;

/// Execute the `get` command.
pub fn execute(cli: &Cli, settings: &Settings, id: i64, field: &str) -> Result<()> {
    let field: EntryField = field.parse().map_err(VaultError::CommandFailed)?;
    let session = open_session(cli, settings)?;

    // Only the requested column is decrypted.
    let value = session
        .get_entry_field(id, field)?
        .ok_or(VaultError::EntryNotFound(id))?;
    println!("{value}");

    Ok(())
}
