//! `localvault delete`: remove an entry from the vault.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{open_session, Cli};
use crate::config::Settings;
use crate::errors::{Result, VaultError};
use crate::vault::EntryField;

/// Execute the `delete` command.
pub fn execute(cli: &Cli, settings: &Settings, id: i64, force: bool) -> Result<()> {
    let session = open_session(cli, settings)?;

    let title = session
        .get_entry_field(id, EntryField::Title)?
        .ok_or(VaultError::EntryNotFound(id))?;

    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete entry {id} ('{title}')?"))
            .default(false)
            .interact()
            .map_err(|e| VaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    if !session.delete_entry(id)? {
        return Err(VaultError::EntryNotFound(id));
    }

    output::success(&format!("Deleted entry {id} ('{title}')"));
    Ok(())
}
