//! `localvault init`: create a new vault and set its master password.

use std::fs;

use crate::cli::output;
use crate::cli::{prompt_new_password, record_access, vault_display_name, vault_path, Cli};
use crate::config::Settings;
use crate::errors::{Result, VaultError};
use crate::session::VaultSession;
use crate::vault::VaultStore;

/// Execute the `init` command.
pub fn execute(cli: &Cli, settings: &Settings, name: Option<&str>) -> Result<()> {
    let path = vault_path(cli, settings)?;

    // 1. Create the parent directory if it doesn't exist.
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
            output::info(&format!("Created directory: {}", parent.display()));
        }
    }

    // 2. Refuse to re-initialize a vault that already has a master password.
    if path.exists() && VaultStore::open(&path)?.is_initialized()? {
        output::tip("Use `localvault add` to add entries to the existing vault.");
        return Err(VaultError::MasterAlreadyExists);
    }

    // 3. Prompt for the master password and create the vault.
    let password = prompt_new_password(settings.min_password_len)?;
    let session = VaultSession::create(&path, &password)?;

    // 4. Register it in the catalog.
    let display = name.map_or_else(|| vault_display_name(&path), str::to_string);
    record_access(cli, settings, &path, Some(&display));

    output::success(&format!(
        "Vault '{display}' created at {}",
        session.path().display()
    ));
    output::tip("Run `localvault add --title <TITLE>` to add a credential.");
    output::tip("Run `localvault list` to see all entries.");

    Ok(())
}
