//! `localvault setting`: read and write vault-scoped settings.
//!
//! Settings are not encrypted, so these commands open the vault file
//! without asking for the master password.

use comfy_table::{ContentArrangement, Table};

use crate::cli::output;
use crate::cli::{open_store, vault_path, Cli, SettingAction};
use crate::config::Settings;
use crate::errors::{Result, VaultError};
use crate::vault::SettingValue;

/// Execute a `setting` subcommand.
pub fn execute(cli: &Cli, settings: &Settings, action: &SettingAction) -> Result<()> {
    let path = vault_path(cli, settings)?;
    let store = open_store(&path)?;

    match action {
        SettingAction::Get { key } => {
            let value = store
                .get_setting(key)?
                .ok_or_else(|| VaultError::CommandFailed(format!("setting '{key}' is not set")))?;
            println!("{value}");
        }
        SettingAction::Set {
            key,
            value,
            type_tag,
        } => {
            let value = SettingValue::parse_with_tag(value, type_tag.as_deref())?;
            let tag = value.type_tag();
            store.set_setting(key, value)?;
            output::success(&format!("Set '{key}' ({tag})"));
        }
        SettingAction::List => {
            let keys = store.list_setting_keys()?;
            if keys.is_empty() {
                output::info("No settings stored in this vault.");
                return Ok(());
            }

            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Key", "Value", "Type"]);
            for key in keys {
                if let Some(value) = store.get_setting(&key)? {
                    table.add_row(vec![key, value.to_stored(), value.type_tag().to_string()]);
                }
            }
            println!("{table}");
        }
        SettingAction::Remove { key } => {
            if store.remove_setting(key)? {
                output::success(&format!("Removed '{key}'"));
            } else {
                output::warning(&format!("Setting '{key}' was not set"));
            }
        }
    }

    Ok(())
}
