//! `localvault vaults`: manage the catalog of known vaults.

use std::path::PathBuf;

use crate::catalog::{VaultCatalog, VaultInfo};
use crate::cli::output;
use crate::cli::{data_dir, vault_display_name, Cli, VaultsAction};
use crate::config::Settings;
use crate::errors::{Result, VaultError};

/// Execute a `vaults` subcommand.
pub fn execute(cli: &Cli, settings: &Settings, action: &VaultsAction) -> Result<()> {
    let catalog_path = settings.catalog_path(&data_dir(cli)?);
    let mut catalog = VaultCatalog::load(&catalog_path)?;

    match action {
        VaultsAction::List => output::print_vaults_table(&catalog.recent()),
        VaultsAction::Add { path, name } => {
            let path = absolute(path)?;
            if !path.exists() {
                return Err(VaultError::VaultNotFound(path));
            }
            let name = name.clone().unwrap_or_else(|| vault_display_name(&path));
            catalog.add_vault(VaultInfo::new(name.as_str(), &path))?;
            output::success(&format!("Registered '{name}' ({})", path.display()));
        }
        VaultsAction::Remove { path } => {
            let path = absolute(path)?;
            if catalog.remove_vault(&path)? {
                output::success(&format!("Forgot {}", path.display()));
            } else {
                output::warning(&format!("{} is not in the catalog", path.display()));
            }
        }
    }

    Ok(())
}

fn absolute(path: &str) -> Result<PathBuf> {
    Ok(std::env::current_dir()?.join(path))
}
