//! Command-line interface: Clap argument parser, output helpers and command implementations.

pub mod commands;
pub mod output;

use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::warn;
use zeroize::Zeroizing;

use crate::catalog::{VaultCatalog, VaultInfo};
use crate::config::Settings;
use crate::errors::{Result, VaultError};
use crate::session::VaultSession;
use crate::vault::VaultStore;

/// Environment variable consulted for the master password before prompting.
pub const PASSWORD_ENV: &str = "LOCALVAULT_PASSWORD";

/// LocalVault CLI: local-first encrypted password vault.
#[derive(Parser)]
#[command(
    name = "localvault",
    about = "Local-first encrypted password vault",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory holding vaults, the catalog and localvault.toml
    #[arg(long, default_value = ".localvault", global = true)]
    pub data_dir: String,

    /// Vault name (inside the data directory) or path to a vault file
    #[arg(short, long, global = true)]
    pub vault: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new vault and choose its master password
    Init {
        /// Display name for the vault catalog (default: file stem)
        #[arg(long)]
        name: Option<String>,
    },

    /// Add a credential
    Add {
        /// Entry title (e.g. "Bank")
        #[arg(long)]
        title: String,
        /// Login name
        #[arg(long, default_value = "")]
        username: String,
        /// Site address
        #[arg(long, default_value = "")]
        url: String,
        /// Free-form notes
        #[arg(long, default_value = "")]
        notes: String,
        /// Generate a random password instead of prompting
        #[arg(short, long)]
        generate: bool,
        /// Length of the generated password
        #[arg(long)]
        length: Option<usize>,
    },

    /// Print one field of a credential (the password by default)
    Get {
        /// Entry id
        id: i64,
        /// Field to print: title, username, password, url, notes
        #[arg(short, long, default_value = "password")]
        field: String,
    },

    /// List credentials
    List {
        /// Only show entries whose title, username or url contain this text
        #[arg(short, long)]
        search: Option<String>,
        /// Sort by last modification, newest first
        #[arg(long)]
        recent: bool,
    },

    /// Change fields of a credential
    Edit {
        /// Entry id
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        /// Prompt for a new password
        #[arg(long)]
        password: bool,
        /// Replace the password with a generated one
        #[arg(short, long, conflicts_with = "password")]
        generate: bool,
        /// Length of the generated password
        #[arg(long)]
        length: Option<usize>,
    },

    /// Delete a credential
    Delete {
        /// Entry id
        id: i64,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Print a random password
    Generate {
        /// Number of characters
        #[arg(short, long)]
        length: Option<usize>,
    },

    /// Manage vault-scoped settings
    Setting {
        #[command(subcommand)]
        action: SettingAction,
    },

    /// Manage the catalog of known vaults
    Vaults {
        #[command(subcommand)]
        action: VaultsAction,
    },

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Setting subcommands.
#[derive(clap::Subcommand)]
pub enum SettingAction {
    /// Print a setting's value
    Get {
        key: String,
    },
    /// Set a setting (type guessed unless --type is given)
    Set {
        key: String,
        value: String,
        /// One of: bool, int, double, string
        #[arg(long = "type")]
        type_tag: Option<String>,
    },
    /// List all settings
    List,
    /// Remove a setting
    Remove {
        key: String,
    },
}

/// Catalog subcommands.
#[derive(clap::Subcommand)]
pub enum VaultsAction {
    /// List known vaults, most recently used first
    List,
    /// Register an existing vault file
    Add {
        /// Path to the vault file
        path: String,
        /// Display name (default: file stem)
        #[arg(long)]
        name: Option<String>,
    },
    /// Forget a vault (the file is left untouched)
    Remove {
        /// Path to the vault file
        path: String,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Absolute data directory from the CLI arguments.
pub fn data_dir(cli: &Cli) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(&cli.data_dir))
}

/// Load `localvault.toml` from the data directory.
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    Settings::load(&data_dir(cli)?)
}

/// Resolve `--vault` to a file path.
///
/// Anything that looks like a path is used as-is; a bare name is looked
/// up in the data directory; no value means the default vault.
pub fn vault_path(cli: &Cli, settings: &Settings) -> Result<PathBuf> {
    let data_dir = data_dir(cli)?;
    Ok(match &cli.vault {
        Some(v) if v.contains(std::path::MAIN_SEPARATOR) || v.contains('/') => {
            std::env::current_dir()?.join(v)
        }
        Some(name) => settings.vault_path(&data_dir, name),
        None => settings.default_vault_path(&data_dir),
    })
}

/// Get the master password, trying in order:
/// 1. `LOCALVAULT_PASSWORD` env var (scripts, tests)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter master password")
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new master password with confirmation (used by `init`).
///
/// Also respects `LOCALVAULT_PASSWORD`.  Enforces a minimum length.
pub fn prompt_new_password(min_len: usize) -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            if pw.chars().count() < min_len {
                return Err(VaultError::CommandFailed(format!(
                    "password must be at least {min_len} characters"
                )));
            }
            return Ok(Zeroizing::new(pw));
        }
    }

    loop {
        let password = dialoguer::Password::new()
            .with_prompt("Choose master password")
            .with_confirmation(
                "Confirm master password",
                "Passwords do not match, try again",
            )
            .interact()
            .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?;

        if password.chars().count() < min_len {
            output::warning(&format!(
                "Password must be at least {min_len} characters. Try again."
            ));
            continue;
        }

        return Ok(Zeroizing::new(password));
    }
}

/// Read an entry's password from piped stdin or a hidden prompt.
pub fn read_entry_secret() -> Result<Zeroizing<String>> {
    if !io::stdin().is_terminal() {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        let line = strip_line_ending(&buf);
        return Ok(Zeroizing::new(line.to_string()));
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Password for this entry")
        .allow_empty_password(true)
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("input prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Drop one trailing `\n` or `\r\n`; other whitespace is part of the value.
fn strip_line_ending(s: &str) -> &str {
    let s = s.strip_suffix('\n').unwrap_or(s);
    s.strip_suffix('\r').unwrap_or(s)
}

/// Open an existing vault file without unlocking it.
pub fn open_store(path: &Path) -> Result<VaultStore> {
    if !path.exists() {
        return Err(VaultError::VaultNotFound(path.to_path_buf()));
    }
    VaultStore::open(path)
}

/// Open and unlock the selected vault, recording the access in the catalog.
pub fn open_session(cli: &Cli, settings: &Settings) -> Result<VaultSession> {
    let path = vault_path(cli, settings)?;
    let store = open_store(&path)?;
    let password = prompt_password()?;
    let session = VaultSession::unlock_store(store, &password)?;
    record_access(cli, settings, &path, None);
    Ok(session)
}

/// Display name for a vault file: its stem.
pub fn vault_display_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Add or touch a vault in the catalog.
///
/// Catalog problems never fail the command that opened the vault; they
/// are logged and skipped.
pub fn record_access(cli: &Cli, settings: &Settings, path: &Path, name: Option<&str>) {
    let result = data_dir(cli).and_then(|dir| {
        let mut catalog = VaultCatalog::load(&settings.catalog_path(&dir))?;
        match (name, catalog.find(path).is_some()) {
            (None, true) => catalog.update_last_accessed(path).map(|_| ()),
            (Some(n), _) => catalog.add_vault(VaultInfo::new(n, path)),
            (None, false) => catalog.add_vault(VaultInfo::new(vault_display_name(path), path)),
        }
    });

    if let Err(e) = result {
        warn!(error = %e, "could not update vault catalog");
    }
}
