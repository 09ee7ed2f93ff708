//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::catalog::VaultInfo;
use crate::vault::VaultEntry;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a table of entries (ID, Title, Username, URL, Modified).
///
/// Passwords and notes are never shown here.
pub fn print_entries_table(entries: &[VaultEntry]) {
    if entries.is_empty() {
        info("No entries in this vault yet.");
        tip("Run `localvault add --title <TITLE>` to add your first credential.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Title", "Username", "URL", "Modified"]);

    for e in entries {
        table.add_row(vec![
            e.id.to_string(),
            e.fields.title.clone(),
            e.fields.username.clone(),
            e.fields.url.clone(),
            e.modified_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]);
    }

    println!("{table}");
}

/// Print a table of known vaults (Name, Path, Last accessed).
pub fn print_vaults_table(vaults: &[VaultInfo]) {
    if vaults.is_empty() {
        info("No known vaults.");
        tip("Run `localvault init` to create one.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Path", "Last accessed"]);

    for v in vaults {
        table.add_row(vec![
            v.name.clone(),
            v.path.display().to_string(),
            v.last_accessed.format("%b %d, %Y %H:%M").to_string(),
        ]);
    }

    println!("{table}");
}
