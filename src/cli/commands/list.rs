//! `localvault list`: display entries in a table.

use crate::cli::output;
use crate::cli::{open_session, Cli};
use crate::config::Settings;
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli, settings: &Settings, search: Option<&str>, recent: bool) -> Result<()> {
    let session = open_session(cli, settings)?;

    let mut entries = if recent {
        session.entries_by_modified()?
    } else {
        session.entries()?
    };
    if let Some(query) = search {
        entries.retain(|e| e.fields.matches(query));
    }

    output::info(&format!(
        "{}: {} entr{}",
        session.path().display(),
        entries.len(),
        if entries.len() == 1 { "y" } else { "ies" }
    ));

    output::print_entries_table(&entries);

    Ok(())
}
