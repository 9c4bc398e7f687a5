//! `passvault list` — display all credentials in a table.

use crate::cli::output;
use crate::cli::{open_vault, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli, show: bool) -> Result<()> {
    let store = open_vault(cli)?;
    let credentials = store.list_all();

    output::info(&format!("{} credential(s)", credentials.len()));
    output::print_credentials_table(&credentials, show);

    Ok(())
}
