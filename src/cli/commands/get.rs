//! `passvault get` — print a single credential's password.

use crate::cli::{open_vault, Cli};
use crate::errors::{PassVaultError, Result};

/// Execute the `get` command.
pub fn execute(cli: &Cli, id: &str) -> Result<()> {
    let store = open_vault(cli)?;

    let credential = store
        .get(id)
        .ok_or_else(|| PassVaultError::CredentialNotFound(id.to_string()))?;
    println!("{}", credential.secret());

    Ok(())
}
