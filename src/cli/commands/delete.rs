//! `passvault delete` — remove a credential from the vault.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{open_vault, Cli};
use crate::errors::{PassVaultError, Result};

/// Execute the `delete` command.
pub fn execute(cli: &Cli, id: &str, force: bool) -> Result<()> {
    let mut store = open_vault(cli)?;

    let service = store
        .get(id)
        .map(|c| c.service.clone())
        .ok_or_else(|| PassVaultError::CredentialNotFound(id.to_string()))?;

    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete credential for '{service}'?"))
            .default(false)
            .interact()
            .map_err(|e| PassVaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    if !store.delete(id)? {
        return Err(PassVaultError::CredentialNotFound(id.to_string()));
    }

    output::success(&format!("Deleted credential for '{service}'"));

    Ok(())
}
