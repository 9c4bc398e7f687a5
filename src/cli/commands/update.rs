//! `passvault update` — change fields of an existing credential.

use crate::cli::output;
use crate::cli::{open_vault, read_secret_value, required_field, Cli};
use crate::errors::{PassVaultError, Result};
use crate::vault::CredentialUpdate;

/// Execute the `update` command.
pub fn execute(
    cli: &Cli,
    id: &str,
    service: Option<&str>,
    username: Option<&str>,
    password: Option<&str>,
    generate: bool,
) -> Result<()> {
    let mut update = CredentialUpdate::new();
    if let Some(s) = service {
        update = update.service(required_field("service", s)?);
    }
    if let Some(u) = username {
        update = update.username(required_field("username", u)?);
    }
    if password.is_some() || generate {
        let secret = read_secret_value(password, generate, "New password")?;
        if secret.is_empty() {
            return Err(PassVaultError::CommandFailed(
                "password cannot be empty".into(),
            ));
        }
        update.secret = Some(secret);
    }

    if update.is_empty() {
        return Err(PassVaultError::CommandFailed(
            "nothing to update — pass --service, --username, --password, or --generate".into(),
        ));
    }

    let mut store = open_vault(cli)?;
    let updated = store
        .update(id, update)?
        .ok_or_else(|| PassVaultError::CredentialNotFound(id.to_string()))?;

    output::success(&format!("Updated credential for '{}'", updated.service));

    Ok(())
}
