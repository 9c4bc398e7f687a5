//! `passvault add` — store a new credential.

use crate::cli::output;
use crate::cli::{open_vault, read_secret_value, required_field, Cli};
use crate::errors::{PassVaultError, Result};

/// Execute the `add` command.
pub fn execute(
    cli: &Cli,
    service: &str,
    username: &str,
    password: Option<&str>,
    generate: bool,
) -> Result<()> {
    let service = required_field("service", service)?;
    let username = required_field("username", username)?;

    let secret = read_secret_value(password, generate, &format!("Password for {service}"))?;
    if secret.is_empty() {
        return Err(PassVaultError::CommandFailed(
            "password cannot be empty".into(),
        ));
    }

    let mut store = open_vault(cli)?;
    let credential = store.add(&service, &username, &secret)?;

    output::success(&format!(
        "Saved credential for '{}' ({} total)",
        credential.service,
        store.len()
    ));
    output::tip(&format!("Id: {}", credential.id));
    if generate {
        output::tip("Run `passvault get <ID>` to see the generated password.");
    }

    Ok(())
}
