//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;

use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{PassVaultError, Result};
use crate::generator::{self, GeneratorConfig};
use crate::vault::{VaultStatus, VaultStore};

/// Minimum master password length to prevent trivially weak passwords.
const MIN_PASSWORD_LEN: usize = 8;

/// Environment variable holding the master password for scripted use.
const PASSWORD_ENV: &str = "PASSVAULT_PASSWORD";

/// PassVault CLI: encrypted credential vault.
#[derive(Parser)]
#[command(
    name = "passvault",
    about = "Encrypted credential vault and password generator",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault file (default: `vault_file` from .passvault.toml, or passwords.dat)
    #[arg(long, env = "PASSVAULT_FILE", global = true)]
    pub vault: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// List all credentials, newest first
    List {
        /// Show passwords instead of masking them
        #[arg(long)]
        show: bool,
    },

    /// Add a credential
    Add {
        /// Service name (e.g. github.com)
        service: String,
        /// Login name or email
        username: String,
        /// Password (omit for interactive prompt)
        #[arg(short, long, conflicts_with = "generate")]
        password: Option<String>,
        /// Generate the password using the configured generator settings
        #[arg(short, long)]
        generate: bool,
    },

    /// Print a credential's password
    Get {
        /// Credential id
        id: String,
    },

    /// Change fields of an existing credential
    Update {
        /// Credential id
        id: String,
        /// New service name
        #[arg(long)]
        service: Option<String>,
        /// New username
        #[arg(long)]
        username: Option<String>,
        /// New password
        #[arg(short, long, conflicts_with = "generate")]
        password: Option<String>,
        /// Generate a new password
        #[arg(short, long)]
        generate: bool,
    },

    /// Delete a credential
    Delete {
        /// Credential id
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Generate a random password
    Generate(GenerateArgs),
}

/// Overrides for the configured generator settings.
#[derive(clap::Args, Debug, Default)]
pub struct GenerateArgs {
    /// Number of characters
    #[arg(short, long)]
    pub length: Option<usize>,

    /// Leave out uppercase letters
    #[arg(long)]
    pub no_uppercase: bool,

    /// Leave out lowercase letters
    #[arg(long)]
    pub no_lowercase: bool,

    /// Leave out digits
    #[arg(long)]
    pub no_digits: bool,

    /// Leave out symbols
    #[arg(long)]
    pub no_symbols: bool,

    /// Extra characters to add to the pool
    #[arg(long)]
    pub custom: Option<String>,

    /// Characters to remove from the built-in categories
    #[arg(long)]
    pub exclude: Option<String>,
}

impl GenerateArgs {
    /// Layer the command-line flags over `base`.
    pub fn apply(&self, mut base: GeneratorConfig) -> GeneratorConfig {
        if let Some(length) = self.length {
            base.length = length;
        }
        base.uppercase &= !self.no_uppercase;
        base.lowercase &= !self.no_lowercase;
        base.digits &= !self.no_digits;
        base.symbols &= !self.no_symbols;
        if let Some(custom) = &self.custom {
            base.custom_chars = custom.clone();
        }
        if let Some(exclude) = &self.exclude {
            base.exclude_chars = exclude.clone();
        }
        base
    }
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Load settings from the working directory.
pub fn settings() -> Result<Settings> {
    let cwd = std::env::current_dir()?;
    Settings::load(&cwd)
}

/// Resolve the vault file path: `--vault` / `PASSVAULT_FILE` first, then
/// the settings file, then the default.
pub fn vault_path(cli: &Cli) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    match &cli.vault {
        Some(path) => Ok(cwd.join(path)),
        None => Ok(Settings::load(&cwd)?.vault_path(&cwd)),
    }
}

/// Prompt for the master password and open (or create) the vault.
pub fn open_vault(cli: &Cli) -> Result<VaultStore> {
    let path = vault_path(cli)?;

    let password = match VaultStore::status(&path) {
        VaultStatus::Uninitialized => {
            output::info(&format!("No vault at {} — creating one.", path.display()));
            prompt_new_password()?
        }
        VaultStatus::Created => prompt_password()?,
    };

    VaultStore::open(&path, password.as_bytes())
}

/// Get the master password, trying in order:
/// 1. `PASSVAULT_PASSWORD` env var (scripts, CI)
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
        .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new master password with confirmation.
///
/// Also respects `PASSVAULT_PASSWORD` for scripted usage.
/// Enforces a minimum password length.
pub fn prompt_new_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            if pw.chars().count() < MIN_PASSWORD_LEN {
                return Err(PassVaultError::CommandFailed(format!(
                    "master password must be at least {MIN_PASSWORD_LEN} characters"
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
            .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))?;

        if password.chars().count() < MIN_PASSWORD_LEN {
            output::warning(&format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters. Try again."
            ));
            continue;
        }

        return Ok(Zeroizing::new(password));
    }
}

/// Work out a credential password from one of four sources:
/// an inline flag, the generator, piped stdin, or a hidden prompt.
pub fn read_secret_value(
    inline: Option<&str>,
    generate: bool,
    prompt: &str,
) -> Result<Zeroizing<String>> {
    if let Some(v) = inline {
        output::warning("Password provided on command line — it may appear in shell history.");
        return Ok(Zeroizing::new(v.to_string()));
    }

    if generate {
        return generator::generate(&settings()?.generator);
    }

    if !io::stdin().is_terminal() {
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        let trimmed = buf.trim_end_matches(['\r', '\n']);
        return Ok(Zeroizing::new(trimmed.to_string()));
    }

    let value = dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| PassVaultError::CommandFailed(format!("input prompt: {e}")))?;
    Ok(Zeroizing::new(value))
}

/// Trim a service or username and reject empty values.
pub fn required_field(name: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(PassVaultError::CommandFailed(format!(
            "{name} cannot be empty"
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_field_trims() {
        assert_eq!(required_field("service", "  github.com ").unwrap(), "github.com");
    }

    #[test]
    fn required_field_rejects_blank() {
        assert!(required_field("username", "   ").is_err());
        assert!(required_field("username", "").is_err());
    }

    #[test]
    fn generate_args_override_base() {
        let args = GenerateArgs {
            length: Some(12),
            no_symbols: true,
            exclude: Some("0O".into()),
            ..GenerateArgs::default()
        };

        let config = args.apply(GeneratorConfig::default());
        assert_eq!(config.length, 12);
        assert!(!config.symbols);
        assert!(config.uppercase);
        assert_eq!(config.exclude_chars, "0O");
    }

    #[test]
    fn generate_args_cannot_reenable_disabled_category() {
        let base = GeneratorConfig {
            digits: false,
            ..GeneratorConfig::default()
        };
        let config = GenerateArgs::default().apply(base);
        assert!(!config.digits);
    }

    #[test]
    fn cli_parses_add_with_generate() {
        let cli = Cli::try_parse_from(["passvault", "add", "github.com", "alice", "--generate"])
            .unwrap();
        match cli.command {
            Commands::Add {
                service, generate, ..
            } => {
                assert_eq!(service, "github.com");
                assert!(generate);
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn cli_rejects_password_with_generate() {
        let result = Cli::try_parse_from([
            "passvault", "add", "s", "u", "--password", "x", "--generate",
        ]);
        assert!(result.is_err());
    }
}
