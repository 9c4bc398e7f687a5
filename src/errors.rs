use thiserror::Error;

/// All errors that can occur in PassVault.
#[derive(Debug, Error)]
pub enum PassVaultError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Integrity check failed — credential data was modified or corrupted")]
    IntegrityFailed,

    #[error("Authentication failed — wrong master password")]
    AuthenticationFailed,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Vault errors ---
    #[error("Could not unlock vault — wrong password or damaged vault file")]
    VaultLocked,

    #[error("Invalid vault format: {0}")]
    InvalidVaultFormat(String),

    #[error("Credential '{0}' not found")]
    CredentialNotFound(String),

    // --- Generator errors ---
    #[error("Generator configuration error: {0}")]
    ConfigurationError(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

impl PassVaultError {
    /// Returns `true` for failures to read, write, or parse the vault file.
    pub fn is_storage_failure(&self) -> bool {
        matches!(
            self,
            Self::Io(_) | Self::InvalidVaultFormat(_) | Self::SerializationError(_)
        )
    }
}

/// Convenience type alias for PassVault results.
pub type Result<T> = std::result::Result<T, PassVaultError>;
