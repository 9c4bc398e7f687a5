//! High-level vault operations.
//!
//! `VaultStore` is the unlocked session: it owns the session key and the
//! decrypted credentials, and rewrites the whole vault file after every
//! change.  There is no way to hold a `VaultStore` that is not unlocked, and
//! dropping it wipes the session key.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::crypto::encryption::{open, seal};
use crate::crypto::kdf::{create_verifier, verify, MasterVerifier};
use crate::crypto::keys::SessionKey;
use crate::errors::{PassVaultError, Result};

use super::credential::{Credential, CredentialUpdate};
use super::format::{self, EncryptedEntry, VaultFile};
use super::index::CredentialIndex;

/// Whether a vault file exists yet at a given path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultStatus {
    /// No vault file; `open` will create one.
    Uninitialized,
    /// A vault file exists and must be unlocked with its master password.
    Created,
}

/// The main vault handle.  Obtain one with `VaultStore::open`, then use its
/// methods to manage credentials.
pub struct VaultStore {
    /// Path to the vault file on disk.
    path: PathBuf,

    /// Master verifier, written back unchanged on every save.
    verifier: MasterVerifier,

    /// Decrypted credentials for this session.
    credentials: CredentialIndex,

    /// Key for every entry in this session (zeroized on drop).
    session_key: SessionKey,
}

impl std::fmt::Debug for VaultStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultStore")
            .field("path", &self.path)
            .field("credentials", &self.credentials.len())
            .finish_non_exhaustive()
    }
}

impl VaultStore {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Report whether a vault exists at `path` without unlocking it.
    pub fn status(path: &Path) -> VaultStatus {
        if path.exists() {
            VaultStatus::Created
        } else {
            VaultStatus::Uninitialized
        }
    }

    /// Open the vault at `path`, creating it if it does not exist yet.
    ///
    /// For an existing vault the master password is verified and every
    /// entry is decrypted before the store is returned.  Any failure (wrong
    /// password, unreadable or malformed file, a single entry failing its
    /// integrity check) is reported as `VaultLocked`; the cause is only
    /// logged at debug level.  Nothing is unlocked partially.
    pub fn open(path: &Path, secret: &[u8]) -> Result<Self> {
        let result = match Self::status(path) {
            VaultStatus::Uninitialized => Self::create(path, secret),
            VaultStatus::Created => Self::unlock(path, secret),
        };

        result.map_err(|e| {
            debug!(path = %path.display(), error = %e, "vault open failed");
            PassVaultError::VaultLocked
        })
    }

    /// Write a brand-new, empty vault.
    fn create(path: &Path, secret: &[u8]) -> Result<Self> {
        if secret.is_empty() {
            return Err(PassVaultError::KeyDerivationFailed(
                "master password cannot be empty".into(),
            ));
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let (verifier, session_key) = create_verifier(secret)?;

        let store = Self {
            path: path.to_path_buf(),
            verifier,
            credentials: CredentialIndex::new(),
            session_key,
        };
        store.persist()?;

        info!(path = %path.display(), "created new vault");
        Ok(store)
    }

    /// Verify the master password and decrypt every entry.
    fn unlock(path: &Path, secret: &[u8]) -> Result<Self> {
        let file = format::read_vault(path)?;
        let session_key = verify(secret, &file.master_verifier)?;

        let mut credentials = CredentialIndex::new();
        for entry in file.entries {
            if credentials.contains(&entry.id) {
                return Err(PassVaultError::InvalidVaultFormat(format!(
                    "duplicate entry id '{}'",
                    entry.id
                )));
            }

            let plaintext = open(&session_key, &entry.ciphertext, &entry.iv, &entry.auth_tag)
                .map_err(|e| {
                    warn!(id = %entry.id, "entry failed integrity check");
                    e
                })?;

            credentials.insert(Credential {
                id: entry.id,
                service: entry.service,
                username: entry.username,
                secret: plaintext,
                created_at: entry.created_at,
                updated_at: entry.updated_at,
            });
        }

        debug!(path = %path.display(), entries = credentials.len(), "vault unlocked");

        Ok(Self {
            path: path.to_path_buf(),
            verifier: file.master_verifier,
            credentials,
            session_key,
        })
    }

    // ------------------------------------------------------------------
    // Credential operations
    // ------------------------------------------------------------------

    /// All credentials, newest first.  Credentials created at the same
    /// instant keep their insertion order.
    pub fn list_all(&self) -> Vec<&Credential> {
        let mut list = self.credentials.in_insertion_order();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        list
    }

    /// Look up a single credential by id.
    pub fn get(&self, id: &str) -> Option<&Credential> {
        self.credentials.get(id)
    }

    /// Add a new credential and save.
    pub fn add(&mut self, service: &str, username: &str, secret: &str) -> Result<Credential> {
        let credential = Credential {
            id: Uuid::new_v4().to_string(),
            service: service.to_string(),
            username: username.to_string(),
            secret: secret.to_string().into(),
            created_at: Utc::now(),
            updated_at: None,
        };

        self.credentials.insert(credential.clone());
        if let Err(e) = self.persist() {
            self.credentials.remove(&credential.id);
            return Err(e);
        }

        debug!(id = %credential.id, "credential added");
        Ok(credential)
    }

    /// Merge `update` into an existing credential and save.
    ///
    /// Returns `None` (and writes nothing) if `id` is unknown.
    pub fn update(&mut self, id: &str, update: CredentialUpdate) -> Result<Option<Credential>> {
        let Some(existing) = self.credentials.get_mut(id) else {
            return Ok(None);
        };

        let previous = existing.clone();
        existing.apply(update, Utc::now());
        let updated = existing.clone();

        if let Err(e) = self.persist() {
            self.credentials.insert(previous);
            return Err(e);
        }

        debug!(id = %id, "credential updated");
        Ok(Some(updated))
    }

    /// Remove a credential and save.
    ///
    /// Returns `false` (and writes nothing) if `id` is unknown.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let Some((seq, removed)) = self.credentials.remove(id) else {
            return Ok(false);
        };

        if let Err(e) = self.persist() {
            self.credentials.restore(seq, removed);
            return Err(e);
        }

        debug!(id = %id, "credential deleted");
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Re-seal every credential with a fresh nonce and rewrite the vault
    /// file atomically.
    pub fn persist(&self) -> Result<()> {
        let entries = self
            .credentials
            .in_insertion_order()
            .into_iter()
            .map(|credential| self.seal_entry(credential))
            .collect::<Result<Vec<_>>>()?;

        let vault = VaultFile {
            master_verifier: self.verifier.clone(),
            entries,
        };

        format::write_vault(&self.path, &vault)
    }

    fn seal_entry(&self, credential: &Credential) -> Result<EncryptedEntry> {
        let sealed = seal(&self.session_key, credential.secret())?;

        Ok(EncryptedEntry {
            id: credential.id.clone(),
            service: credential.service.clone(),
            username: credential.username.clone(),
            ciphertext: sealed.ciphertext,
            iv: sealed.iv.to_vec(),
            auth_tag: sealed.auth_tag.to_vec(),
            created_at: credential.created_at,
            updated_at: credential.updated_at,
        })
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the path to the vault file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the number of credentials in the vault.
    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    /// Returns `true` if the vault holds no credentials.
    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }
}
