//! Password-based key derivation using Argon2id.
//!
//! Argon2id is a memory-hard KDF that protects against brute-force and
//! GPU-based attacks.  The cost parameters are fixed constants: a vault
//! created with one set of parameters can only be opened with the same
//! set, so changing them invalidates every existing vault.
//!
//! The Argon2id output is a *root key* that never leaves memory.  It is
//! expanded (see `keys`) into a verifier key, which is stored in the vault
//! file as the `MasterVerifier`, and a session key, which encrypts entries.

use std::fmt;
use std::str::FromStr;

use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use super::keys::{derive_session_key, derive_verifier_key, SessionKey, KEY_LEN};
use crate::errors::{PassVaultError, Result};

/// Length of the salt in bytes (256 bits).
pub const SALT_LEN: usize = 32;

/// Argon2id memory cost in KiB (64 MB).
pub const MEMORY_KIB: u32 = 65_536;

/// Argon2id iteration count.
pub const ITERATIONS: u32 = 3;

/// Argon2id parallelism lanes.
pub const PARALLELISM: u32 = 4;

/// Separator between the hex salt and the hex verifier key on disk.
const VERIFIER_SEPARATOR: char = ':';

/// Derive the 32-byte root key from a master secret and salt.
///
/// The same secret + salt will always produce the same key.
pub fn derive_root_key(secret: &[u8], salt: &[u8]) -> Result<Zeroizing<[u8; KEY_LEN]>> {
    let params = Params::new(MEMORY_KIB, ITERATIONS, PARALLELISM, Some(KEY_LEN))
        .map_err(|e| PassVaultError::KeyDerivationFailed(format!("invalid Argon2 params: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    argon2
        .hash_password_into(secret, salt, key.as_mut_slice())
        .map_err(|e| PassVaultError::KeyDerivationFailed(format!("Argon2id hashing failed: {e}")))?;

    Ok(key)
}

/// Generate a cryptographically random 32-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    salt
}

/// The salt and verifier key persisted in the vault file.
///
/// Serialized as `"<hex-salt>:<hex-verifier>"`.  Immutable once the vault
/// has been created.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MasterVerifier {
    salt: [u8; SALT_LEN],
    check: [u8; KEY_LEN],
}

impl MasterVerifier {
    /// The salt the root key was derived with.
    pub fn salt(&self) -> &[u8; SALT_LEN] {
        &self.salt
    }

    /// Check a candidate verifier key in constant time.
    fn matches(&self, candidate: &[u8; KEY_LEN]) -> bool {
        self.check.as_slice().ct_eq(candidate.as_slice()).into()
    }
}

impl fmt::Debug for MasterVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MasterVerifier")
            .field("salt", &hex::encode(self.salt))
            .finish_non_exhaustive()
    }
}

impl fmt::Display for MasterVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{VERIFIER_SEPARATOR}{}",
            hex::encode(self.salt),
            hex::encode(self.check)
        )
    }
}

impl FromStr for MasterVerifier {
    type Err = PassVaultError;

    fn from_str(s: &str) -> Result<Self> {
        let (salt_hex, check_hex) = s.split_once(VERIFIER_SEPARATOR).ok_or_else(|| {
            PassVaultError::InvalidVaultFormat("master verifier is missing its separator".into())
        })?;

        let mut salt = [0u8; SALT_LEN];
        hex::decode_to_slice(salt_hex, &mut salt).map_err(|e| {
            PassVaultError::InvalidVaultFormat(format!("master verifier salt: {e}"))
        })?;

        let mut check = [0u8; KEY_LEN];
        hex::decode_to_slice(check_hex, &mut check).map_err(|e| {
            PassVaultError::InvalidVaultFormat(format!("master verifier key: {e}"))
        })?;

        Ok(Self { salt, check })
    }
}

impl TryFrom<String> for MasterVerifier {
    type Error = PassVaultError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<MasterVerifier> for String {
    fn from(value: MasterVerifier) -> Self {
        value.to_string()
    }
}

/// Create the verifier for a brand-new vault.
///
/// Generates a fresh salt, runs Argon2id once, and returns the verifier to
/// store alongside the session key for the new vault.
pub fn create_verifier(secret: &[u8]) -> Result<(MasterVerifier, SessionKey)> {
    let salt = generate_salt();
    let root = derive_root_key(secret, &salt)?;

    let verifier = MasterVerifier {
        salt,
        check: *derive_verifier_key(root.as_slice())?,
    };
    let session_key = derive_session_key(root.as_slice())?;

    Ok((verifier, session_key))
}

/// Check a master secret against a stored verifier.
///
/// Re-derives the root key with the stored salt and compares verifier keys
/// in constant time.  Returns the session key on success and
/// `AuthenticationFailed` otherwise, without saying how the keys differ.
pub fn verify(secret: &[u8], stored: &MasterVerifier) -> Result<SessionKey> {
    let root = derive_root_key(secret, &stored.salt)?;
    let candidate = derive_verifier_key(root.as_slice())?;

    if !stored.matches(&candidate) {
        return Err(PassVaultError::AuthenticationFailed);
    }

    derive_session_key(root.as_slice())
}
