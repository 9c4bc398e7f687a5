//! Key expansion helpers using HKDF-SHA256.
//!
//! From the Argon2id root key we derive:
//! - A **verifier key**, stored in the vault file to check unlock attempts.
//! - A **session key**, used to encrypt every credential in the vault.
//!
//! The two keys come from different HKDF `info` strings, so the verifier
//! on disk reveals nothing about the key that protects the entries.

use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::{Zeroize, Zeroizing};

use crate::errors::{PassVaultError, Result};

/// Length of derived keys (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// Derive the verifier key that is persisted as part of the master verifier.
pub fn derive_verifier_key(root_key: &[u8]) -> Result<Zeroizing<[u8; KEY_LEN]>> {
    hkdf_derive(root_key, b"passvault-master-verifier").map(Zeroizing::new)
}

/// Derive the session key that encrypts credential secrets.
pub fn derive_session_key(root_key: &[u8]) -> Result<SessionKey> {
    let mut bytes = hkdf_derive(root_key, b"passvault-session-key")?;
    let key = SessionKey::new(bytes);
    bytes.zeroize();
    Ok(key)
}

/// Internal helper: run HKDF-SHA256 expand with the given `info`.
///
/// No salt is used: the root key already has full entropy (it came from
/// Argon2id).
fn hkdf_derive(ikm: &[u8], info: &[u8]) -> Result<[u8; KEY_LEN]> {
    let hk = Hkdf::<Sha256>::new(None, ikm);

    let mut okm = [0u8; KEY_LEN];
    hk.expand(info, &mut okm)
        .map_err(|e| PassVaultError::KeyDerivationFailed(format!("HKDF expand failed: {e}")))?;

    Ok(okm)
}

/// The key for one unlocked session.  Its memory is zeroed on drop, which
/// ends the session.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct SessionKey {
    bytes: [u8; KEY_LEN],
}

impl SessionKey {
    /// Create a new `SessionKey` from raw bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Access the raw key bytes for the cipher.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl std::fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionKey(<redacted>)")
    }
}
