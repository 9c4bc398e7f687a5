//! AES-256-GCM authenticated encryption of individual credential secrets.
//!
//! Each call to `seal` generates a fresh random 16-byte nonce and keeps
//! the nonce and the 16-byte auth tag *detached* from the ciphertext, so
//! the three parts can be stored as separate fields of a vault entry.
//! `open` verifies the tag before any plaintext is released.
//!
//! GCM accepts nonces other than 12 bytes by hashing them through GHASH;
//! the 16-byte form keeps random-nonce collisions negligible for any
//! realistic number of entries under one key.

use aes_gcm::aead::consts::U16;
use aes_gcm::aead::{AeadCore, AeadInPlace, KeyInit, OsRng};
use aes_gcm::aes::Aes256;
use aes_gcm::{AesGcm, Nonce, Tag};
use zeroize::{Zeroize, Zeroizing};

use super::keys::SessionKey;
use crate::errors::{PassVaultError, Result};

/// Size of the nonce (IV) in bytes.
pub const NONCE_LEN: usize = 16;

/// Size of the GCM authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// AES-256-GCM with a 16-byte nonce.
type Aes256Gcm16 = AesGcm<Aes256, U16>;

/// The three stored parts of one encrypted secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedSecret {
    pub ciphertext: Vec<u8>,
    pub iv: [u8; NONCE_LEN],
    pub auth_tag: [u8; TAG_LEN],
}

/// Encrypt `plaintext` under the session key with a fresh random nonce.
pub fn seal(key: &SessionKey, plaintext: &str) -> Result<SealedSecret> {
    let cipher = Aes256Gcm16::new_from_slice(key.as_bytes())
        .map_err(|e| PassVaultError::EncryptionFailed(format!("invalid key length: {e}")))?;

    let nonce = Aes256Gcm16::generate_nonce(&mut OsRng);

    // The buffer is encrypted in place and becomes the ciphertext.
    let mut buffer = plaintext.as_bytes().to_vec();
    let tag = cipher
        .encrypt_in_place_detached(&nonce, b"", &mut buffer)
        .map_err(|e| {
            buffer.zeroize();
            PassVaultError::EncryptionFailed(format!("encryption error: {e}"))
        })?;

    let mut iv = [0u8; NONCE_LEN];
    iv.copy_from_slice(&nonce);
    let mut auth_tag = [0u8; TAG_LEN];
    auth_tag.copy_from_slice(&tag);

    Ok(SealedSecret {
        ciphertext: buffer,
        iv,
        auth_tag,
    })
}

/// Verify and decrypt a secret produced by `seal`.
///
/// Any change to the ciphertext, iv, or tag (including a wrong length)
/// yields `IntegrityFailed`; no partial plaintext is ever returned.
pub fn open(
    key: &SessionKey,
    ciphertext: &[u8],
    iv: &[u8],
    auth_tag: &[u8],
) -> Result<Zeroizing<String>> {
    if iv.len() != NONCE_LEN || auth_tag.len() != TAG_LEN {
        return Err(PassVaultError::IntegrityFailed);
    }

    let cipher =
        Aes256Gcm16::new_from_slice(key.as_bytes()).map_err(|_| PassVaultError::IntegrityFailed)?;
    let nonce = Nonce::<U16>::from_slice(iv);
    let tag = Tag::<U16>::from_slice(auth_tag);

    let mut buffer = Zeroizing::new(ciphertext.to_vec());
    cipher
        .decrypt_in_place_detached(nonce, b"", buffer.as_mut_slice(), tag)
        .map_err(|_| PassVaultError::IntegrityFailed)?;

    let bytes = std::mem::take(&mut *buffer);
    String::from_utf8(bytes).map(Zeroizing::new).map_err(|e| {
        let mut bad_bytes = e.into_bytes();
        bad_bytes.zeroize();
        PassVaultError::IntegrityFailed
    })
}
