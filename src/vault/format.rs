//! On-disk vault file format.
//!
//! A vault file is a single UTF-8 JSON document:
//!
//! ```text
//! {
//!   "masterVerifier": "<hex-salt>:<hex-verifier>",
//!   "entries": [
//!     { "id", "service", "username", "ciphertext", "iv", "authTag",
//!       "createdAt", "updatedAt"? }
//!   ]
//! }
//! ```
//!
//! Binary fields (`ciphertext`, `iv`, `authTag`) are lowercase hex.
//! Timestamps are RFC 3339.  The whole file is rewritten on every change.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::crypto::MasterVerifier;
use crate::errors::{PassVaultError, Result};

/// Everything stored in a vault file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultFile {
    /// Salt and verifier key used to check the master password.
    pub master_verifier: MasterVerifier,

    /// One sealed record per credential, in insertion order.
    pub entries: Vec<EncryptedEntry>,
}

/// A single credential as persisted: metadata in the clear, secret sealed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptedEntry {
    pub id: String,
    pub service: String,
    pub username: String,

    #[serde(serialize_with = "hex_encode", deserialize_with = "hex_decode")]
    pub ciphertext: Vec<u8>,

    #[serde(serialize_with = "hex_encode", deserialize_with = "hex_decode")]
    pub iv: Vec<u8>,

    #[serde(serialize_with = "hex_encode", deserialize_with = "hex_decode")]
    pub auth_tag: Vec<u8>,

    pub created_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Write a vault file to disk **atomically**.
///
/// 1. Serialize the vault to pretty JSON.
/// 2. Write to a temp file in the same directory.
/// 3. Rename temp file over the target path.
///
/// The rename ensures readers never see a half-written file.
pub fn write_vault(path: &Path, vault: &VaultFile) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(vault)
        .map_err(|e| PassVaultError::SerializationError(format!("vault: {e}")))?;

    // The temp file is in the same directory so rename stays on one
    // filesystem.
    let parent = path.parent().unwrap_or(Path::new("."));
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    fs::write(&tmp_path, &bytes)?;
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    Ok(())
}

/// Read and parse a vault file.
///
/// Only the structure is checked here; the master verifier and the entry
/// tags are checked by the store when it unlocks.
pub fn read_vault(path: &Path) -> Result<VaultFile> {
    let data = fs::read(path)?;

    serde_json::from_slice(&data)
        .map_err(|e| PassVaultError::InvalidVaultFormat(format!("vault JSON: {e}")))
}

// ---------------------------------------------------------------------------
// Serde helpers for hex-encoded Vec<u8> fields
// ---------------------------------------------------------------------------

fn hex_encode<S>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&hex::encode(data))
}

fn hex_decode<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    hex::decode(&s).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_verifier() -> MasterVerifier {
        format!("{}:{}", "11".repeat(32), "22".repeat(32))
            .parse()
            .unwrap()
    }

    fn sample_entry() -> EncryptedEntry {
        EncryptedEntry {
            id: "abc".into(),
            service: "github.com".into(),
            username: "alice".into(),
            ciphertext: vec![0xde, 0xad],
            iv: vec![0x01; 16],
            auth_tag: vec![0x02; 16],
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn entry_uses_camel_case_hex_fields() {
        let json = serde_json::to_value(sample_entry()).unwrap();

        assert_eq!(json["ciphertext"], "dead");
        assert_eq!(json["authTag"], "02".repeat(16));
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_none(), "unset updatedAt is omitted");
    }

    #[test]
    fn write_then_read_preserves_contents() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("vault.dat");
        let vault = VaultFile {
            master_verifier: sample_verifier(),
            entries: vec![sample_entry()],
        };

        write_vault(&path, &vault).unwrap();
        let loaded = read_vault(&path).unwrap();

        assert_eq!(loaded.master_verifier, vault.master_verifier);
        assert_eq!(loaded.entries, vault.entries);
        assert!(!tmp.path().join(".vault.dat.tmp").exists());
    }

    #[test]
    fn read_rejects_malformed_json() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("vault.dat");
        fs::write(&path, "{ not json").unwrap();

        let err = read_vault(&path).unwrap_err();
        assert!(matches!(err, PassVaultError::InvalidVaultFormat(_)));
        assert!(err.is_storage_failure());
    }

    #[test]
    fn read_missing_file_is_storage_failure() {
        let tmp = TempDir::new().unwrap();
        let err = read_vault(&tmp.path().join("absent.dat")).unwrap_err();
        assert!(err.is_storage_failure());
    }

    #[test]
    fn read_rejects_bad_hex() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("vault.dat");
        let text = format!(
            r#"{{"masterVerifier":"{}","entries":[{{"id":"x","service":"s","username":"u",
            "ciphertext":"zz","iv":"00","authTag":"00","createdAt":"2024-01-01T00:00:00Z"}}]}}"#,
            sample_verifier()
        );
        fs::write(&path, text).unwrap();

        assert!(read_vault(&path).is_err());
    }
}
