//! Cryptographic primitives for PassVault.
//!
//! This module provides:
//! - Argon2id master-secret derivation and verification (`kdf`)
//! - HKDF expansion into verifier and session keys (`keys`)
//! - AES-256-GCM sealing of individual secrets (`encryption`)

pub mod encryption;
pub mod kdf;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{seal, open, create_verifier, ...};
pub use encryption::{open, seal, SealedSecret};
pub use kdf::{create_verifier, derive_root_key, generate_salt, verify, MasterVerifier};
pub use keys::SessionKey;
