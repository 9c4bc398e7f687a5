//! Vault module — encrypted credential storage.
//!
//! This module provides:
//! - `Credential` and `CredentialUpdate` types (`credential`)
//! - The in-memory `CredentialIndex` (`index`)
//! - JSON vault file format with atomic writes (`format`)
//! - `VaultStore`, the unlocked session over one vault file (`store`)
//! - The `CredentialService` contract for front ends (`service`)

pub mod credential;
pub mod format;
pub mod index;
pub mod service;
pub mod store;

// Re-export the most commonly used items.
pub use credential::{Credential, CredentialUpdate};
pub use format::{EncryptedEntry, VaultFile};
pub use service::CredentialService;
pub use store::{VaultStatus, VaultStore};
