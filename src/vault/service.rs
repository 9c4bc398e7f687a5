//! The contract a presentation layer uses to talk to an unlocked vault.
//!
//! Front ends are handed something implementing `CredentialService`
//! instead of reaching into `VaultStore` directly, so they can be driven
//! by any backing store (including an in-memory fake in tests).

use crate::errors::Result;

use super::credential::{Credential, CredentialUpdate};
use super::store::VaultStore;

pub trait CredentialService {
    /// All credentials, newest first.
    fn list_all(&self) -> Vec<&Credential>;

    /// A single credential by id.
    fn get(&self, id: &str) -> Option<&Credential>;

    /// Store a new credential and return it.
    fn add(&mut self, service: &str, username: &str, secret: &str) -> Result<Credential>;

    /// Merge the supplied fields; `None` if `id` is unknown.
    fn update(&mut self, id: &str, update: CredentialUpdate) -> Result<Option<Credential>>;

    /// Remove a credential; `false` if `id` is unknown.
    fn delete(&mut self, id: &str) -> Result<bool>;
}

impl CredentialService for VaultStore {
    fn list_all(&self) -> Vec<&Credential> {
        VaultStore::list_all(self)
    }

    fn get(&self, id: &str) -> Option<&Credential> {
        VaultStore::get(self, id)
    }

    fn add(&mut self, service: &str, username: &str, secret: &str) -> Result<Credential> {
        VaultStore::add(self, service, username, secret)
    }

    fn update(&mut self, id: &str, update: CredentialUpdate) -> Result<Option<Credential>> {
        VaultStore::update(self, id, update)
    }

    fn delete(&mut self, id: &str) -> Result<bool> {
        VaultStore::delete(self, id)
    }
}
