//! Credential and CredentialUpdate types.
//!
//! A `Credential` is the decrypted, in-memory form of a vault entry.  It
//! only ever lives inside an unlocked `VaultStore`; the plaintext secret
//! sits in a `Zeroizing` buffer and never shows up in `Debug` output.

use std::fmt;

use chrono::{DateTime, Utc};
use zeroize::Zeroizing;

/// A single decrypted credential.
#[derive(Clone)]
pub struct Credential {
    /// Opaque unique identifier (UUID v4).
    pub id: String,

    /// The service this credential belongs to (e.g. "github.com").
    pub service: String,

    /// Login name or email.
    pub username: String,

    /// The plaintext password, wiped from memory on drop.
    pub secret: Zeroizing<String>,

    /// When this credential was first added.
    pub created_at: DateTime<Utc>,

    /// When this credential was last updated, if ever.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Credential {
    /// The plaintext secret.
    pub fn secret(&self) -> &str {
        self.secret.as_str()
    }

    /// Merge the supplied fields and stamp `updated_at`.
    ///
    /// `id` and `created_at` are never touched.
    pub(crate) fn apply(&mut self, update: CredentialUpdate, now: DateTime<Utc>) {
        if let Some(service) = update.service {
            self.service = service;
        }
        if let Some(username) = update.username {
            self.username = username;
        }
        if let Some(secret) = update.secret {
            self.secret = secret;
        }
        self.updated_at = Some(now);
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("id", &self.id)
            .field("service", &self.service)
            .field("username", &self.username)
            .field("secret", &"<redacted>")
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// Partial fields for `VaultStore::update`.  `None` leaves a field as is.
#[derive(Clone, Default)]
pub struct CredentialUpdate {
    pub service: Option<String>,
    pub username: Option<String>,
    pub secret: Option<Zeroizing<String>>,
}

impl CredentialUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(Zeroizing::new(secret.into()));
        self
    }

    /// Returns `true` if no field would change.
    pub fn is_empty(&self) -> bool {
        self.service.is_none() && self.username.is_none() && self.secret.is_none()
    }
}

impl fmt::Debug for CredentialUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialUpdate")
            .field("service", &self.service)
            .field("username", &self.username)
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
