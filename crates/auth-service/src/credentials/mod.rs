//! Credential store boundary.
//!
//! The authentication core only needs a username lookup returning a password
//! hash plus an active flag; the rest of the gym CRM (trainee/trainer CRUD,
//! persistence) lives behind this trait. Usernames are unique across both
//! roles by construction, so a single lookup resolves either kind of account.

use crate::crypto;
use crate::errors::AuthError;
use dashmap::DashMap;
use serde::Deserialize;
use std::path::Path;

/// Account role. The gym CRM stores trainees and trainers in separate
/// tables; for authentication they are one namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Trainee,
    Trainer,
}

/// Stored credential record: identity, bcrypt hash, active flag.
#[derive(Debug, Clone)]
pub struct Credential {
    pub username: String,
    pub password_hash: String,
    pub is_active: bool,
    pub role: Role,
}

/// Lookup capability consumed by the authentication orchestrator.
///
/// Absence is a valid state, not an error; the orchestrator branches on the
/// `Option` instead of intercepting exceptions.
pub trait CredentialStore: Send + Sync {
    fn find_by_username(&self, username: &str) -> Option<Credential>;
}

/// In-memory credential store keyed by username.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    users: DashMap<String, Credential>,
}

/// Seed file entry: plaintext password, hashed at load time.
#[derive(Debug, Deserialize)]
struct SeedUser {
    username: String,
    password: String,
    role: Role,
    #[serde(default = "default_active")]
    active: bool,
}

fn default_active() -> bool {
    true
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a credential with an already-computed hash.
    pub fn insert(&self, credential: Credential) {
        self.users.insert(credential.username.clone(), credential);
    }

    /// Hash a plaintext password and insert the resulting credential.
    pub fn insert_user(
        &self,
        username: &str,
        password: &str,
        role: Role,
        is_active: bool,
        bcrypt_cost: u32,
    ) -> Result<(), AuthError> {
        let password_hash = crypto::hash_password(password, bcrypt_cost)?;
        self.insert(Credential {
            username: username.to_string(),
            password_hash,
            is_active,
            role,
        });
        Ok(())
    }

    /// Load credentials from a JSON seed file:
    /// `[{"username": ..., "password": ..., "role": "trainee", "active": true}, ...]`.
    ///
    /// Plaintext seed passwords are hashed here, once, at startup.
    pub fn from_seed_file(path: &Path, bcrypt_cost: u32) -> Result<Self, AuthError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "Failed to read users file");
            AuthError::Internal
        })?;

        let seed: Vec<SeedUser> = serde_json::from_str(&raw).map_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "Failed to parse users file");
            AuthError::Internal
        })?;

        let store = Self::new();
        for user in &seed {
            store.insert_user(&user.username, &user.password, user.role, user.active, bcrypt_cost)?;
        }

        tracing::info!(count = seed.len(), "Seeded credential store");
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn find_by_username(&self, username: &str) -> Option<Credential> {
        self.users.get(username).map(|entry| entry.value().clone())
    }
}
