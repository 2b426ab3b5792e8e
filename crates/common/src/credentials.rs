//! Credential lookup capability.
//!
//! Issuers authenticate principals through the [`CredentialStore`] trait
//! rather than a global table, so services can inject test doubles and the
//! two trust domains can run disjoint stores.
//!
//! # Security
//!
//! Authentication failure is a single generic [`CredentialError::InvalidCredentials`]
//! regardless of whether the username was unknown or the password wrong,
//! preventing user enumeration. Unknown usernames still run a bcrypt
//! verification against a dummy hash so lookup timing does not reveal user
//! existence.

use std::collections::HashMap;
use thiserror::Error;

/// Dummy bcrypt hash verified when the username is unknown, keeping the
/// failure path's timing close to the real verification path.
const DUMMY_BCRYPT_HASH: &str = "$2b$12$LQv3c1yqBWVHxkd0LHAkCOYz6TtxMQJqhN8/LewY5GyYqExt7YD3a";

/// Errors from credential verification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    /// Generic authentication failure; intentionally does not hint at which
    /// check failed.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Password hashing failed while registering a user.
    #[error("Credential store error")]
    Hashing,
}

/// Injected capability that authenticates a principal and returns its role.
pub trait CredentialStore: Send + Sync {
    /// Verify `username`/`password` and return the principal's role.
    ///
    /// # Errors
    ///
    /// Returns the generic [`CredentialError::InvalidCredentials`] on any
    /// mismatch or unknown username.
    fn authenticate(&self, username: &str, password: &str) -> Result<String, CredentialError>;
}

struct UserRecord {
    password_hash: String,
    role: String,
}

/// In-memory credential store with bcrypt-hashed passwords.
///
/// Backs the demo deployments; production systems would implement
/// [`CredentialStore`] against a real directory.
pub struct MemoryCredentialStore {
    users: HashMap<String, UserRecord>,
    cost: u32,
}

impl MemoryCredentialStore {
    /// Create an empty store hashing at the default bcrypt cost.
    #[must_use]
    pub fn new() -> Self {
        Self::with_cost(bcrypt::DEFAULT_COST)
    }

    /// Create an empty store hashing at a custom bcrypt cost.
    ///
    /// Tests use a low cost to keep hashing fast; deployments keep the
    /// default.
    #[must_use]
    pub fn with_cost(cost: u32) -> Self {
        Self {
            users: HashMap::new(),
            cost,
        }
    }

    /// Register a user, hashing the password at the store's cost.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Hashing`] if bcrypt fails.
    pub fn insert_user(
        &mut self,
        username: &str,
        password: &str,
        role: &str,
    ) -> Result<(), CredentialError> {
        let password_hash = bcrypt::hash(password, self.cost).map_err(|e| {
            tracing::debug!(target: "common.credentials", error = %e, "password hashing failed");
            CredentialError::Hashing
        })?;

        self.users.insert(
            username.to_string(),
            UserRecord {
                password_hash,
                role: role.to_string(),
            },
        );
        Ok(())
    }
}

impl Default for MemoryCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn authenticate(&self, username: &str, password: &str) -> Result<String, CredentialError> {
        let record = self.users.get(username);

        // Always run bcrypt, against a dummy hash when the user is unknown.
        let hash_to_verify = record.map_or(DUMMY_BCRYPT_HASH, |r| r.password_hash.as_str());
        let is_valid = bcrypt::verify(password, hash_to_verify).unwrap_or(false);

        match record {
            Some(r) if is_valid => Ok(r.role.clone()),
            _ => Err(CredentialError::InvalidCredentials),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const TEST_COST: u32 = 4;

    fn store_with_analyst() -> MemoryCredentialStore {
        let mut store = MemoryCredentialStore::with_cost(TEST_COST);
        store.insert_user("analyst", "analyst-pw", "analyst").unwrap();
        store
    }

    #[test]
    fn test_valid_credentials_return_role() {
        let store = store_with_analyst();
        assert_eq!(store.authenticate("analyst", "analyst-pw").unwrap(), "analyst");
    }

    #[test]
    fn test_wrong_password_is_generic_failure() {
        let store = store_with_analyst();
        assert_eq!(
            store.authenticate("analyst", "wrong").unwrap_err(),
            CredentialError::InvalidCredentials
        );
    }

    #[test]
    fn test_unknown_user_is_same_generic_failure() {
        let store = store_with_analyst();

        // Unknown username and wrong password are indistinguishable.
        assert_eq!(
            store.authenticate("nobody", "whatever").unwrap_err(),
            store.authenticate("analyst", "wrong").unwrap_err()
        );
    }

    #[test]
    fn test_empty_store_rejects_everything() {
        let store = MemoryCredentialStore::with_cost(TEST_COST);
        assert!(store.authenticate("", "").is_err());
        assert!(store.authenticate("admin", "admin").is_err());
    }

    #[test]
    fn test_reinserting_user_replaces_password() {
        let mut store = store_with_analyst();
        store.insert_user("analyst", "rotated-pw", "analyst").unwrap();

        assert!(store.authenticate("analyst", "analyst-pw").is_err());
        assert_eq!(store.authenticate("analyst", "rotated-pw").unwrap(), "analyst");
    }
}
