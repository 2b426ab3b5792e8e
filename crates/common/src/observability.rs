//! Privacy-safe logging helpers shared by the services.
//!
//! Log fields are categorized as:
//! - **SAFE**: can be logged in plaintext (decisions, roles, status labels)
//! - **HASHED**: must be hashed for correlation (usernames)
//! - **NEVER**: must never appear in logs (passwords, secrets, tokens,
//!   full claim contents)

use sha2::{Digest, Sha256};

/// Hash a field value for correlation in logs (SHA-256, first 8 hex chars).
///
/// Used for usernames, which need correlation across log entries but should
/// not be stored in plaintext. The truncation to 8 chars provides enough
/// uniqueness for debugging while limiting reversibility. This is not a
/// substitute for keeping secrets out of logs entirely.
#[must_use]
pub fn hash_for_correlation(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let result = hasher.finalize();
    hex::encode(result.iter().take(4).copied().collect::<Vec<u8>>())
}
