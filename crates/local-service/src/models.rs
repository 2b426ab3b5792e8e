//! Request and response models for the local service.

use common::secret::SecretString;
use serde::{Deserialize, Serialize};

/// Local login request body.
#[derive(Debug, Deserialize)]
pub struct LocalLoginRequest {
    pub username: String,
    pub password: SecretString,
}

/// Successful login response; the session token itself travels in the
/// Set-Cookie header, not the body.
#[derive(Debug, Serialize)]
pub struct LocalLoginResponse {
    pub status: &'static str,
    pub message: &'static str,
    /// Session lifetime in seconds, equal to the cookie Max-Age.
    pub expires_in: i64,
}

/// Response for session-protected resources.
#[derive(Debug, Serialize)]
pub struct LocalResourceResponse {
    pub status: &'static str,
    pub subject: String,
    pub role: String,
    pub detail: &'static str,
}
