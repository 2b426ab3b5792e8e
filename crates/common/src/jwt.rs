//! Trust-domain scoped token signing and verification.
//!
//! A [`TrustDomain`] pairs an HMAC secret with one configured algorithm.
//! Two domains exist in this system (the identity provider's and the local
//! service's) and are never interchangeable: a token signed in one domain
//! always fails signature verification in the other.
//!
//! # Security
//!
//! - Tokens are size-checked BEFORE parsing (denial-of-service prevention)
//! - Only HMAC algorithms (HS256/HS384/HS512) are accepted
//! - Error values carry a bounded failure category, never the secret or the
//!   raw token

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Maximum allowed token size in bytes (8KB).
///
/// Tokens larger than this are rejected before any base64 decoding or
/// signature verification happens.
pub const MAX_TOKEN_SIZE_BYTES: usize = 8192;

/// Clock leeway applied when validating `exp`, in seconds.
///
/// Zero: a token is rejected at exactly `exp`. The local service issues
/// 60-second sessions whose cookie `Max-Age` equals the token TTL; any
/// leeway here would extend the artifact's real lifetime past what the
/// cookie advertises.
pub const EXPIRY_LEEWAY_SECONDS: u64 = 0;

/// Bounded verification failure categories.
///
/// The Display strings are safe to surface to clients ("expired",
/// "bad signature", ...); they never include the secret or token material.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JwtError {
    /// Token exceeds [`MAX_TOKEN_SIZE_BYTES`].
    #[error("token too large")]
    TokenTooLarge,

    /// Token `exp` is in the past.
    #[error("expired")]
    Expired,

    /// Signature did not verify against this trust domain's secret.
    #[error("bad signature")]
    BadSignature,

    /// Token structure, header algorithm, or claims could not be decoded.
    #[error("malformed")]
    Malformed,

    /// Signing failed (never carries key material).
    #[error("signing failed")]
    Signing,
}

/// An independently keyed signing and verification scope.
///
/// Cheap to clone; holds the secret behind [`SecretString`] so it is redacted
/// in Debug output and zeroized on drop.
#[derive(Clone)]
pub struct TrustDomain {
    secret: SecretString,
    algorithm: Algorithm,
}

impl TrustDomain {
    /// Create a trust domain from its secret and configured algorithm.
    ///
    /// Callers are expected to have validated that `algorithm` is an HMAC
    /// family member (the config loaders enforce this).
    #[must_use]
    pub fn new(secret: SecretString, algorithm: Algorithm) -> Self {
        Self { secret, algorithm }
    }

    /// The algorithm this domain signs and verifies with.
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Sign `claims` into a compact token string.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::Signing`] if encoding fails; the error never
    /// carries key material.
    pub fn sign<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let key = EncodingKey::from_secret(self.secret.expose_secret().as_bytes());
        encode(&Header::new(self.algorithm), claims, &key).map_err(|e| {
            tracing::debug!(target: "common.jwt", error = %e, "token signing failed");
            JwtError::Signing
        })
    }

    /// Verify a token's signature and expiry, decoding its claims.
    ///
    /// # Errors
    ///
    /// - [`JwtError::TokenTooLarge`] if the token exceeds the size limit
    /// - [`JwtError::Expired`] if `exp` is in the past
    /// - [`JwtError::BadSignature`] if the signature does not match this
    ///   domain's secret
    /// - [`JwtError::Malformed`] for any other structural failure, including
    ///   a header algorithm that differs from this domain's
    pub fn verify<T: DeserializeOwned>(&self, token: &str) -> Result<T, JwtError> {
        if token.len() > MAX_TOKEN_SIZE_BYTES {
            tracing::debug!(
                target: "common.jwt",
                token_size = token.len(),
                max_size = MAX_TOKEN_SIZE_BYTES,
                "token rejected: size exceeds maximum allowed"
            );
            return Err(JwtError::TokenTooLarge);
        }

        let key = DecodingKey::from_secret(self.secret.expose_secret().as_bytes());
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = EXPIRY_LEEWAY_SECONDS;

        decode::<T>(token, &key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                let mapped = match e.kind() {
                    ErrorKind::ExpiredSignature => JwtError::Expired,
                    ErrorKind::InvalidSignature => JwtError::BadSignature,
                    _ => JwtError::Malformed,
                };
                tracing::debug!(target: "common.jwt", category = %mapped, "token verification failed");
                mapped
            })
    }
}
