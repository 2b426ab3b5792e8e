//! Local service configuration, loaded once at startup.
//!
//! Deliberately disjoint from the identity provider's configuration: a
//! separate secret, algorithm and TTL, so the two trust domains share code
//! shape but never keys.

use jsonwebtoken::Algorithm;
use secrecy::SecretString;
use std::collections::HashMap;
use std::env;
use thiserror::Error;

/// Minimum accepted HMAC secret length in bytes.
const MIN_SECRET_BYTES: usize = 32;

/// Default session lifetime in seconds.
const DEFAULT_SESSION_TTL_SECONDS: i64 = 60;

/// Default session cookie name.
const DEFAULT_COOKIE_NAME: &str = "local_session";

#[derive(Clone)]
pub struct LocalConfig {
    pub bind_address: String,
    /// HMAC secret for the local trust domain. Must never equal the
    /// identity provider's secret.
    pub jwt_secret: SecretString,
    /// Signing algorithm; restricted to the HMAC family.
    pub jwt_algorithm: Algorithm,
    /// Session token lifetime in seconds; also the cookie Max-Age.
    pub session_ttl_seconds: i64,
    /// Name of the session cookie.
    pub cookie_name: String,
    /// Whether the cookie carries the Secure flag. Must be true whenever the
    /// transport is encrypted.
    pub cookie_secure: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Weak signing secret: expected at least {MIN_SECRET_BYTES} bytes, got {0}")]
    WeakSecret(usize),

    #[error("Unsupported signing algorithm: {0} (expected HS256, HS384 or HS512)")]
    UnsupportedAlgorithm(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}

fn parse_hmac_algorithm(name: &str) -> Result<Algorithm, ConfigError> {
    match name {
        "HS256" => Ok(Algorithm::HS256),
        "HS384" => Ok(Algorithm::HS384),
        "HS512" => Ok(Algorithm::HS512),
        other => Err(ConfigError::UnsupportedAlgorithm(other.to_string())),
    }
}

impl LocalConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing)
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let bind_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| "0.0.0.0:8003".to_string());

        let secret = vars
            .get("LOCAL_JWT_SECRET")
            .ok_or_else(|| ConfigError::MissingEnvVar("LOCAL_JWT_SECRET".to_string()))?;

        if secret.len() < MIN_SECRET_BYTES {
            return Err(ConfigError::WeakSecret(secret.len()));
        }

        let jwt_algorithm =
            parse_hmac_algorithm(vars.get("LOCAL_JWT_ALG").map_or("HS256", String::as_str))?;

        let session_ttl_seconds = match vars.get("LOCAL_TOKEN_TTL_SECONDS") {
            Some(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or_else(|| ConfigError::InvalidValue {
                    name: "LOCAL_TOKEN_TTL_SECONDS".to_string(),
                    value: raw.clone(),
                })?,
            None => DEFAULT_SESSION_TTL_SECONDS,
        };

        let cookie_name = vars
            .get("LOCAL_COOKIE_NAME")
            .cloned()
            .unwrap_or_else(|| DEFAULT_COOKIE_NAME.to_string());

        let cookie_secure = vars
            .get("LOCAL_COOKIE_SECURE")
            .map_or(false, |v| v.eq_ignore_ascii_case("true"));

        Ok(LocalConfig {
            bind_address,
            jwt_secret: SecretString::from(secret.clone()),
            jwt_algorithm,
            session_ttl_seconds,
            cookie_name,
            cookie_secure,
        })
    }
}
