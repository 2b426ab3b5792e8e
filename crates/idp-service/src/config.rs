//! Identity provider configuration, loaded once at startup.

use jsonwebtoken::Algorithm;
use secrecy::SecretString;
use std::collections::HashMap;
use std::env;
use thiserror::Error;

/// Minimum accepted HMAC secret length in bytes.
const MIN_SECRET_BYTES: usize = 32;

/// Default access token lifetime in minutes.
const DEFAULT_TOKEN_EXP_MINUTES: i64 = 30;

#[derive(Clone)]
pub struct IdpConfig {
    pub bind_address: String,
    /// HMAC secret for the identity trust domain.
    pub jwt_secret: SecretString,
    /// Signing algorithm; restricted to the HMAC family.
    pub jwt_algorithm: Algorithm,
    /// Access token lifetime in minutes.
    pub token_exp_minutes: i64,
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

/// Parse an HMAC algorithm name, rejecting asymmetric families.
///
/// Both trust domains in this system are symmetric; accepting an asymmetric
/// algorithm here would only mask a misconfiguration.
pub(crate) fn parse_hmac_algorithm(name: &str) -> Result<Algorithm, ConfigError> {
    match name {
        "HS256" => Ok(Algorithm::HS256),
        "HS384" => Ok(Algorithm::HS384),
        "HS512" => Ok(Algorithm::HS512),
        other => Err(ConfigError::UnsupportedAlgorithm(other.to_string())),
    }
}

impl IdpConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing)
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let bind_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| "0.0.0.0:8001".to_string());

        let secret = vars
            .get("JWT_SECRET")
            .ok_or_else(|| ConfigError::MissingEnvVar("JWT_SECRET".to_string()))?;

        if secret.len() < MIN_SECRET_BYTES {
            return Err(ConfigError::WeakSecret(secret.len()));
        }

        let jwt_algorithm = parse_hmac_algorithm(vars.get("JWT_ALG").map_or("HS256", String::as_str))?;

        let token_exp_minutes = match vars.get("TOKEN_EXP_MINUTES") {
            Some(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|m| *m > 0)
                .ok_or_else(|| ConfigError::InvalidValue {
                    name: "TOKEN_EXP_MINUTES".to_string(),
                    value: raw.clone(),
                })?,
            None => DEFAULT_TOKEN_EXP_MINUTES,
        };

        Ok(IdpConfig {
            bind_address,
            jwt_secret: SecretString::from(secret.clone()),
            jwt_algorithm,
            token_exp_minutes,
        })
    }

    /// Access token lifetime in seconds.
    #[must_use]
    pub fn token_ttl_seconds(&self) -> i64 {
        self.token_exp_minutes * 60
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn test_secret() -> String {
        "identity-test-secret-at-least-32-bytes!".to_string()
    }

    #[test]
    fn test_from_vars_success() {
        let vars = HashMap::from([
            ("BIND_ADDRESS".to_string(), "127.0.0.1:9001".to_string()),
            ("JWT_SECRET".to_string(), test_secret()),
            ("JWT_ALG".to_string(), "HS512".to_string()),
            ("TOKEN_EXP_MINUTES".to_string(), "15".to_string()),
        ]);

        let config = IdpConfig::from_vars(&vars).expect("Config should load successfully");

        assert_eq!(config.bind_address, "127.0.0.1:9001");
        assert_eq!(config.jwt_secret.expose_secret(), test_secret());
        assert_eq!(config.jwt_algorithm, Algorithm::HS512);
        assert_eq!(config.token_exp_minutes, 15);
        assert_eq!(config.token_ttl_seconds(), 900);
    }

    #[test]
    fn test_from_vars_defaults() {
        let vars = HashMap::from([("JWT_SECRET".to_string(), test_secret())]);

        let config = IdpConfig::from_vars(&vars).expect("Config should load successfully");

        assert_eq!(config.bind_address, "0.0.0.0:8001");
        assert_eq!(config.jwt_algorithm, Algorithm::HS256);
        assert_eq!(config.token_exp_minutes, 30);
    }

    #[test]
    fn test_from_vars_missing_secret() {
        let result = IdpConfig::from_vars(&HashMap::new());
        assert!(matches!(result, Err(ConfigError::MissingEnvVar(v)) if v == "JWT_SECRET"));
    }

    #[test]
    fn test_from_vars_weak_secret_rejected() {
        let vars = HashMap::from([("JWT_SECRET".to_string(), "short".to_string())]);

        let result = IdpConfig::from_vars(&vars);
        assert!(matches!(result, Err(ConfigError::WeakSecret(5))));
    }

    #[test]
    fn test_from_vars_asymmetric_algorithm_rejected() {
        let vars = HashMap::from([
            ("JWT_SECRET".to_string(), test_secret()),
            ("JWT_ALG".to_string(), "RS256".to_string()),
        ]);

        let result = IdpConfig::from_vars(&vars);
        assert!(matches!(result, Err(ConfigError::UnsupportedAlgorithm(a)) if a == "RS256"));
    }

    #[test]
    fn test_from_vars_invalid_ttl_rejected() {
        for bad in ["zero-ish", "0", "-5"] {
            let vars = HashMap::from([
                ("JWT_SECRET".to_string(), test_secret()),
                ("TOKEN_EXP_MINUTES".to_string(), bad.to_string()),
            ]);

            let result = IdpConfig::from_vars(&vars);
            assert!(
                matches!(result, Err(ConfigError::InvalidValue { ref name, .. }) if name == "TOKEN_EXP_MINUTES"),
                "TOKEN_EXP_MINUTES={bad} should be rejected"
            );
        }
    }
}
