//! Resource gateway configuration, loaded once at startup.
//!
//! The gateway shares `JWT_SECRET`/`JWT_ALG` with the identity provider so
//! it can verify tokens from that trust domain. The policy knobs live in
//! their own struct so the decision point can be exercised without any of
//! the HTTP surface.

use chrono::FixedOffset;
use jsonwebtoken::Algorithm;
use secrecy::SecretString;
use std::collections::{HashMap, HashSet};
use std::env;
use thiserror::Error;

/// Minimum accepted HMAC secret length in bytes.
const MIN_SECRET_BYTES: usize = 32;

/// Default first hour of the business window (inclusive).
const DEFAULT_BUSINESS_HOURS_START: u32 = 7;

/// Default end hour of the business window (exclusive).
const DEFAULT_BUSINESS_HOURS_END: u32 = 19;

/// Default risk score at or above which sensitive paths are denied.
const DEFAULT_RISK_THRESHOLD: u8 = 70;

#[derive(Clone)]
pub struct RgConfig {
    pub bind_address: String,
    /// HMAC secret of the identity trust domain, used for verification only.
    pub jwt_secret: SecretString,
    pub jwt_algorithm: Algorithm,
    pub policy: PolicyConfig,
}

/// Inputs to the policy decision point.
#[derive(Clone)]
pub struct PolicyConfig {
    /// First hour of the business window, inclusive.
    pub business_hours_start: u32,
    /// End hour of the business window, exclusive. The window is half-open:
    /// a request at exactly `end:00` is outside business hours.
    pub business_hours_end: u32,
    /// Offset applied to UTC before the hour check.
    pub utc_offset: FixedOffset,
    /// Path prefixes treated as sensitive, matched on whole segments.
    pub sensitive_prefixes: Vec<String>,
    /// Device identifiers the organization trusts.
    pub registered_devices: HashSet<String>,
    /// Risk score at or above which sensitive paths are denied.
    pub risk_threshold: u8,
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

    #[error("Business hours window is empty: start {start} must be before end {end}")]
    EmptyBusinessWindow { start: u32, end: u32 },
}

/// Parse an HMAC algorithm name, rejecting asymmetric families.
pub(crate) fn parse_hmac_algorithm(name: &str) -> Result<Algorithm, ConfigError> {
    match name {
        "HS256" => Ok(Algorithm::HS256),
        "HS384" => Ok(Algorithm::HS384),
        "HS512" => Ok(Algorithm::HS512),
        other => Err(ConfigError::UnsupportedAlgorithm(other.to_string())),
    }
}

/// Parse a `+HH:MM` / `-HH:MM` UTC offset into a `FixedOffset`.
fn parse_utc_offset(raw: &str) -> Option<FixedOffset> {
    let (sign, rest) = match raw.strip_prefix('+') {
        Some(rest) => (1, rest),
        None => (-1, raw.strip_prefix('-')?),
    };
    let (hours, minutes) = rest.split_once(':')?;
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Parse an hour-of-day in `0..=24`. 24 is permitted only as an end bound.
fn parse_hour(vars: &HashMap<String, String>, name: &str, default: u32) -> Result<u32, ConfigError> {
    match vars.get(name) {
        Some(raw) => raw
            .parse::<u32>()
            .ok()
            .filter(|h| *h <= 24)
            .ok_or_else(|| ConfigError::InvalidValue {
                name: name.to_string(),
                value: raw.clone(),
            }),
        None => Ok(default),
    }
}

/// Split a comma-separated list, trimming blanks.
fn parse_list(raw: &str) -> impl Iterator<Item = String> + '_ {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

impl RgConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing)
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let bind_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| "0.0.0.0:8002".to_string());

        let secret = vars
            .get("JWT_SECRET")
            .ok_or_else(|| ConfigError::MissingEnvVar("JWT_SECRET".to_string()))?;

        if secret.len() < MIN_SECRET_BYTES {
            return Err(ConfigError::WeakSecret(secret.len()));
        }

        let jwt_algorithm = parse_hmac_algorithm(vars.get("JWT_ALG").map_or("HS256", String::as_str))?;

        Ok(RgConfig {
            bind_address,
            jwt_secret: SecretString::from(secret.clone()),
            jwt_algorithm,
            policy: PolicyConfig::from_vars(vars)?,
        })
    }
}

impl PolicyConfig {
    /// Load the policy knobs from a HashMap, applying defaults.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let business_hours_start =
            parse_hour(vars, "BUSINESS_HOURS_START", DEFAULT_BUSINESS_HOURS_START)?;
        let business_hours_end = parse_hour(vars, "BUSINESS_HOURS_END", DEFAULT_BUSINESS_HOURS_END)?;

        if business_hours_start >= business_hours_end {
            return Err(ConfigError::EmptyBusinessWindow {
                start: business_hours_start,
                end: business_hours_end,
            });
        }

        let raw_offset = vars
            .get("BUSINESS_HOURS_UTC_OFFSET")
            .map_or("+00:00", String::as_str);
        let utc_offset =
            parse_utc_offset(raw_offset).ok_or_else(|| ConfigError::InvalidValue {
                name: "BUSINESS_HOURS_UTC_OFFSET".to_string(),
                value: raw_offset.to_string(),
            })?;

        let sensitive_prefixes: Vec<String> = parse_list(
            vars.get("SENSITIVE_PATHS")
                .map_or("/export,/admin", String::as_str),
        )
        .collect();

        let registered_devices: HashSet<String> = parse_list(
            vars.get("REGISTERED_DEVICE_IDS")
                .map_or("mac-001", String::as_str),
        )
        .collect();

        let risk_threshold = match vars.get("RISK_THRESHOLD") {
            Some(raw) => raw
                .parse::<u8>()
                .map_err(|_| ConfigError::InvalidValue {
                    name: "RISK_THRESHOLD".to_string(),
                    value: raw.clone(),
                })?,
            None => DEFAULT_RISK_THRESHOLD,
        };

        Ok(PolicyConfig {
            business_hours_start,
            business_hours_end,
            utc_offset,
            sensitive_prefixes,
            registered_devices,
            risk_threshold,
        })
    }
}
