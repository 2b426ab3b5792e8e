//! Claims carried inside signed tokens.
//!
//! Two claim shapes exist, one per trust domain:
//!
//! - [`AccessClaims`] is issued by the identity provider and carries the
//!   device identity and risk score the gateway's policy engine operates on.
//! - [`LocalClaims`] is issued by the local service for its own short-lived
//!   sessions, marked with a distinct `typ` and `iss` so the two domains can
//!   never be confused even if secrets were ever shared by mistake.
//!
//! Claims are immutable values: normalization (missing device → `"unknown"`)
//! happens once at construction, never at the call sites.
//!
//! # Security
//!
//! The `sub` field is redacted in Debug output to prevent accidental logging
//! of principal identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Token type marker for identity-provider access tokens.
pub const TOKEN_TYPE_ACCESS: &str = "access";

/// Token type marker for local-service session tokens.
pub const TOKEN_TYPE_LOCAL: &str = "local";

/// Issuer marker carried by every local session token.
pub const LOCAL_ISSUER: &str = "local_service";

/// Placeholder device identifier when none was supplied at login.
pub const UNKNOWN_DEVICE: &str = "unknown";

/// Resolve the device identifier from a login request.
///
/// Takes the first non-blank of the primary and alternate field (clients
/// disagree on the field name), trims surrounding whitespace, and falls back
/// to [`UNKNOWN_DEVICE`]. Performed once at issuance so downstream code can
/// rely on `deviceid` being non-empty.
#[must_use]
pub fn normalize_device_id(primary: Option<&str>, alternate: Option<&str>) -> String {
    primary
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or_else(|| alternate.map(str::trim).filter(|s| !s.is_empty()))
        .unwrap_or(UNKNOWN_DEVICE)
        .to_string()
}

/// Claims asserted by an identity-provider access token.
///
/// Invariants, guaranteed by [`AccessClaims::new`]:
/// - `exp > iat` (positive TTL required)
/// - `riskscore` is in `[0, 99]` (the scorer clamps)
/// - `auth_time == iat` at issuance
/// - `typ == "access"`
#[derive(Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (authenticated principal) - redacted in Debug output.
    pub sub: String,

    /// Role assigned by the credential store (`analyst`, `contractor`, ...).
    pub role: String,

    /// Normalized device identifier, `"unknown"` when absent at login.
    pub deviceid: String,

    /// Contextual risk score in `[0, 99]`.
    pub riskscore: u8,

    /// Issued-at timestamp (Unix epoch seconds).
    pub iat: i64,

    /// Expiration timestamp (Unix epoch seconds).
    pub exp: i64,

    /// Token type marker, always `"access"` for this shape.
    pub typ: String,

    /// Timestamp of the authentication event (Unix epoch seconds).
    pub auth_time: i64,
}

impl AccessClaims {
    /// Build access claims issued at `iat` and valid for `ttl_seconds`.
    ///
    /// `ttl_seconds` must be positive; it is lower-bounded to 1 so the
    /// `exp > iat` invariant holds even for a misconfigured zero TTL.
    #[must_use]
    pub fn new(sub: String, role: String, deviceid: String, riskscore: u8, iat: i64, ttl_seconds: i64) -> Self {
        Self {
            sub,
            role,
            deviceid,
            riskscore,
            iat,
            exp: iat + ttl_seconds.max(1),
            typ: TOKEN_TYPE_ACCESS.to_string(),
            auth_time: iat,
        }
    }

    /// Remaining lifetime in seconds at issuance.
    #[must_use]
    pub fn lifetime_seconds(&self) -> i64 {
        self.exp - self.iat
    }
}

impl fmt::Debug for AccessClaims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessClaims")
            .field("sub", &"[REDACTED]")
            .field("role", &self.role)
            .field("deviceid", &self.deviceid)
            .field("riskscore", &self.riskscore)
            .field("iat", &self.iat)
            .field("exp", &self.exp)
            .field("typ", &self.typ)
            .field("auth_time", &self.auth_time)
            .finish()
    }
}

/// Claims asserted by a local-service session token.
///
/// Carries no device or risk fields; the local trust domain is identified by
/// the fixed `typ`/`iss` markers instead.
#[derive(Clone, Serialize, Deserialize)]
pub struct LocalClaims {
    /// Subject (authenticated principal) - redacted in Debug output.
    pub sub: String,

    /// Role assigned by the local credential store.
    pub role: String,

    /// Issued-at timestamp (Unix epoch seconds).
    pub iat: i64,

    /// Expiration timestamp (Unix epoch seconds).
    pub exp: i64,

    /// Token type marker, always `"local"` for this shape.
    pub typ: String,

    /// Issuer marker, always `"local_service"` for this shape.
    pub iss: String,
}

impl LocalClaims {
    /// Build local session claims issued at `iat` and valid for `ttl_seconds`.
    #[must_use]
    pub fn new(sub: String, role: String, iat: i64, ttl_seconds: i64) -> Self {
        Self {
            sub,
            role,
            iat,
            exp: iat + ttl_seconds.max(1),
            typ: TOKEN_TYPE_LOCAL.to_string(),
            iss: LOCAL_ISSUER.to_string(),
        }
    }

    /// Whether the `typ`/`iss` markers identify the local trust domain.
    ///
    /// A valid signature alone is not sufficient to accept a local session;
    /// callers must reject tokens for which this returns false.
    #[must_use]
    pub fn has_local_markers(&self) -> bool {
        self.typ == TOKEN_TYPE_LOCAL && self.iss == LOCAL_ISSUER
    }
}

impl fmt::Debug for LocalClaims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalClaims")
            .field("sub", &"[REDACTED]")
            .field("role", &self.role)
            .field("iat", &self.iat)
            .field("exp", &self.exp)
            .field("typ", &self.typ)
            .field("iss", &self.iss)
            .finish()
    }
}
