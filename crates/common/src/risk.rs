//! Contextual risk scoring for access token issuance.
//!
//! The score is a bounded integer summarizing how much the current session
//! can be trusted; the gateway's policy engine compares it against a
//! configured threshold on sensitive paths. The formula is deliberately
//! simple and must stay stable: the default deny threshold (70) is
//! calibrated against this scale.

/// Baseline risk assigned to every session.
pub const BASE_RISK: u8 = 40;

/// Surcharge for contractor sessions.
pub const CONTRACTOR_SURCHARGE: u8 = 20;

/// Surcharge for sessions without a usable device identity.
pub const MISSING_DEVICE_SURCHARGE: u8 = 20;

/// Upper bound of the risk scale.
pub const MAX_RISK: u8 = 99;

/// Compute the risk score for a session.
///
/// Pure and deterministic: identical inputs always produce the identical
/// score, and the result is always in `[0, MAX_RISK]`.
///
/// - contractors carry a higher baseline risk (+20)
/// - a missing or placeholder device identity adds risk (+20); the device is
///   considered missing when, after trimming, it is empty or
///   case-insensitively one of `unknown` / `none`
#[must_use]
pub fn score(role: &str, deviceid: &str) -> u8 {
    let mut risk = BASE_RISK;

    if role == "contractor" {
        risk = risk.saturating_add(CONTRACTOR_SURCHARGE);
    }

    if is_missing_device(deviceid) {
        risk = risk.saturating_add(MISSING_DEVICE_SURCHARGE);
    }

    risk.min(MAX_RISK)
}

/// Whether a device identifier conveys no real device identity.
fn is_missing_device(deviceid: &str) -> bool {
    let normalized = deviceid.trim().to_lowercase();
    normalized.is_empty() || normalized == "unknown" || normalized == "none"
}
