//! The policy decision point.
//!
//! Every gateway request runs through [`evaluate`], which applies three
//! gates in a fixed order and short-circuits on the first deny:
//!
//! 1. Time gate: the request's local hour must fall inside the configured
//!    business window. The window is half-open, `[start, end)`.
//! 2. Device gate: the token must carry a registered device identifier.
//! 3. Sensitivity gate: on sensitive paths, admins pass, high-risk
//!    principals are denied, and everyone else is challenged for step-up.
//!
//! Evaluation is pure: it reads the claims, the path and the supplied
//! clock, and never touches ambient state. The caller decides how a
//! [`Decision`] maps onto an HTTP response.

use crate::config::PolicyConfig;
use chrono::{DateTime, Timelike, Utc};
use common::claims::AccessClaims;

/// Outcome of a policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Challenge,
    Deny,
}

impl Decision {
    /// Stable lowercase label, used in logs and metrics.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Decision::Allow => "allow",
            Decision::Challenge => "challenge",
            Decision::Deny => "deny",
        }
    }
}

/// The gate that produced a decision. Bounded, safe as a metric label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Time,
    Device,
    Sensitivity,
    Default,
}

impl Gate {
    /// Stable lowercase label, used in logs and metrics.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Gate::Time => "time",
            Gate::Device => "device",
            Gate::Sensitivity => "sensitivity",
            Gate::Default => "default",
        }
    }
}

/// A decision paired with a human-readable reason. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyDecision {
    pub decision: Decision,
    pub gate: Gate,
    pub reason: String,
}

impl PolicyDecision {
    fn allow(gate: Gate, reason: impl Into<String>) -> Self {
        PolicyDecision {
            decision: Decision::Allow,
            gate,
            reason: reason.into(),
        }
    }

    fn challenge(gate: Gate, reason: impl Into<String>) -> Self {
        PolicyDecision {
            decision: Decision::Challenge,
            gate,
            reason: reason.into(),
        }
    }

    fn deny(gate: Gate, reason: impl Into<String>) -> Self {
        PolicyDecision {
            decision: Decision::Deny,
            gate,
            reason: reason.into(),
        }
    }
}

/// True if `path` equals `prefix` or sits underneath it as a whole
/// segment. `/export/q1` matches prefix `/export`; `/exports` does not.
fn matches_segment_prefix(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

fn is_sensitive(policy: &PolicyConfig, path: &str) -> bool {
    policy
        .sensitive_prefixes
        .iter()
        .any(|prefix| matches_segment_prefix(path, prefix))
}

fn within_business_hours(policy: &PolicyConfig, now: DateTime<Utc>) -> bool {
    let hour = now.with_timezone(&policy.utc_offset).hour();
    policy.business_hours_start <= hour && hour < policy.business_hours_end
}

/// Evaluate the request context against the configured policy.
///
/// Gates run in order; the first failing gate determines the outcome.
/// `now` is injected so callers and tests control the clock.
pub fn evaluate(
    policy: &PolicyConfig,
    path: &str,
    claims: &AccessClaims,
    now: DateTime<Utc>,
) -> PolicyDecision {
    if !within_business_hours(policy, now) {
        return PolicyDecision::deny(
            Gate::Time,
            format!(
                "outside business hours ({:02}:00-{:02}:00 UTC{})",
                policy.business_hours_start, policy.business_hours_end, policy.utc_offset
            ),
        );
    }

    // Issuance normalizes a blank device to "unknown", which then fails the
    // registered-set membership below; the empty check covers tokens minted
    // by other writers of this trust domain.
    if claims.deviceid.trim().is_empty() {
        return PolicyDecision::deny(Gate::Device, "device ID missing");
    }
    if !policy.registered_devices.contains(&claims.deviceid) {
        return PolicyDecision::deny(
            Gate::Device,
            format!("device not trusted ({})", claims.deviceid),
        );
    }

    if is_sensitive(policy, path) {
        if claims.role == "admin" {
            return PolicyDecision::allow(Gate::Sensitivity, "admin on sensitive endpoint");
        }
        if claims.riskscore >= policy.risk_threshold {
            return PolicyDecision::deny(Gate::Sensitivity, "high riskscore on sensitive endpoint");
        }
        return PolicyDecision::challenge(Gate::Sensitivity, "step-up required for sensitive endpoint");
    }

    PolicyDecision::allow(Gate::Default, "access allowed")
}
