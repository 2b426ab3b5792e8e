//! Metrics definitions for the resource gateway.
//!
//! All metrics follow Prometheus naming conventions:
//! - `rg_` prefix for the resource gateway
//! - `_total` suffix for counters
//!
//! # Cardinality
//!
//! Labels are bounded to prevent cardinality explosion:
//! - `decision`: 3 values (allow, challenge, deny)
//! - `gate`: 4 values (time, device, sensitivity, default)
//! - `status`: 3 values (valid, invalid, rejected)
//! - `category`: bounded by the verification error variants
//!
//! Request paths are never used as labels; the policy gate that produced
//! a decision is recorded instead.

use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Initialize the Prometheus metrics recorder and return the handle for
/// serving the exposition endpoint.
///
/// Must be called before any metrics are recorded, and only once per
/// process.
///
/// # Errors
///
/// Returns an error if the recorder fails to install (e.g., already
/// installed).
pub fn init_metrics_recorder() -> Result<PrometheusHandle, String> {
    PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| format!("Failed to install Prometheus recorder: {e}"))
}

/// Record a policy decision.
///
/// Metric: `rg_policy_decisions_total`
/// Labels: `decision`, `gate`
pub fn record_policy_decision(decision: &str, gate: &str) {
    counter!("rg_policy_decisions_total",
        "decision" => decision.to_string(),
        "gate" => gate.to_string()
    )
    .increment(1);
}

/// Record a bearer token validation outcome.
///
/// Metric: `rg_token_validations_total`
/// Labels: `status` ("valid", "invalid" for verification failures,
/// "rejected" for requests without a usable credential), `category`
/// (the bounded failure category, "none" on success)
pub fn record_token_validation(status: &str, category: &str) {
    counter!("rg_token_validations_total",
        "status" => status.to_string(),
        "category" => category.to_string()
    )
    .increment(1);
}
