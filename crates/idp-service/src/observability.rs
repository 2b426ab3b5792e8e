//! Metrics for the identity provider.
//!
//! Prometheus naming conventions: `idp_` prefix, `_total` suffix for
//! counters. Labels are bounded: `status` takes two values
//! (success, failure).

use metrics::counter;

/// Record a token issuance attempt.
///
/// Metric: `idp_token_issuance_total`
/// Labels: `status` (success, failure)
pub fn record_token_issuance(status: &str) {
    counter!("idp_token_issuance_total", "status" => status.to_string()).increment(1);
}
