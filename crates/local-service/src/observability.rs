//! Metrics for the local service.
//!
//! Prometheus naming conventions: `local_` prefix, `_total` suffix for
//! counters. Labels are bounded: `status` takes two values
//! (success, failure).

use metrics::counter;

/// Record a session issuance attempt.
///
/// Metric: `local_session_issuance_total`
/// Labels: `status` (success, failure)
pub fn record_session_issuance(status: &str) {
    counter!("local_session_issuance_total", "status" => status.to_string()).increment(1);
}
