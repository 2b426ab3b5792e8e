//! Prometheus metrics exposition handler.
//!
//! # Security
//!
//! This endpoint is unauthenticated so a scraper can reach it. No PII or
//! secrets appear in metrics; labels are bounded gate and decision names.
//! It lives at `/prometheus` because `/admin` is a policy-protected
//! resource prefix on this service.

use axum::{extract::State, response::IntoResponse};
use metrics_exporter_prometheus::PrometheusHandle;

/// Handler for GET /prometheus
///
/// Returns Prometheus-formatted metrics for scraping.
#[tracing::instrument(skip_all, name = "rg.metrics.scrape")]
pub async fn metrics_handler(State(handle): State<PrometheusHandle>) -> impl IntoResponse {
    handle.render()
}
