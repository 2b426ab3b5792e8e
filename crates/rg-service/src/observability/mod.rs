//! Observability for the resource gateway.

pub mod metrics;

pub use metrics::{init_metrics_recorder, record_policy_decision, record_token_validation};
