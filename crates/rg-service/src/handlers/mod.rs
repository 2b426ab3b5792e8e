//! HTTP request handlers for the resource gateway.

pub mod gateway_handler;
pub mod metrics;

pub use gateway_handler::{access_resource, AppState};
pub use metrics::metrics_handler;
