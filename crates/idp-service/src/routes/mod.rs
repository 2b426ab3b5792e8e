//! HTTP routes for the identity provider.

use crate::handlers::{handle_login, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the application routes.
///
/// - `POST /login` - authenticate and issue an access token
/// - `GET /health` - liveness probe
pub fn build_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/login", post(handle_login))
        .route("/health", get(health_check))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn health_check() -> &'static str {
    "OK"
}
