//! HTTP routes for the local service.

use crate::handlers::{handle_local_admin, handle_local_login, handle_local_resource, AppState};
use crate::middleware::{require_session, SessionState};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the application routes.
///
/// - `POST /local-login` - authenticate and set the session cookie
/// - `GET /local-resource` - session-protected resource
/// - `GET /local-admin` - session-protected, admin role required
/// - `GET /health` - liveness probe
pub fn build_routes(state: Arc<AppState>) -> Router {
    let session_state = Arc::new(SessionState {
        domain: state.domain.clone(),
        cookie_name: state.config.cookie_name.clone(),
    });

    let protected_routes = Router::new()
        .route("/local-resource", get(handle_local_resource))
        .route("/local-admin", get(handle_local_admin))
        .layer(middleware::from_fn_with_state(session_state, require_session));

    Router::new()
        .route("/local-login", post(handle_local_login))
        .route("/health", get(health_check))
        .merge(protected_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn health_check() -> &'static str {
    "OK"
}
