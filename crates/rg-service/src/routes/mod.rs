//! HTTP routes for the resource gateway.

use crate::handlers::{access_resource, metrics_handler, AppState};
use crate::middleware::{require_bearer, AuthState};
use axum::{middleware, routing::get, Router};
use common::jwt::TrustDomain;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the application routes.
///
/// - `GET /resource` - bearer-protected, policy-evaluated resource
/// - `GET /export` - bearer-protected; sensitive under the default policy
/// - `GET /admin/metrics` - bearer-protected; nested under a sensitive prefix
/// - `GET /health` - liveness probe
/// - `GET /prometheus` - metrics exposition, unauthenticated
///
/// Every protected route funnels into the same handler; the policy
/// decision point differentiates them by path.
pub fn build_routes(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let auth_state = Arc::new(AuthState {
        domain: TrustDomain::new(state.config.jwt_secret.clone(), state.config.jwt_algorithm),
    });

    let protected_routes = Router::new()
        .route("/resource", get(access_resource))
        .route("/export", get(access_resource))
        .route("/admin/metrics", get(access_resource))
        .route_layer(middleware::from_fn_with_state(auth_state, require_bearer))
        .with_state(state);

    let metrics_routes = Router::new()
        .route("/prometheus", get(metrics_handler))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(health_check))
        .merge(metrics_routes)
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
}

async fn health_check() -> &'static str {
    "OK"
}
