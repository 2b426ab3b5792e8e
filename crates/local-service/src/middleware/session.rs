//! Session cookie authentication middleware.
//!
//! Extracts the session cookie, validates the token in the local trust
//! domain (signature, expiry, and `typ`/`iss` markers), and injects the
//! decoded [`LocalClaims`] into request extensions for downstream handlers.

use crate::errors::LocalError;
use crate::services::session_service;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::IntoResponse,
};
use common::claims::LocalClaims;
use common::jwt::TrustDomain;
use std::sync::Arc;
use tracing::instrument;

/// State for the session middleware.
#[derive(Clone)]
pub struct SessionState {
    /// The local trust domain used for verification.
    pub domain: TrustDomain,
    /// Name of the session cookie.
    pub cookie_name: String,
}

/// Find the named cookie's value in the Cookie header, if present.
fn extract_session_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let cookie_header = headers.get(header::COOKIE)?.to_str().ok()?;

    cookie_header
        .split(';')
        .map(str::trim)
        .find_map(|pair| {
            pair.strip_prefix(name)
                .and_then(|rest| rest.strip_prefix('='))
                .map(ToString::to_string)
        })
}

/// Session authentication middleware.
///
/// # Response
///
/// - 401 if the cookie is missing or the session token is invalid
/// - Continues to the next handler with `LocalClaims` in extensions otherwise
#[instrument(skip_all, name = "local.middleware.session")]
pub async fn require_session(
    State(state): State<Arc<SessionState>>,
    mut req: Request,
    next: Next,
) -> Result<impl IntoResponse, LocalError> {
    let token = extract_session_cookie(req.headers(), &state.cookie_name).ok_or_else(|| {
        tracing::debug!(target: "local.middleware.session", "missing session cookie");
        LocalError::MissingSession
    })?;

    let claims = session_service::decode_local(&state.domain, &token)?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
