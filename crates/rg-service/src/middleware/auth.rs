//! Bearer token extraction and verification.
//!
//! Extracts the Bearer credential from the Authorization header, verifies
//! it against the identity trust domain, and injects the decoded
//! `AccessClaims` into request extensions for the policy handlers.

use crate::errors::RgError;
use crate::observability;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::IntoResponse,
};
use common::claims::AccessClaims;
use common::jwt::TrustDomain;
use std::sync::Arc;
use tracing::instrument;

/// State for the authentication middleware.
#[derive(Clone)]
pub struct AuthState {
    /// Identity trust domain, verification only.
    pub domain: TrustDomain,
}

/// Extract the Bearer credential from the Authorization header.
fn extract_bearer_token(req: &Request) -> Result<&str, RgError> {
    let auth_header = req
        .headers()
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::debug!(target: "rg.middleware.auth", "Missing Authorization header");
            RgError::MissingToken
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::debug!(target: "rg.middleware.auth", "Authorization header is not Bearer");
        RgError::MissingToken
    })?;

    let token = token.trim();
    if token.is_empty() {
        return Err(RgError::MalformedToken);
    }

    Ok(token)
}

/// Authentication middleware for access tokens.
///
/// # Response
///
/// - Returns 401 Unauthorized if the token is missing, malformed or fails
///   verification
/// - Continues to the next handler with `AccessClaims` in extensions
#[instrument(skip_all, name = "rg.middleware.auth")]
pub async fn require_bearer(
    State(state): State<Arc<AuthState>>,
    mut req: Request,
    next: Next,
) -> Result<impl IntoResponse, RgError> {
    let token = extract_bearer_token(&req).inspect_err(|err| {
        let category = match err {
            RgError::MalformedToken => "malformed",
            _ => "missing",
        };
        observability::record_token_validation("rejected", category);
    })?;

    let claims: AccessClaims = state.domain.verify(token).map_err(|err| {
        tracing::debug!(target: "rg.middleware.auth", category = %err, "Token verification failed");
        observability::record_token_validation("invalid", &err.to_string());
        RgError::from(err)
    })?;

    observability::record_token_validation("valid", "none");
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
