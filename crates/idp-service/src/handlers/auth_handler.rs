use crate::config::IdpConfig;
use crate::errors::IdpError;
use crate::models::{LoginRequest, TokenResponse};
use crate::services::token_service;
use axum::{extract::State, Json};
use chrono::Utc;
use common::credentials::CredentialStore;
use common::jwt::TrustDomain;
use std::sync::Arc;

/// Application state shared across handlers
pub struct AppState {
    pub config: IdpConfig,
    pub domain: TrustDomain,
    pub store: Arc<dyn CredentialStore>,
}

/// Handle a login request
///
/// POST /login
#[tracing::instrument(skip_all, name = "idp.handler.login")]
pub async fn handle_login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, IdpError> {
    let token = token_service::issue_access_token(
        state.store.as_ref(),
        &state.domain,
        state.config.token_ttl_seconds(),
        &payload,
        Utc::now(),
    )?;

    Ok(Json(token))
}
