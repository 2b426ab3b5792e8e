use crate::config::LocalConfig;
use crate::errors::LocalError;
use crate::models::{LocalLoginRequest, LocalLoginResponse, LocalResourceResponse};
use crate::services::session_service;
use axum::{
    extract::State,
    http::header,
    response::{AppendHeaders, IntoResponse},
    Extension, Json,
};
use chrono::Utc;
use common::claims::LocalClaims;
use common::credentials::CredentialStore;
use common::jwt::TrustDomain;
use std::sync::Arc;

/// Application state shared across handlers
pub struct AppState {
    pub config: LocalConfig,
    pub domain: TrustDomain,
    pub store: Arc<dyn CredentialStore>,
}

/// Build the Set-Cookie value delivering the session token.
///
/// The session artifact is a scoped credential, not a bearer header:
/// `Max-Age` equals the token TTL, `HttpOnly` keeps it away from
/// client-side scripts, `SameSite=Lax` restricts cross-site sends, and
/// `Secure` is set whenever the transport is encrypted.
fn session_cookie(config: &LocalConfig, token: &str) -> String {
    let mut cookie = format!(
        "{}={}; Max-Age={}; Path=/; HttpOnly; SameSite=Lax",
        config.cookie_name, token, config.session_ttl_seconds
    );
    if config.cookie_secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Handle a local login request
///
/// POST /local-login
#[tracing::instrument(skip_all, name = "local.handler.login")]
pub async fn handle_local_login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LocalLoginRequest>,
) -> Result<impl IntoResponse, LocalError> {
    let token = session_service::issue_local_session(
        state.store.as_ref(),
        &state.domain,
        state.config.session_ttl_seconds,
        &payload,
        Utc::now(),
    )?;

    let cookie = session_cookie(&state.config, &token);

    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(LocalLoginResponse {
            status: "ok",
            message: "Local login successful",
            expires_in: state.config.session_ttl_seconds,
        }),
    ))
}

/// Session-protected resource
///
/// GET /local-resource
pub async fn handle_local_resource(
    Extension(claims): Extension<LocalClaims>,
) -> Json<LocalResourceResponse> {
    Json(LocalResourceResponse {
        status: "ok",
        subject: claims.sub,
        role: claims.role,
        detail: "Access to local resource granted via local session.",
    })
}

/// Admin-only session-protected resource
///
/// GET /local-admin
pub async fn handle_local_admin(
    Extension(claims): Extension<LocalClaims>,
) -> Result<Json<LocalResourceResponse>, LocalError> {
    if claims.role != "admin" {
        return Err(LocalError::InsufficientRole);
    }

    Ok(Json(LocalResourceResponse {
        status: "ok",
        subject: claims.sub,
        role: claims.role,
        detail: "Admin-only local endpoint.",
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn test_config(secure: bool) -> LocalConfig {
        let mut vars = HashMap::from([(
            "LOCAL_JWT_SECRET".to_string(),
            "local-test-secret-also-32-bytes-long!!!".to_string(),
        )]);
        if secure {
            vars.insert("LOCAL_COOKIE_SECURE".to_string(), "true".to_string());
        }
        LocalConfig::from_vars(&vars).unwrap()
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie(&test_config(false), "tok123");

        assert!(cookie.starts_with("local_session=tok123"));
        assert!(cookie.contains("Max-Age=60"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Path=/"));
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn test_session_cookie_secure_flag() {
        let cookie = session_cookie(&test_config(true), "tok123");
        assert!(cookie.ends_with("; Secure"));
    }

    #[test]
    fn test_secret_never_appears_in_cookie() {
        let cookie = session_cookie(&test_config(false), "tok123");
        assert!(!cookie.contains("local-test-secret"));
    }
}
