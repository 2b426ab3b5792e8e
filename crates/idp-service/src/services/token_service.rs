use crate::errors::IdpError;
use crate::models::{LoginRequest, TokenResponse};
use crate::observability;
use chrono::{DateTime, Utc};
use common::claims::{normalize_device_id, AccessClaims};
use common::credentials::CredentialStore;
use common::jwt::TrustDomain;
use common::observability::hash_for_correlation;
use common::risk;
use secrecy::ExposeSecret;

/// Issue a signed, risk-scored access token.
///
/// Authenticates against the injected credential store, resolves and
/// normalizes the device identity, scores the session, and signs the claims
/// in the identity trust domain. `now` is passed in so issuance is
/// deterministic under test.
///
/// # Errors
///
/// Returns the generic [`IdpError::InvalidCredentials`] on any credential
/// mismatch, and [`IdpError::Internal`] if signing fails.
pub fn issue_access_token(
    store: &dyn CredentialStore,
    domain: &TrustDomain,
    ttl_seconds: i64,
    request: &LoginRequest,
    now: DateTime<Utc>,
) -> Result<TokenResponse, IdpError> {
    let role = store
        .authenticate(&request.username, request.password.expose_secret())
        .map_err(|e| {
            observability::record_token_issuance("failure");
            tracing::info!(
                target: "idp.token",
                user = %hash_for_correlation(&request.username),
                "login rejected"
            );
            IdpError::from(e)
        })?;

    let deviceid = normalize_device_id(request.deviceid.as_deref(), request.device_id.as_deref());
    let riskscore = risk::score(&role, &deviceid);

    let claims = AccessClaims::new(
        request.username.clone(),
        role.clone(),
        deviceid,
        riskscore,
        now.timestamp(),
        ttl_seconds,
    );

    // SECURITY: never log the secret, the signed token, or full claims.
    let token = domain.sign(&claims)?;

    observability::record_token_issuance("success");
    tracing::info!(
        target: "idp.token",
        user = %hash_for_correlation(&request.username),
        role = %role,
        expires_in = claims.lifetime_seconds(),
        "access token issued"
    );

    Ok(TokenResponse {
        access_token: token,
        token_type: "bearer".to_string(),
        expires_in: u64::try_from(claims.lifetime_seconds()).unwrap_or(0),
    })
}
