use crate::config::RgConfig;
use crate::errors::RgError;
use crate::models::{AccessGrantedResponse, ChallengeResponse};
use crate::observability;
use crate::policy::{self, Decision};
use axum::{
    extract::State,
    http::Uri,
    response::{IntoResponse, Response},
    Extension, Json,
};
use chrono::Utc;
use common::claims::AccessClaims;
use common::observability::hash_for_correlation;
use std::sync::Arc;

/// Application state shared across handlers
pub struct AppState {
    pub config: RgConfig,
}

/// Run the policy decision point for a verified request and map the
/// decision onto a response.
///
/// One handler serves every protected path; the request URI is the
/// policy input, not the route.
///
/// # Response
///
/// - `deny` - 403 with the policy reason
/// - `challenge` - 200 with `status=mfa_required`; the caller is expected
///   to complete step-up and retry
/// - `allow` - 200 with subject, role, path and reason
#[tracing::instrument(skip_all, name = "rg.handler.access", fields(path = %uri.path()))]
pub async fn access_resource(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<AccessClaims>,
    uri: Uri,
) -> Result<Response, RgError> {
    let path = uri.path();
    let result = policy::evaluate(&state.config.policy, path, &claims, Utc::now());

    observability::record_policy_decision(result.decision.as_str(), result.gate.as_str());
    tracing::info!(
        target: "rg.handler.access",
        subject_hash = %hash_for_correlation(&claims.sub),
        role = %claims.role,
        decision = result.decision.as_str(),
        gate = result.gate.as_str(),
        reason = %result.reason,
        "Policy decision"
    );

    match result.decision {
        Decision::Deny => Err(RgError::PolicyDenied(result.reason)),
        Decision::Challenge => Ok(Json(ChallengeResponse {
            status: "mfa_required",
            reason: result.reason,
        })
        .into_response()),
        Decision::Allow => Ok(Json(AccessGrantedResponse {
            status: "ok",
            subject: claims.sub,
            role: claims.role,
            path: path.to_string(),
            reason: result.reason,
        })
        .into_response()),
    }
}
