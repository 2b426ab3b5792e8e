use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::jwt::JwtError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RgError {
    /// No Authorization header, or one without the Bearer scheme.
    #[error("Missing bearer token")]
    MissingToken,

    /// A Bearer header whose credential part is empty.
    #[error("Malformed bearer token")]
    MalformedToken,

    /// Verification failed. Carries the client-safe category only.
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// The policy decision point denied the request.
    #[error("Access denied: {0}")]
    PolicyDenied(String),

    #[error("Internal server error")]
    Internal,
}

impl From<JwtError> for RgError {
    fn from(err: JwtError) -> Self {
        match err {
            // Display strings of JwtError are the client-safe categories.
            JwtError::Expired
            | JwtError::BadSignature
            | JwtError::Malformed
            | JwtError::TokenTooLarge => RgError::InvalidToken(err.to_string()),
            JwtError::Signing => RgError::Internal,
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

impl IntoResponse for RgError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            RgError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "MISSING_TOKEN",
                "Missing bearer token".to_string(),
            ),
            RgError::MalformedToken => (
                StatusCode::UNAUTHORIZED,
                "MALFORMED_TOKEN",
                "Malformed bearer token".to_string(),
            ),
            RgError::InvalidToken(category) => (
                StatusCode::UNAUTHORIZED,
                "INVALID_TOKEN",
                format!("Invalid or expired token: {category}"),
            ),
            RgError::PolicyDenied(reason) => (
                StatusCode::FORBIDDEN,
                "POLICY_DENIED",
                format!("Access denied: {reason}"),
            ),
            RgError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            ),
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(error_response)).into_response()
    }
}
