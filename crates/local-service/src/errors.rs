use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::credentials::CredentialError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocalError {
    /// Generic authentication failure. Never hints at which field failed.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No session cookie on the request.
    #[error("Missing local session")]
    MissingSession,

    /// Session token failed validation; carries only the bounded failure
    /// category, never the token.
    #[error("Invalid local session: {0}")]
    InvalidSession(String),

    /// Authenticated, but the role does not permit this endpoint.
    #[error("Admin role required")]
    InsufficientRole,

    #[error("Internal server error")]
    Internal,
}

impl From<CredentialError> for LocalError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::InvalidCredentials => LocalError::InvalidCredentials,
            CredentialError::Hashing => LocalError::Internal,
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

impl IntoResponse for LocalError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            LocalError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIALS",
                "Invalid credentials".to_string(),
            ),
            LocalError::MissingSession => (
                StatusCode::UNAUTHORIZED,
                "MISSING_SESSION",
                "Missing local session cookie".to_string(),
            ),
            LocalError::InvalidSession(category) => (
                StatusCode::UNAUTHORIZED,
                "INVALID_SESSION",
                format!("Invalid or expired local session: {category}"),
            ),
            LocalError::InsufficientRole => (
                StatusCode::FORBIDDEN,
                "INSUFFICIENT_ROLE",
                "Admin role required for this endpoint".to_string(),
            ),
            LocalError::Internal => (
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
