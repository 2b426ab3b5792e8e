use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::credentials::CredentialError;
use common::jwt::JwtError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdpError {
    /// Generic authentication failure. Never hints at which field failed.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Internal server error")]
    Internal,
}

impl From<CredentialError> for IdpError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::InvalidCredentials => IdpError::InvalidCredentials,
            CredentialError::Hashing => IdpError::Internal,
        }
    }
}

impl From<JwtError> for IdpError {
    fn from(_: JwtError) -> Self {
        // Signing failures on the issuance path are internal faults; the
        // category is not for clients.
        IdpError::Internal
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

impl IntoResponse for IdpError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            IdpError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIALS",
                "Invalid credentials".to_string(),
            ),
            IdpError::Internal => (
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_error_maps_to_generic_401() {
        let err: IdpError = CredentialError::InvalidCredentials.into();
        assert!(matches!(err, IdpError::InvalidCredentials));
    }

    #[test]
    fn test_signing_error_maps_to_internal() {
        let err: IdpError = JwtError::Signing.into();
        assert!(matches!(err, IdpError::Internal));
    }
}
