//! Response models for the resource gateway.
//!
//! The gateway accepts no request bodies; all context arrives in the
//! bearer token and the request path.

use serde::Serialize;

/// Body returned when the policy decision point allows a request.
#[derive(Debug, Serialize)]
pub struct AccessGrantedResponse {
    pub status: &'static str,
    pub subject: String,
    pub role: String,
    pub path: String,
    pub reason: String,
}

/// Body returned when the decision is a challenge. Delivered with a 200
/// status; a challenge is a soft outcome, not an error.
#[derive(Debug, Serialize)]
pub struct ChallengeResponse {
    pub status: &'static str,
    pub reason: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_challenge_response_shape() {
        let response = ChallengeResponse {
            status: "mfa_required",
            reason: "step-up required for sensitive endpoint".to_string(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "mfa_required");
        assert!(json["reason"].as_str().unwrap().contains("step-up"));
    }
}
