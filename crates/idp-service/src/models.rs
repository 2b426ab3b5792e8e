//! Request and response models for the identity provider.

use common::secret::SecretString;
use serde::{Deserialize, Serialize};

/// Login request body.
///
/// `deviceid` and `device_id` are both accepted because deployed clients
/// disagree on the field name; resolution order is handled at issuance.
/// The password is wrapped in [`SecretString`] so the struct derives `Debug`
/// safely.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: SecretString,
    #[serde(default)]
    pub deviceid: Option<String>,
    #[serde(default)]
    pub device_id: Option<String>,
}

/// Successful token issuance response.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    /// Remaining token lifetime in seconds.
    pub expires_in: u64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_accepts_alternate_device_field() {
        let req: LoginRequest =
            serde_json::from_str(r#"{"username":"a","password":"p","device_id":"mac-002"}"#)
                .unwrap();
        assert_eq!(req.deviceid, None);
        assert_eq!(req.device_id.as_deref(), Some("mac-002"));
    }

    #[test]
    fn test_login_request_device_fields_optional() {
        let req: LoginRequest =
            serde_json::from_str(r#"{"username":"a","password":"p"}"#).unwrap();
        assert_eq!(req.deviceid, None);
        assert_eq!(req.device_id, None);
    }

    #[test]
    fn test_login_request_debug_redacts_password() {
        let req: LoginRequest =
            serde_json::from_str(r#"{"username":"a","password":"hunter2"}"#).unwrap();
        let debug_str = format!("{req:?}");
        assert!(!debug_str.contains("hunter2"));
    }
}
