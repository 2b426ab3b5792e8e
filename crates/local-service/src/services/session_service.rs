use crate::errors::LocalError;
use crate::models::LocalLoginRequest;
use crate::observability;
use chrono::{DateTime, Utc};
use common::claims::LocalClaims;
use common::credentials::CredentialStore;
use common::jwt::TrustDomain;
use common::observability::hash_for_correlation;
use secrecy::ExposeSecret;

/// Authenticate against the local credential store and issue a short-lived
/// session token in the local trust domain.
///
/// # Errors
///
/// Returns the generic [`LocalError::InvalidCredentials`] on any credential
/// mismatch, [`LocalError::Internal`] if signing fails.
pub fn issue_local_session(
    store: &dyn CredentialStore,
    domain: &TrustDomain,
    ttl_seconds: i64,
    request: &LocalLoginRequest,
    now: DateTime<Utc>,
) -> Result<String, LocalError> {
    let role = store
        .authenticate(&request.username, request.password.expose_secret())
        .map_err(|e| {
            observability::record_session_issuance("failure");
            tracing::info!(
                target: "local.session",
                user = %hash_for_correlation(&request.username),
                "local login rejected"
            );
            LocalError::from(e)
        })?;

    let claims = LocalClaims::new(request.username.clone(), role, now.timestamp(), ttl_seconds);

    // SECURITY: never log the secret or the signed token.
    let token = domain.sign(&claims).map_err(|_| LocalError::Internal)?;

    observability::record_session_issuance("success");
    tracing::info!(
        target: "local.session",
        user = %hash_for_correlation(&request.username),
        expires_in = ttl_seconds,
        "local session issued"
    );

    Ok(token)
}

/// Decode and validate a local session token.
///
/// Signature and expiry validity alone are not sufficient: the `typ` and
/// `iss` markers must also identify the local trust domain. This prevents
/// cross-domain token confusion if secrets were ever shared by mistake.
///
/// # Errors
///
/// Returns [`LocalError::InvalidSession`] with a bounded category on any
/// cryptographic, temporal, or marker failure.
pub fn decode_local(domain: &TrustDomain, token: &str) -> Result<LocalClaims, LocalError> {
    let claims: LocalClaims = domain
        .verify(token)
        .map_err(|e| LocalError::InvalidSession(e.to_string()))?;

    if !claims.has_local_markers() {
        tracing::debug!(target: "local.session", "session rejected: trust-domain markers mismatch");
        return Err(LocalError::InvalidSession("wrong token context".to_string()));
    }

    Ok(claims)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use common::claims::AccessClaims;
    use common::credentials::MemoryCredentialStore;
    use common::secret::SecretString;
    use jsonwebtoken::Algorithm;

    fn test_store() -> MemoryCredentialStore {
        let mut store = MemoryCredentialStore::with_cost(4);
        store.insert_user("localuser", "local", "user").unwrap();
        store.insert_user("localadmin", "admin", "admin").unwrap();
        store
    }

    fn local_domain() -> TrustDomain {
        TrustDomain::new(
            SecretString::from("local-test-secret-also-32-bytes-long!!!"),
            Algorithm::HS256,
        )
    }

    fn identity_domain() -> TrustDomain {
        TrustDomain::new(
            SecretString::from("identity-test-secret-at-least-32-bytes!"),
            Algorithm::HS256,
        )
    }

    fn login(username: &str, password: &str) -> LocalLoginRequest {
        LocalLoginRequest {
            username: username.to_string(),
            password: SecretString::from(password.to_string()),
        }
    }

    #[test]
    fn test_issue_and_decode_round_trip() {
        let domain = local_domain();
        let now = Utc::now();

        let token =
            issue_local_session(&test_store(), &domain, 60, &login("localuser", "local"), now)
                .unwrap();
        let claims = decode_local(&domain, &token).unwrap();

        assert_eq!(claims.sub, "localuser");
        assert_eq!(claims.role, "user");
        assert_eq!(claims.typ, "local");
        assert_eq!(claims.iss, "local_service");
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp, now.timestamp() + 60);
    }

    #[test]
    fn test_bad_credentials_are_generic() {
        let result = issue_local_session(
            &test_store(),
            &local_domain(),
            60,
            &login("localuser", "wrong"),
            Utc::now(),
        );
        assert!(matches!(result, Err(LocalError::InvalidCredentials)));

        let result = issue_local_session(
            &test_store(),
            &local_domain(),
            60,
            &login("ghost", "local"),
            Utc::now(),
        );
        assert!(matches!(result, Err(LocalError::InvalidCredentials)));
    }

    #[test]
    fn test_decode_rejects_foreign_domain_signature() {
        let token = issue_local_session(
            &test_store(),
            &identity_domain(),
            60,
            &login("localuser", "local"),
            Utc::now(),
        )
        .unwrap();

        let result = decode_local(&local_domain(), &token);
        assert!(matches!(result, Err(LocalError::InvalidSession(ref c)) if c == "bad signature"));
    }

    #[test]
    fn test_decode_rejects_wrong_type_marker_despite_valid_signature() {
        // Signed with the LOCAL secret, so the signature verifies, but the
        // type marker identifies a foreign token shape.
        let domain = local_domain();
        let mut claims =
            LocalClaims::new("localuser".to_string(), "user".to_string(), Utc::now().timestamp(), 60);
        claims.typ = "access".to_string();
        let token = domain.sign(&claims).unwrap();

        let result = decode_local(&domain, &token);
        assert!(matches!(result, Err(LocalError::InvalidSession(ref c)) if c == "wrong token context"));
    }

    #[test]
    fn test_decode_rejects_access_shaped_token_even_with_local_secret() {
        // A full access-token payload signed with the local secret does not
        // even deserialize as a local session.
        let domain = local_domain();
        let access = AccessClaims::new(
            "localuser".to_string(),
            "user".to_string(),
            "mac-001".to_string(),
            40,
            Utc::now().timestamp(),
            60,
        );
        let token = domain.sign(&access).unwrap();

        let result = decode_local(&domain, &token);
        assert!(matches!(result, Err(LocalError::InvalidSession(ref c)) if c == "malformed"));
    }

    #[test]
    fn test_decode_rejects_wrong_issuer_marker() {
        let domain = local_domain();
        let mut claims =
            LocalClaims::new("localuser".to_string(), "user".to_string(), Utc::now().timestamp(), 60);
        claims.iss = "other_service".to_string();
        let token = domain.sign(&claims).unwrap();

        let result = decode_local(&domain, &token);
        assert!(matches!(result, Err(LocalError::InvalidSession(ref c)) if c == "wrong token context"));
    }

    #[test]
    fn test_decode_rejects_expired_session() {
        let domain = local_domain();
        let claims = LocalClaims::new(
            "localuser".to_string(),
            "user".to_string(),
            Utc::now().timestamp() - 7200,
            60,
        );
        let token = domain.sign(&claims).unwrap();

        let result = decode_local(&domain, &token);
        assert!(matches!(result, Err(LocalError::InvalidSession(ref c)) if c == "expired"));
    }
}
