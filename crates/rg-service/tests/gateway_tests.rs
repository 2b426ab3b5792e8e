//! Integration tests for the resource gateway's HTTP surface.
//!
//! Drives the router directly with `tower::ServiceExt::oneshot`. Tokens
//! are minted inline with the identity trust domain's test secret.
//!
//! The policy handler reads the real clock, so tests that must land
//! inside the business window configure a full-day window, and the
//! out-of-window test computes a window that excludes the current hour.
//! Deterministic boundary coverage lives in the policy unit tests.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::{Timelike, Utc};
use common::claims::AccessClaims;
use common::jwt::TrustDomain;
use common::secret::SecretString;
use http_body_util::BodyExt;
use jsonwebtoken::Algorithm;
use metrics_exporter_prometheus::PrometheusBuilder;
use rg_service::config::RgConfig;
use rg_service::handlers::AppState;
use rg_service::routes::build_routes;
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceExt;

const IDENTITY_SECRET: &str = "identity-test-secret-at-least-32-bytes!";
const LOCAL_SECRET: &str = "local-test-secret-also-32-bytes-long!!!";

fn router_with_hours(start: u32, end: u32) -> axum::Router {
    let config = RgConfig::from_vars(&HashMap::from([
        ("JWT_SECRET".to_string(), IDENTITY_SECRET.to_string()),
        ("BUSINESS_HOURS_START".to_string(), start.to_string()),
        ("BUSINESS_HOURS_END".to_string(), end.to_string()),
    ]))
    .expect("test config should load");

    // A per-router recorder handle; nothing is installed globally.
    let metrics_handle = PrometheusBuilder::new().build_recorder().handle();

    build_routes(Arc::new(AppState { config }), metrics_handle)
}

/// Router whose business window always contains the current time.
fn test_router() -> axum::Router {
    router_with_hours(0, 24)
}

fn identity_domain() -> TrustDomain {
    TrustDomain::new(SecretString::from(IDENTITY_SECRET), Algorithm::HS256)
}

fn mint_token(role: &str, deviceid: &str, riskscore: u8) -> String {
    let claims = AccessClaims::new(
        "tester".to_string(),
        role.to_string(),
        deviceid.to_string(),
        riskscore,
        Utc::now().timestamp(),
        1800,
    );
    identity_domain().sign(&claims).expect("signing should succeed")
}

fn bearer_request(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request should build")
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_trusted_device_in_hours_allowed() -> Result<(), anyhow::Error> {
    let token = mint_token("analyst", "mac-001", 40);
    let response = test_router().oneshot(bearer_request("/resource", &token)).await?;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"].as_str(), Some("ok"));
    assert_eq!(json["subject"].as_str(), Some("tester"));
    assert_eq!(json["role"].as_str(), Some("analyst"));
    assert_eq!(json["path"].as_str(), Some("/resource"));

    Ok(())
}

#[tokio::test]
async fn test_sensitive_path_challenges_low_risk() -> Result<(), anyhow::Error> {
    let token = mint_token("analyst", "mac-001", 40);
    let response = test_router().oneshot(bearer_request("/export", &token)).await?;

    // A challenge is a soft outcome carried on a success status.
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"].as_str(), Some("mfa_required"));
    assert!(json["reason"].as_str().unwrap().contains("step-up"));

    Ok(())
}

#[tokio::test]
async fn test_sensitive_path_allows_admin() -> Result<(), anyhow::Error> {
    let token = mint_token("admin", "mac-001", 40);
    let response = test_router().oneshot(bearer_request("/export", &token)).await?;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"].as_str(), Some("ok"));
    assert!(json["reason"].as_str().unwrap().contains("admin"));

    Ok(())
}

#[tokio::test]
async fn test_sensitive_path_denies_high_risk() -> Result<(), anyhow::Error> {
    let token = mint_token("contractor", "mac-001", 75);
    let response = test_router().oneshot(bearer_request("/export", &token)).await?;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"].as_str(), Some("POLICY_DENIED"));
    assert!(json["error"]["message"].as_str().unwrap().contains("riskscore"));

    Ok(())
}

#[tokio::test]
async fn test_missing_device_denied_everywhere() -> Result<(), anyhow::Error> {
    let token = mint_token("contractor", "unknown", 80);
    let response = test_router().oneshot(bearer_request("/resource", &token)).await?;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let json = body_json(response).await;
    assert!(json["error"]["message"].as_str().unwrap().contains("device"));

    Ok(())
}

#[tokio::test]
async fn test_unregistered_device_denied() -> Result<(), anyhow::Error> {
    let token = mint_token("analyst", "mac-999", 40);
    let response = test_router().oneshot(bearer_request("/resource", &token)).await?;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let json = body_json(response).await;
    assert!(json["error"]["message"].as_str().unwrap().contains("not trusted"));

    Ok(())
}

#[tokio::test]
async fn test_nested_sensitive_path_challenged() -> Result<(), anyhow::Error> {
    let token = mint_token("analyst", "mac-001", 40);
    let response = test_router()
        .oneshot(bearer_request("/admin/metrics", &token))
        .await?;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"].as_str(), Some("mfa_required"));

    Ok(())
}

#[tokio::test]
async fn test_nested_sensitive_path_allows_admin() -> Result<(), anyhow::Error> {
    let token = mint_token("admin", "mac-001", 40);
    let response = test_router()
        .oneshot(bearer_request("/admin/metrics", &token))
        .await?;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"].as_str(), Some("ok"));
    assert_eq!(json["path"].as_str(), Some("/admin/metrics"));

    Ok(())
}

#[tokio::test]
async fn test_outside_business_hours_denied() -> Result<(), anyhow::Error> {
    // Pick a one-hour window that cannot contain the current hour, even
    // if the clock rolls over mid-test.
    let hour = Utc::now().hour();
    let (start, end) = if hour <= 21 { (hour + 2, hour + 3) } else { (12, 13) };

    let token = mint_token("admin", "mac-001", 40);
    let response = router_with_hours(start, end)
        .oneshot(bearer_request("/resource", &token))
        .await?;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let json = body_json(response).await;
    assert!(
        json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("business hours")
    );

    Ok(())
}

#[tokio::test]
async fn test_missing_bearer_rejected() -> Result<(), anyhow::Error> {
    let response = test_router()
        .oneshot(Request::builder().uri("/resource").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"].as_str(), Some("MISSING_TOKEN"));

    Ok(())
}

#[tokio::test]
async fn test_empty_bearer_rejected() -> Result<(), anyhow::Error> {
    let response = test_router()
        .oneshot(
            Request::builder()
                .uri("/resource")
                .header(header::AUTHORIZATION, "Bearer   ")
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"].as_str(), Some("MALFORMED_TOKEN"));

    Ok(())
}

#[tokio::test]
async fn test_token_from_local_domain_rejected() -> Result<(), anyhow::Error> {
    // Correct shape, wrong trust domain. The gateway must not accept
    // tokens signed with the local service's key.
    let foreign = TrustDomain::new(SecretString::from(LOCAL_SECRET), Algorithm::HS256);
    let claims = AccessClaims::new(
        "tester".to_string(),
        "admin".to_string(),
        "mac-001".to_string(),
        0,
        Utc::now().timestamp(),
        1800,
    );
    let token = foreign.sign(&claims)?;

    let response = test_router().oneshot(bearer_request("/resource", &token)).await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"].as_str(), Some("INVALID_TOKEN"));
    assert!(json["error"]["message"].as_str().unwrap().contains("bad signature"));

    Ok(())
}

#[tokio::test]
async fn test_expired_token_rejected() -> Result<(), anyhow::Error> {
    let claims = AccessClaims::new(
        "tester".to_string(),
        "analyst".to_string(),
        "mac-001".to_string(),
        40,
        Utc::now().timestamp() - 7200,
        60,
    );
    let token = identity_domain().sign(&claims)?;

    let response = test_router().oneshot(bearer_request("/resource", &token)).await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert!(json["error"]["message"].as_str().unwrap().contains("expired"));

    Ok(())
}

#[tokio::test]
async fn test_health_and_metrics_are_public() -> Result<(), anyhow::Error> {
    let response = test_router()
        .oneshot(Request::builder().uri("/health").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let response = test_router()
        .oneshot(Request::builder().uri("/prometheus").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    Ok(())
}
