mod common;

use auth::JwtHandler;
use auth::KeyPair;
use axum::http::StatusCode;
use chrono::Duration;
use chrono::Utc;
use common::TestApp;

#[tokio::test]
async fn test_missing_authorization_header() {
    let app = TestApp::spawn();

    let response = app.get("/api/auth/me", None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "authorization header required");
}

#[tokio::test]
async fn test_wrong_scheme() {
    let app = TestApp::spawn();

    let response = app.get("/api/auth/me", Some("Token xyz")).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "invalid authorization header format");
}

#[tokio::test]
async fn test_bearer_without_token() {
    let app = TestApp::spawn();

    let response = app.get("/api/auth/me", Some("Bearer")).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "invalid authorization header format");
}

#[tokio::test]
async fn test_expired_token() {
    let app = TestApp::spawn();
    let token = app.create_token_issued_at(Utc::now() - Duration::minutes(30));

    let response = app
        .get("/api/auth/me", Some(&format!("Bearer {}", token)))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "token has expired");
}

#[tokio::test]
async fn test_garbage_token() {
    let app = TestApp::spawn();

    let response = app
        .get("/api/auth/me", Some("Bearer invalid.token.here"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "invalid token");
}

#[tokio::test]
async fn test_token_signed_by_other_key() {
    let app = TestApp::spawn();
    let other = JwtHandler::new(&KeyPair::generate().unwrap()).unwrap();
    let token = other
        .issue(uuid::Uuid::new_v4(), "test@example.com", None)
        .unwrap();

    let response = app
        .get("/api/auth/me", Some(&format!("Bearer {}", token)))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "invalid token");
}

#[tokio::test]
async fn test_valid_token_exposes_identity() {
    let app = TestApp::spawn();
    let (token, principal_id) = app.create_test_token();

    let response = app
        .get("/api/auth/me", Some(&format!("Bearer {}", token)))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["id"], principal_id.to_string());
    assert_eq!(response.body["data"]["email"], "test@example.com");
    assert_eq!(response.body["data"]["name"], "Test User");
}

#[tokio::test]
async fn test_scheme_is_case_insensitive() {
    let app = TestApp::spawn();
    let (token, principal_id) = app.create_test_token();

    let response = app
        .get("/api/auth/me", Some(&format!("bearer {}", token)))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["id"], principal_id.to_string());
}

#[tokio::test]
async fn test_public_routes_skip_authentication() {
    let app = TestApp::spawn();

    // No Authorization header; rejected for credentials, not for the header.
    let response = app
        .post(
            "/api/auth/login",
            serde_json::json!({ "email": "nobody@example.com", "password": "secret" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["data"]["message"], "invalid credentials");
}
