#![allow(dead_code)]

use std::sync::Arc;
use std::sync::OnceLock;

use auth::Authenticator;
use auth::JwtHandler;
use auth::KeyPair;
use axum::body::Body;
use axum::http::header::AUTHORIZATION;
use axum::http::header::CONTENT_TYPE;
use axum::http::Method;
use axum::http::Request;
use axum::http::StatusCode;
use axum::Router;
use chrono::DateTime;
use chrono::Utc;
use dash_api::domain::account::service::AccountService;
use dash_api::inbound::http::router::create_router;
use dash_api::outbound::repositories::InMemoryAccountRepository;
use dash_api::outbound::PasswordPool;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

/// Shared across every test in a binary; RSA-4096 generation is slow.
pub fn key_pair() -> &'static KeyPair {
    static KEY_PAIR: OnceLock<KeyPair> = OnceLock::new();
    KEY_PAIR.get_or_init(|| KeyPair::generate().expect("Failed to generate key pair"))
}

/// In-process application: the real router over an empty in-memory store.
pub struct TestApp {
    pub router: Router,
    pub jwt_handler: JwtHandler,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestApp {
    pub fn spawn() -> Self {
        let authenticator =
            Arc::new(Authenticator::new(key_pair()).expect("Failed to create authenticator"));
        let password_pool = PasswordPool::new(Arc::clone(&authenticator), 2);
        let account_service = Arc::new(AccountService::new(
            Arc::new(InMemoryAccountRepository::new()),
            password_pool,
        ));

        Self {
            router: create_router(account_service, authenticator),
            jwt_handler: JwtHandler::new(key_pair()).expect("Failed to create JWT handler"),
        }
    }

    pub async fn get(&self, uri: &str, authorization: Option<&str>) -> TestResponse {
        self.send(Method::GET, uri, authorization, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::POST, uri, None, Some(body)).await
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        authorization: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(value) = authorization {
            builder = builder.header(AUTHORIZATION, value);
        }

        let request = match body {
            Some(json) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Create a valid token for a fresh principal.
    pub fn create_test_token(&self) -> (String, Uuid) {
        let principal_id = Uuid::new_v4();
        let token = self
            .jwt_handler
            .issue(principal_id, "test@example.com", Some("Test User"))
            .expect("Failed to issue token");
        (token, principal_id)
    }

    /// Create a token issued at `issued_at`.
    pub fn create_token_issued_at(&self, issued_at: DateTime<Utc>) -> String {
        self.jwt_handler
            .issue_at(Uuid::new_v4(), "test@example.com", None, issued_at)
            .expect("Failed to issue token")
    }
}
