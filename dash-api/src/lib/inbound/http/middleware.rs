use auth::Claims;
use auth::JwtError;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::middleware;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use axum::Router;
use serde_json::json;
use uuid::Uuid;

use crate::inbound::http::router::AppState;

/// Identity of the caller, derived from verified token claims.
///
/// Inserted into request extensions by [`authenticate`]; handlers take it
/// as an extractor argument and never look at the token themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    principal_id: Uuid,
    email: String,
    name: Option<String>,
}

impl AuthenticatedIdentity {
    pub fn principal_id(&self) -> Uuid {
        self.principal_id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl From<Claims> for AuthenticatedIdentity {
    fn from(claims: Claims) -> Self {
        Self {
            principal_id: claims.principal_id,
            email: claims.email,
            name: claims.name,
        }
    }
}

/// Reasons a request is turned away at the authentication boundary.
///
/// Only expiry is distinguishable from other token failures, so clients
/// know when refreshing credentials is worth trying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRejection {
    MissingHeader,
    InvalidHeaderFormat,
    ExpiredToken,
    InvalidToken,
    Unauthenticated,
}

impl AuthRejection {
    pub fn message(&self) -> &'static str {
        match self {
            AuthRejection::MissingHeader => "authorization header required",
            AuthRejection::InvalidHeaderFormat => "invalid authorization header format",
            AuthRejection::ExpiredToken => "token has expired",
            AuthRejection::InvalidToken => "invalid token",
            AuthRejection::Unauthenticated => "unauthorized",
        }
    }
}

impl From<JwtError> for AuthRejection {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::TokenExpired => AuthRejection::ExpiredToken,
            _ => AuthRejection::InvalidToken,
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": self.message()
            })),
        )
            .into_response()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedIdentity
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedIdentity>()
            .cloned()
            .ok_or(AuthRejection::Unauthenticated)
    }
}

/// Middleware that verifies the bearer token and adds the caller's identity
/// to request extensions.
///
/// Verification runs on every request; results are never cached.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthRejection> {
    let token = extract_bearer_token(&req)?;

    let claims = state.authenticator.validate_token(token).map_err(|e| {
        tracing::warn!(error = %e, "JWT validation failed");
        AuthRejection::from(e)
    })?;

    req.extensions_mut()
        .insert(AuthenticatedIdentity::from(claims));

    Ok(next.run(req).await)
}

/// Put every route of `router` behind [`authenticate`].
pub fn require_auth(state: AppState, router: Router<AppState>) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(state, authenticate))
}

fn extract_bearer_token(req: &Request) -> Result<&str, AuthRejection> {
    let auth_header = req
        .headers()
        .get(AUTHORIZATION)
        .filter(|value| !value.is_empty())
        .ok_or(AuthRejection::MissingHeader)?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AuthRejection::InvalidHeaderFormat)?;

    match auth_str.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        _ => Err(AuthRejection::InvalidHeaderFormat),
    }
}
