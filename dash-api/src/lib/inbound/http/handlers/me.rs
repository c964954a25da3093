use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedIdentity;

pub async fn me(identity: AuthenticatedIdentity) -> ApiSuccess<MeResponseData> {
    ApiSuccess::new(StatusCode::OK, (&identity).into())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeResponseData {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
}

impl From<&AuthenticatedIdentity> for MeResponseData {
    fn from(identity: &AuthenticatedIdentity) -> Self {
        Self {
            id: identity.principal_id().to_string(),
            email: identity.email().to_string(),
            name: identity.name().map(str::to_string),
        }
    }
}
