use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Issuer written into every access token.
pub const TOKEN_ISSUER: &str = "dash";

/// Access token lifetime in minutes.
pub const ACCESS_TOKEN_TTL_MINUTES: i64 = 15;

/// Access token claims.
///
/// The principal id travels as the RFC 7519 `sub` claim, so the subject and
/// the principal id can never disagree: a `sub` that is not a UUID fails to
/// deserialize.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (principal identifier)
    #[serde(rename = "sub")]
    pub principal_id: Uuid,

    pub email: String,

    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Issuer
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create access token claims valid from `now` for the fixed token lifetime.
    ///
    /// An empty `name` is treated as absent.
    pub fn for_principal(
        principal_id: Uuid,
        email: impl Into<String>,
        name: Option<&str>,
        now: DateTime<Utc>,
    ) -> Self {
        let expiration = now + Self::lifetime();

        Self {
            principal_id,
            email: email.into(),
            name: name.filter(|n| !n.is_empty()).map(str::to_string),
            iss: TOKEN_ISSUER.to_string(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    pub fn lifetime() -> Duration {
        Duration::minutes(ACCESS_TOKEN_TTL_MINUTES)
    }

    /// Subject as it appears on the wire.
    pub fn subject(&self) -> String {
        self.principal_id.to_string()
    }

    /// Check if token is expired. A token is expired at its `exp` instant.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }

    /// Check if token is not yet valid.
    pub fn is_premature(&self, current_timestamp: i64) -> bool {
        current_timestamp < self.nbf
    }
}
