use thiserror::Error;

/// Error type for JWT operations.
///
/// Verification failures collapse into `InvalidToken` except expiry, so
/// callers cannot tell a bad signature from a bad algorithm or bad structure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,
}
