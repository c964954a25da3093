use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    /// Stored hash is empty, malformed or uses an unknown algorithm.
    #[error("Invalid password hash format")]
    InvalidHash,

    /// Stored hash is argon2id but was derived with a version this hasher cannot reproduce.
    #[error("Incompatible argon2 version")]
    IncompatibleVersion,

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}
