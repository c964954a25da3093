use thiserror::Error;

/// Error type for key material operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// Key generation failed (entropy source exhausted). Not recoverable.
    #[error("Failed to generate key pair: {0}")]
    GenerationFailed(String),

    #[error("Failed to decode {0} key")]
    DecodingFailed(&'static str),

    #[error("Failed to encode {0} key")]
    EncodingFailed(&'static str),

    #[error("Private key does not match public key")]
    Mismatch,

    #[error("Key pair has no private key")]
    MissingPrivateKey,
}
