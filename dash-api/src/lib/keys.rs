use auth::KeyError;
use auth::KeyPair;
use thiserror::Error;

use crate::config::AuthConfig;

#[derive(Debug, Error)]
pub enum KeyBootstrapError {
    #[error("Both private and public key PEM must be provided, or neither")]
    Incomplete,

    #[error(transparent)]
    Key(#[from] KeyError),
}

/// Build the process key pair from configuration.
///
/// Decodes the configured PEM pair when both halves are present and
/// generates a fresh pair when neither is. Runs once at startup; any
/// error should stop the service from serving.
pub fn load_key_pair(config: &AuthConfig) -> Result<KeyPair, KeyBootstrapError> {
    match (&config.private_key_pem, &config.public_key_pem) {
        (Some(private_pem), Some(public_pem)) => {
            let key_pair = KeyPair::from_encoded(private_pem, public_pem)?;
            tracing::info!(
                bits = key_pair.bits(),
                "Loaded signing key pair from configuration"
            );
            Ok(key_pair)
        }
        (None, None) => {
            tracing::warn!(
                "No signing key configured, generating one; tokens will not survive a restart"
            );
            let key_pair = KeyPair::generate()?;
            tracing::info!(bits = key_pair.bits(), "Generated signing key pair");
            Ok(key_pair)
        }
        _ => Err(KeyBootstrapError::Incomplete),
    }
}
