use uuid::Uuid;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::keys::KeyError;
use crate::keys::KeyPair;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token issuance.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,
}

/// Identity a token is issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Errors
    /// * `KeyError` - The key pair could not be loaded into the token handler
    pub fn new(key_pair: &KeyPair) -> Result<Self, KeyError> {
        Ok(Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(key_pair)?,
        })
    }

    /// Hash a password for storage.
    ///
    /// CPU- and memory-heavy (64 MiB); run it off the async executor.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a password against a stored hash.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and issue an access token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is unreadable
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        principal: &Principal,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.generate_token(principal)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Issue an access token without password verification.
    ///
    /// Used right after registration, when the password was just set.
    pub fn generate_token(&self, principal: &Principal) -> Result<String, JwtError> {
        self.jwt_handler
            .issue(principal.id, &principal.email, principal.name.as_deref())
    }

    /// Validate an access token and return its claims.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.verify(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::test_key_pair;

    fn principal() -> Principal {
        Principal {
            id: Uuid::new_v4(),
            email: "test@example.com".to_string(),
            name: Some("Test User".to_string()),
        }
    }

    #[test]
    fn test_authenticate_success() {
        let authenticator = Authenticator::new(test_key_pair()).unwrap();

        // Hash a password
        let password = "my_password";
        let hash = authenticator
            .hash_password(password)
            .expect("Failed to hash password");

        // Authenticate with correct password
        let principal = principal();
        let result = authenticator
            .authenticate(password, &hash, &principal)
            .expect("Authentication failed");

        assert!(!result.access_token.is_empty());

        // Validate the token
        let claims = authenticator
            .validate_token(&result.access_token)
            .expect("Token validation failed");
        assert_eq!(claims.principal_id, principal.id);
        assert_eq!(claims.email, principal.email);
        assert_eq!(claims.name, principal.name);
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = Authenticator::new(test_key_pair()).unwrap();

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        // Try with wrong password
        let result = authenticator.authenticate("wrong_password", &hash, &principal());
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_corrupt_hash() {
        let authenticator = Authenticator::new(test_key_pair()).unwrap();

        let result = authenticator.authenticate("my_password", "corrupt", &principal());
        assert!(matches!(
            result,
            Err(AuthenticationError::PasswordError(PasswordError::InvalidHash))
        ));
    }

    #[test]
    fn test_validate_invalid_token() {
        let authenticator = Authenticator::new(test_key_pair()).unwrap();

        let result = authenticator.validate_token("invalid.token.here");
        assert!(matches!(result, Err(JwtError::InvalidToken)));
    }
}
