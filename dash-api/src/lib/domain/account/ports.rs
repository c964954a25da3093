use async_trait::async_trait;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::models::Session;

/// Port for account domain service operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account and log it in.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Password` - Hashing failed
    /// * `Token` - Token generation failed
    async fn register(&self, command: RegisterCommand) -> Result<Session, AccountError>;

    /// Verify credentials and issue an access token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `Token` - Token generation failed
    async fn login(&self, command: LoginCommand) -> Result<Session, AccountError>;
}

/// Port for account persistence.
///
/// Owns the stored password hash; the service never interprets it beyond
/// handing it back to the hasher.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist a new account.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Another account uses this email
    async fn create(&self, account: Account) -> Result<Account, AccountError>;

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError>;
}
