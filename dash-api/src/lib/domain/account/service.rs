use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use chrono::Utc;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::models::Session;
use crate::domain::account::ports::AccountRepository;
use crate::domain::account::ports::AccountServicePort;
use crate::outbound::password_pool::PasswordPool;
use crate::outbound::password_pool::PasswordPoolError;

/// Stored hash with the current cost parameters and no matching password.
///
/// Login verifies against it when the email is unknown, so the response
/// takes as long as a wrong password for a registered account.
pub(crate) const DUMMY_PASSWORD_HASH: &str =
    "$argon2id$v=19$m=65536,t=3,p=4$AAAAAAAAAAAAAAAAAAAAAA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Domain service implementation for account operations.
///
/// Hashing and verification go through the bounded [`PasswordPool`];
/// token issuance uses the same authenticator.
pub struct AccountService<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
    password_pool: PasswordPool,
}

impl<AR> AccountService<AR>
where
    AR: AccountRepository,
{
    pub fn new(repository: Arc<AR>, password_pool: PasswordPool) -> Self {
        Self {
            repository,
            password_pool,
        }
    }

    fn session(&self, account: Account, access_token: String) -> Session {
        Session {
            account,
            access_token,
            expires_in: auth::Claims::lifetime().num_seconds(),
        }
    }
}

impl From<PasswordPoolError> for AccountError {
    fn from(err: PasswordPoolError) -> Self {
        AccountError::Unknown(err.to_string())
    }
}

#[async_trait]
impl<AR> AccountServicePort for AccountService<AR>
where
    AR: AccountRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<Session, AccountError> {
        let RegisterCommand {
            email,
            password,
            name,
        } = command;

        let password_hash = self
            .password_pool
            .run(move |authenticator| authenticator.hash_password(password.as_str()))
            .await?
            .map_err(|e| AccountError::Password(e.to_string()))?;

        let account = Account {
            id: AccountId::new(),
            email,
            name: name.filter(|n| !n.is_empty()),
            password_hash,
            created_at: Utc::now(),
        };

        let account = self.repository.create(account).await?;

        let access_token = self
            .password_pool
            .authenticator()
            .generate_token(&account.principal())
            .map_err(|e| AccountError::Token(e.to_string()))?;

        tracing::info!(account_id = %account.id, "Account registered");

        Ok(self.session(account, access_token))
    }

    async fn login(&self, command: LoginCommand) -> Result<Session, AccountError> {
        let Some(account) = self.repository.find_by_email(&command.email).await? else {
            let password = command.password;
            let _ = self
                .password_pool
                .run(move |authenticator| {
                    authenticator.verify_password(&password, DUMMY_PASSWORD_HASH)
                })
                .await?;
            return Err(AccountError::InvalidCredentials);
        };

        let principal = account.principal();
        let password_hash = account.password_hash.clone();
        let password = command.password;

        let result = self
            .password_pool
            .run(move |authenticator| {
                authenticator.authenticate(&password, &password_hash, &principal)
            })
            .await?;

        match result {
            Ok(authenticated) => Ok(self.session(account, authenticated.access_token)),
            Err(AuthenticationError::InvalidCredentials) => Err(AccountError::InvalidCredentials),
            Err(AuthenticationError::PasswordError(e)) => {
                tracing::warn!(
                    account_id = %account.id,
                    error = %e,
                    "Stored password hash unreadable"
                );
                Err(AccountError::InvalidCredentials)
            }
            Err(AuthenticationError::JwtError(e)) => Err(AccountError::Token(e.to_string())),
        }
    }
}
