use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::ports::AccountRepository;

/// Process-local account store keyed by normalized email.
///
/// Stands in for the persistent store; contents are lost on restart.
#[derive(Default)]
pub struct InMemoryAccountRepository {
    accounts: RwLock<HashMap<EmailAddress, Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        let mut accounts = self
            .accounts
            .write()
            .map_err(|e| AccountError::Repository(e.to_string()))?;

        if accounts.contains_key(&account.email) {
            return Err(AccountError::EmailAlreadyExists(
                account.email.as_str().to_string(),
            ));
        }

        accounts.insert(account.email.clone(), account.clone());
        Ok(account)
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError> {
        let accounts = self
            .accounts
            .read()
            .map_err(|e| AccountError::Repository(e.to_string()))?;

        Ok(accounts.get(email).cloned())
    }
}
