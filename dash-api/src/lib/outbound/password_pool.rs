use std::sync::Arc;

use auth::Authenticator;
use thiserror::Error;
use tokio::sync::Semaphore;

#[derive(Debug, Error)]
pub enum PasswordPoolError {
    #[error("Password pool is closed")]
    Closed,

    #[error("Password worker failed: {0}")]
    Worker(String),
}

/// Bounded executor for password hashing work.
///
/// Every Argon2id call holds 64 MiB, so the number of calls in flight is
/// capped by a semaphore and each call runs on the blocking thread pool.
/// Aggregate hashing memory never exceeds 64 MiB times `max_concurrent`.
///
/// The permit moves into the blocking task, so a caller that gives up
/// waiting does not free capacity until the work itself has finished.
#[derive(Clone)]
pub struct PasswordPool {
    authenticator: Arc<Authenticator>,
    semaphore: Arc<Semaphore>,
}

impl PasswordPool {
    pub fn new(authenticator: Arc<Authenticator>, max_concurrent: usize) -> Self {
        Self {
            authenticator,
            semaphore: Arc::new(Semaphore::new(max_concurrent.max(1))),
        }
    }

    /// Run `task` on the blocking pool once a slot is free.
    pub async fn run<T, F>(&self, task: F) -> Result<T, PasswordPoolError>
    where
        F: FnOnce(&Authenticator) -> T + Send + 'static,
        T: Send + 'static,
    {
        let permit = Arc::clone(&self.semaphore)
            .acquire_owned()
            .await
            .map_err(|_| PasswordPoolError::Closed)?;

        let authenticator = Arc::clone(&self.authenticator);
        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            task(&authenticator)
        })
        .await
        .map_err(|e| PasswordPoolError::Worker(e.to_string()))
    }

    pub fn available_permits(&self) -> usize {
        self.semaphore.available_permits()
    }

    pub fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }
}
