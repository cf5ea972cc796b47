//! Token persistence in the OS keyring.
//!
//! The token lives in one entry, service `investdesk` and user `token`. An
//! entry holding the empty string is treated like a missing one.

use async_trait::async_trait;
use keyring::Entry;
use tracing::{debug, warn};

use crate::domain::entities::AuthToken;
use crate::domain::errors::StorageError;
use crate::domain::ports::{TOKEN_KEY, TokenStoragePort};

const KEYRING_SERVICE: &str = "investdesk";

/// [`TokenStoragePort`] over a single keyring entry.
pub struct KeyringTokenStorage {
    entry: Entry,
}

impl KeyringTokenStorage {
    /// Opens the session entry.
    ///
    /// # Errors
    /// Returns error if the platform keyring cannot be reached.
    pub fn new() -> Result<Self, StorageError> {
        Self::for_service(KEYRING_SERVICE)
    }

    fn for_service(service: &str) -> Result<Self, StorageError> {
        let entry = Entry::new(service, TOKEN_KEY)
            .map_err(|e| StorageError::AccessFailed(format!("failed to open keyring entry: {e}")))?;
        Ok(Self { entry })
    }
}

fn token_from_secret(result: keyring::Result<String>) -> Result<Option<AuthToken>, StorageError> {
    match result {
        Ok(secret) => {
            let token = AuthToken::new(secret);
            debug!(present = token.is_some(), "Read keyring entry");
            Ok(token)
        }
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => {
            warn!(error = %e, "Failed to read token from keyring");
            Err(StorageError::RetrievalFailed(e.to_string()))
        }
    }
}

#[async_trait]
impl TokenStoragePort for KeyringTokenStorage {
    async fn get_token(&self) -> Result<Option<AuthToken>, StorageError> {
        token_from_secret(self.entry.get_password())
    }

    async fn store_token(&self, token: &AuthToken) -> Result<(), StorageError> {
        self.entry.set_password(token.as_str()).map_err(|e| {
            warn!(error = %e, "Failed to write token to keyring");
            StorageError::StorageFailed(e.to_string())
        })
    }

    async fn delete_token(&self) -> Result<(), StorageError> {
        match self.entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => {
                warn!(error = %e, "Failed to delete token from keyring");
                Err(StorageError::DeletionFailed(e.to_string()))
            }
        }
    }
}
