//! Shared handle to the in-memory session.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::domain::entities::{AuthToken, Session, UserData};
use crate::domain::ports::TokenStoragePort;

/// Cloneable handle to the process session.
///
/// Readers always see the latest write; `is_logged_in` is recomputed from
/// the token on every call.
#[derive(Debug, Clone, Default)]
pub struct SharedSession {
    inner: Arc<RwLock<Session>>,
}

impl SharedSession {
    /// Wraps an existing session.
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self {
            inner: Arc::new(RwLock::new(session)),
        }
    }

    /// Builds the session from the persisted token.
    ///
    /// A storage failure is logged and yields a logged-out session.
    pub async fn restore(storage: &dyn TokenStoragePort) -> Self {
        let token = match storage.get_token().await {
            Ok(Some(token)) => {
                debug!(token = %token, "Restored persisted session token");
                Some(token)
            }
            Ok(None) => {
                debug!("No persisted session token");
                None
            }
            Err(e) => {
                warn!(error = %e, "Failed to read persisted session token");
                None
            }
        };

        Self::new(Session::with_token(token))
    }

    /// Whether a token is set.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.inner.read().is_logged_in()
    }

    /// Copy of the current token.
    #[must_use]
    pub fn token(&self) -> Option<AuthToken> {
        self.inner.read().token().cloned()
    }

    /// Copy of the current user record.
    #[must_use]
    pub fn user(&self) -> Option<UserData> {
        self.inner.read().user().cloned()
    }

    /// Current loading flag.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.inner.read().is_loading()
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.inner.read().clone()
    }

    /// Applies a mutation under the write lock.
    pub fn update<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        f(&mut self.inner.write())
    }
}
