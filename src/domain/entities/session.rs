//! Client-side authentication state.

use serde_json::{Map, Value};

use super::AuthToken;

/// Opaque user record returned by the server.
pub type UserData = Map<String, Value>;

/// Current authentication state: token, user and loading flag.
#[derive(Debug, Clone)]
pub struct Session {
    token: Option<AuthToken>,
    user: Option<UserData>,
    loading: bool,
}

impl Session {
    /// Creates a logged-out session.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            token: None,
            user: None,
            loading: true,
        }
    }

    /// Creates a session holding a previously persisted token.
    #[must_use]
    pub fn with_token(token: Option<AuthToken>) -> Self {
        Self {
            token,
            ..Self::new()
        }
    }

    /// Whether a non-empty token is present.
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    #[must_use]
    pub const fn token(&self) -> Option<&AuthToken> {
        self.token.as_ref()
    }

    #[must_use]
    pub const fn user(&self) -> Option<&UserData> {
        self.user.as_ref()
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Replaces the token. An empty string clears it.
    pub fn set_token(&mut self, value: impl Into<String>) {
        self.token = AuthToken::new(value);
    }

    pub fn replace_token(&mut self, token: Option<AuthToken>) {
        self.token = token;
    }

    pub fn set_user(&mut self, user: Option<UserData>) {
        self.user = user;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Clears the token. The user record is kept.
    pub fn clear_token(&mut self) {
        self.token = None;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
