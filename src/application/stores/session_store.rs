//! Session and authentication store.

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::application::dto::{LoginCredentials, LoginOutcome};
use crate::application::services::{ApiClient, SharedSession};
use crate::domain::entities::{AuthToken, UserData};
use crate::domain::errors::ApiError;
use crate::domain::http::ApiResponse;
use crate::domain::ports::TokenStoragePort;

const LOGIN_PATH: &str = "/api/v1/login";

/// Login, logout and session mutators with token persistence.
#[derive(Clone)]
pub struct SessionStore {
    session: SharedSession,
    storage: Arc<dyn TokenStoragePort>,
    api: Arc<ApiClient>,
}

impl SessionStore {
    /// Creates the store on an already restored session.
    #[must_use]
    pub fn new(
        session: SharedSession,
        storage: Arc<dyn TokenStoragePort>,
        api: Arc<ApiClient>,
    ) -> Self {
        Self {
            session,
            storage,
            api,
        }
    }

    /// Sends credentials to the login endpoint.
    ///
    /// The session is not modified; apply the response with
    /// [`SessionStore::set_token`] and [`SessionStore::set_user`], or
    /// [`SessionStore::apply_login`].
    ///
    /// # Errors
    /// Returns whatever the API client reports.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<ApiResponse, ApiError> {
        debug!(login = %credentials.login, "Attempting login");

        let body = serde_json::to_value(credentials)
            .map_err(|e| ApiError::invalid_request(format!("failed to encode credentials: {e}")))?;

        self.api.post(LOGIN_PATH, body).await
    }

    /// Sets the token in memory and in storage. An empty value clears it.
    ///
    /// Storage failures are logged; the in-memory value is set regardless.
    pub async fn set_token(&self, value: impl Into<String>) {
        let token = AuthToken::new(value);
        self.session
            .update(|session| session.replace_token(token.clone()));
        self.persist(token.as_ref()).await;
    }

    /// Replaces the user record.
    pub fn set_user(&self, user: Option<UserData>) {
        self.session.update(|session| session.set_user(user));
    }

    /// Sets the loading flag.
    pub fn set_loading(&self, loading: bool) {
        self.session.update(|session| session.set_loading(loading));
    }

    /// Applies a login outcome: token when present, then user.
    pub async fn apply_login(&self, outcome: LoginOutcome) {
        if let Some(token) = outcome.token {
            self.set_token(token).await;
        }
        self.set_user(outcome.user);
        info!(logged_in = self.is_logged_in(), "Login applied to session");
    }

    /// Clears the token in memory and in storage. The user record is kept.
    pub async fn logout(&self) {
        self.session.update(|session| session.clear_token());
        self.persist(None).await;
        info!("Logged out");
    }

    /// Whether a token is set.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.session.is_logged_in()
    }

    /// Current token.
    #[must_use]
    pub fn token(&self) -> Option<AuthToken> {
        self.session.token()
    }

    /// Current user record.
    #[must_use]
    pub fn user(&self) -> Option<UserData> {
        self.session.user()
    }

    /// Current loading flag.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.session.is_loading()
    }

    /// Shared session handle.
    #[must_use]
    pub const fn session(&self) -> &SharedSession {
        &self.session
    }

    async fn persist(&self, token: Option<&AuthToken>) {
        let result = match token {
            Some(token) => self.storage.store_token(token).await,
            None => self.storage.delete_token().await,
        };

        match result {
            Ok(()) => debug!(present = token.is_some(), "Session token persisted"),
            Err(e) => error!(error = %e, "Failed to persist session token"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::ApiClientConfig;
    use crate::domain::http::HttpMethod;
    use crate::domain::ports::mocks::{MockTokenStorage, MockTransport};
    use serde_json::json;

    struct Fixture {
        store: SessionStore,
        storage: Arc<MockTokenStorage>,
        transport: Arc<MockTransport>,
    }

    fn fixture() -> Fixture {
        let transport = Arc::new(MockTransport::new());
        let storage = Arc::new(MockTokenStorage::new());
        let api = Arc::new(ApiClient::new(
            ApiClientConfig::parse("https://api.example.com").unwrap(),
            transport.clone(),
        ));
        let store = SessionStore::new(SharedSession::default(), storage.clone(), api);
        Fixture {
            store,
            storage,
            transport,
        }
    }

    #[tokio::test]
    async fn test_set_token_then_logout() {
        let f = fixture();

        for token in ["a", "second-token", " "] {
            f.store.set_token(token).await;
            assert!(f.store.is_logged_in());
            assert_eq!(f.storage.stored().await.as_deref(), Some(token));

            f.store.logout().await;
            assert!(!f.store.is_logged_in());
            assert_eq!(f.storage.stored().await, None);
        }
    }

    #[tokio::test]
    async fn test_empty_token_clears_session() {
        let f = fixture();
        f.store.set_token("abc").await;

        f.store.set_token("").await;

        assert!(!f.store.is_logged_in());
        assert_eq!(f.storage.stored().await, None);
    }

    #[tokio::test]
    async fn test_storage_failure_does_not_block_setter() {
        let f = fixture();
        f.storage.set_fail_writes(true);

        f.store.set_token("abc").await;

        assert!(f.store.is_logged_in());
        assert_eq!(f.storage.stored().await, None);
    }

    #[tokio::test]
    async fn test_logout_keeps_user_record() {
        let f = fixture();
        f.store.set_token("abc").await;
        f.store.set_user(json!({"id": 5}).as_object().cloned());

        f.store.logout().await;

        assert!(!f.store.is_logged_in());
        assert!(f.store.user().is_some());
    }

    #[tokio::test]
    async fn test_login_posts_credentials_without_touching_token() {
        let f = fixture();
        f.transport.respond(200, json!({"token": "new"}));

        let response = f
            .store
            .login(&LoginCredentials::new("olena", "pw"))
            .await
            .unwrap();

        let sent = f.transport.last_request().unwrap();
        assert_eq!(sent.method, HttpMethod::Post);
        assert_eq!(sent.url.path(), "/api/v1/login");
        assert_eq!(sent.body, Some(json!({"login": "olena", "password": "pw"})));
        assert_eq!(response.body, json!({"token": "new"}));
        assert!(!f.store.is_logged_in());
    }

    #[tokio::test]
    async fn test_login_failure_propagates() {
        let f = fixture();
        f.transport.respond(401, json!({"message": "bad credentials"}));

        let error = f
            .store
            .login(&LoginCredentials::new("olena", "wrong"))
            .await
            .unwrap_err();

        assert!(error.is_unauthorized());
    }

    #[tokio::test]
    async fn test_apply_login_sets_token_and_user() {
        let f = fixture();
        let outcome = LoginOutcome::from_response(&ApiResponse::new(
            200,
            json!({"token": "abc", "user": {"name": "Olena"}}),
        ));

        f.store.apply_login(outcome).await;

        assert_eq!(f.store.token().map(|t| t.as_str().to_string()), Some("abc".to_string()));
        assert!(f.store.user().is_some());
    }

    #[test]
    fn test_setters_update_flags() {
        let f = fixture();
        assert!(f.store.is_loading());

        f.store.set_loading(false);

        assert!(!f.store.is_loading());
    }
}
