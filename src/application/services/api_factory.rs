//! Owner of the shared API client.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockUpgradableReadGuard};
use tracing::info;

use super::api_client::{ApiClient, ApiClientConfig};
use super::interceptors::{BearerAuthInterceptor, ErrorNotificationInterceptor};
use super::SharedSession;
use crate::domain::ports::{HttpTransport, NotificationSink};

/// Builds and shares the process API client.
///
/// Clients handed out earlier stay usable after [`ApiFactory::create_api`]
/// replaces the current one; they keep their own configuration.
pub struct ApiFactory {
    config: ApiClientConfig,
    transport: Arc<dyn HttpTransport>,
    session: SharedSession,
    notifications: Arc<dyn NotificationSink>,
    current: RwLock<Option<Arc<ApiClient>>>,
}

impl ApiFactory {
    /// Creates the factory; no client is built until first use.
    #[must_use]
    pub fn new(
        config: ApiClientConfig,
        transport: Arc<dyn HttpTransport>,
        session: SharedSession,
        notifications: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            config,
            transport,
            session,
            notifications,
            current: RwLock::new(None),
        }
    }

    /// Builds a new client and makes it the shared one.
    pub fn create_api(&self) -> Arc<ApiClient> {
        let client = self.build();
        *self.current.write() = Some(Arc::clone(&client));
        client
    }

    /// Returns the shared client, building it on first use.
    pub fn use_api(&self) -> Arc<ApiClient> {
        let current = self.current.upgradable_read();
        if let Some(client) = current.as_ref() {
            return Arc::clone(client);
        }

        let mut current = RwLockUpgradableReadGuard::upgrade(current);
        let client = self.build();
        *current = Some(Arc::clone(&client));
        client
    }

    /// Session read by the bearer interceptor.
    #[must_use]
    pub const fn session(&self) -> &SharedSession {
        &self.session
    }

    fn build(&self) -> Arc<ApiClient> {
        info!(base_url = %self.config.base_url(), "Creating API client");

        Arc::new(
            ApiClient::new(self.config.clone(), Arc::clone(&self.transport))
                .with_request_interceptor(Arc::new(BearerAuthInterceptor::new(
                    self.session.clone(),
                )))
                .with_response_interceptor(Arc::new(ErrorNotificationInterceptor::new(
                    Arc::clone(&self.notifications),
                ))),
        )
    }
}
