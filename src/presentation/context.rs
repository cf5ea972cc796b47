//! Wiring of stores around one API factory.

use std::sync::Arc;

use crate::application::services::{
    ApiClientConfig, ApiFactory, MessageCatalog, NotificationCenter, SharedSession,
};
use crate::application::stores::{ProjectResourceStore, SessionStore};
use crate::domain::ports::{HttpTransport, TokenStoragePort};

/// Everything a command needs: stores, notices and messages.
pub struct AppContext {
    /// Owner of the current API client.
    pub factory: ApiFactory,
    /// Session and authentication store.
    pub session: SessionStore,
    /// Investment items of a project.
    pub investments: ProjectResourceStore,
    /// Queued error notices.
    pub notifications: Arc<NotificationCenter>,
    /// Localized messages.
    pub catalog: MessageCatalog,
}

impl AppContext {
    /// Restores the persisted session and builds the stores on the shared
    /// client.
    pub async fn new(
        api_config: ApiClientConfig,
        transport: Arc<dyn HttpTransport>,
        storage: Arc<dyn TokenStoragePort>,
        catalog: MessageCatalog,
    ) -> Self {
        let shared = SharedSession::restore(storage.as_ref()).await;
        let notifications = Arc::new(NotificationCenter::default());
        let factory = ApiFactory::new(
            api_config,
            transport,
            shared.clone(),
            notifications.clone(),
        );

        let api = factory.use_api();
        let session = SessionStore::new(shared, storage, Arc::clone(&api));
        session.set_loading(false);
        let investments = ProjectResourceStore::investments(api);

        Self {
            factory,
            session,
            investments,
            notifications,
            catalog,
        }
    }
}
