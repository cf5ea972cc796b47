/// API client and its connection settings.
pub mod api_client;
/// Shared client ownership.
pub mod api_factory;
/// Request and response hooks.
pub mod interceptors;
/// Localized messages.
pub mod message_catalog;
/// Error notice queue.
pub mod notification_center;
mod shared_session;

pub use api_client::{ApiClient, ApiClientConfig};
pub use api_factory::ApiFactory;
pub use interceptors::{
    BearerAuthInterceptor, ErrorNotificationInterceptor, RequestInterceptor, ResponseInterceptor,
};
pub use message_catalog::{DEFAULT_LOCALE, FALLBACK_LOCALE, MessageCatalog};
pub use notification_center::NotificationCenter;
pub use shared_session::SharedSession;
