mod http_transport_port;
mod notification_port;
mod token_storage_port;

pub use http_transport_port::HttpTransport;
pub use notification_port::NotificationSink;
pub use token_storage_port::{TOKEN_KEY, TokenStoragePort};
