//! Domain layer with core entities, request values and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// HTTP request and response values.
pub mod http;
/// Port definitions.
pub mod ports;

pub use entities::{AuthToken, ItemId, ProjectId, Session, UserData};
pub use errors::{ApiError, StorageError, TransportError};
pub use http::{ApiRequest, ApiResponse, Headers, HttpMethod, PreparedRequest};
pub use ports::{HttpTransport, NotificationSink, TokenStoragePort};
