//! HTTP transport port definition.

use async_trait::async_trait;

use crate::domain::errors::TransportError;
use crate::domain::http::{ApiResponse, PreparedRequest};

/// Port for sending a fully resolved request.
///
/// Non-2xx responses are returned as `Ok`; classification happens in the
/// API client.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends request and returns the raw response.
    async fn send(&self, request: PreparedRequest) -> Result<ApiResponse, TransportError>;
}
