//! `reqwest`-backed HTTP transport.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, header};
use serde_json::Value;
use tracing::{debug, warn};

use crate::application::services::ApiClientConfig;
use crate::domain::errors::TransportError;
use crate::domain::http::{ApiResponse, HttpMethod, PreparedRequest};
use crate::domain::ports::HttpTransport;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// HTTP transport over a pooled `reqwest` client.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates transport with the given request timeout.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::other(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Creates transport matching the client configuration.
    ///
    /// No cookie store is installed, so credentials are never sent.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn from_config(config: &ApiClientConfig) -> Result<Self, TransportError> {
        Self::new(config.timeout())
    }

    fn method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    fn map_error(e: &reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::timeout("request timed out")
        } else if e.is_connect() {
            TransportError::connect(format!("failed to connect to API server: {e}"))
        } else {
            TransportError::other(e.to_string())
        }
    }

    fn decode_body(text: &str) -> Value {
        if text.trim().is_empty() {
            return Value::Null;
        }
        serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: PreparedRequest) -> Result<ApiResponse, TransportError> {
        let mut builder = self
            .client
            .request(Self::method(request.method), request.url.clone())
            .header(header::ACCEPT, "application/json");

        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            warn!(error = %e, url = %request.url, "Failed to reach API server");
            Self::map_error(&e)
        })?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| {
            warn!(error = %e, status, "Failed to read response body");
            Self::map_error(&e)
        })?;

        debug!(status, bytes = text.len(), "Response body received");

        Ok(ApiResponse::new(status, Self::decode_body(&text)))
    }
}
