//! Interceptor-aware API client.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::debug;
use url::Url;

use super::interceptors::{RequestInterceptor, ResponseInterceptor};
use crate::domain::errors::ApiError;
use crate::domain::http::{ApiRequest, ApiResponse, PreparedRequest};
use crate::domain::ports::HttpTransport;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings shared by every request of a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiClientConfig {
    base_url: Url,
    with_credentials: bool,
    timeout: Duration,
}

impl ApiClientConfig {
    /// Creates config with credentials disabled and the default timeout.
    #[must_use]
    pub const fn new(base_url: Url) -> Self {
        Self {
            base_url,
            with_credentials: false,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Parses the base URL.
    ///
    /// # Errors
    /// Returns error if the value is not an absolute URL.
    pub fn parse(base_url: &str) -> Result<Self, ApiError> {
        let url = Url::parse(base_url.trim()).map_err(|e| {
            ApiError::invalid_request(format!("invalid base URL '{base_url}': {e}"))
        })?;
        Ok(Self::new(url))
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL every request path is appended to.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Whether cookies and other credentials are sent. Always `false`.
    #[must_use]
    pub const fn with_credentials(&self) -> bool {
        self.with_credentials
    }

    /// Request timeout handed to the transport.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Resolves a request path and query against the base URL.
    ///
    /// The path is appended to the base path, so a base of
    /// `https://host/backend/` keeps its `/backend` prefix.
    ///
    /// # Errors
    /// Returns error if the joined value is not a valid URL.
    pub fn resolve(&self, request: &ApiRequest) -> Result<Url, ApiError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = request.path.trim_start_matches('/');
        let joined = if path.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{path}")
        };

        let mut url = Url::parse(&joined)
            .map_err(|e| ApiError::invalid_request(format!("invalid URL '{joined}': {e}")))?;

        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(
                request
                    .query
                    .iter()
                    .map(|(name, value)| (name.as_str(), value.as_str())),
            );
        }

        Ok(url)
    }
}

/// HTTP client that runs requests through its interceptor chains.
pub struct ApiClient {
    config: ApiClientConfig,
    transport: Arc<dyn HttpTransport>,
    request_interceptors: Vec<Arc<dyn RequestInterceptor>>,
    response_interceptors: Vec<Arc<dyn ResponseInterceptor>>,
}

impl ApiClient {
    /// Creates client without interceptors.
    #[must_use]
    pub fn new(config: ApiClientConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            config,
            transport,
            request_interceptors: Vec::new(),
            response_interceptors: Vec::new(),
        }
    }

    /// Appends a request interceptor. Interceptors run in insertion order.
    #[must_use]
    pub fn with_request_interceptor(mut self, interceptor: Arc<dyn RequestInterceptor>) -> Self {
        self.request_interceptors.push(interceptor);
        self
    }

    /// Appends a response interceptor. Interceptors run in insertion order.
    #[must_use]
    pub fn with_response_interceptor(
        mut self,
        interceptor: Arc<dyn ResponseInterceptor>,
    ) -> Self {
        self.response_interceptors.push(interceptor);
        self
    }

    /// Settings this client was built with.
    #[must_use]
    pub const fn config(&self) -> &ApiClientConfig {
        &self.config
    }

    /// Sends a request through the interceptors.
    ///
    /// # Errors
    /// Returns the error produced by the response interceptors for non-2xx
    /// statuses, transport failures and unresolvable URLs.
    pub async fn request(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let request = self
            .request_interceptors
            .iter()
            .fold(request, |request, interceptor| interceptor.on_request(request));

        match self.dispatch(request).await {
            Ok(response) => Ok(self
                .response_interceptors
                .iter()
                .fold(response, |response, interceptor| {
                    interceptor.on_response(response)
                })),
            Err(error) => Err(self
                .response_interceptors
                .iter()
                .fold(error, |error, interceptor| interceptor.on_error(error))),
        }
    }

    async fn dispatch(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = self.config.resolve(&request)?;

        debug!(method = %request.method, url = %url, "Sending API request");

        let prepared = PreparedRequest {
            method: request.method,
            url,
            headers: request.headers,
            body: request.body,
        };

        let response = self.transport.send(prepared).await?;

        debug!(status = response.status, "Received API response");

        if response.is_success() {
            Ok(response)
        } else {
            Err(ApiError::from_status(response.status, response.body))
        }
    }

    /// Sends GET with query parameters.
    ///
    /// # Errors
    /// See [`ApiClient::request`].
    pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<ApiResponse, ApiError> {
        let request = query
            .iter()
            .fold(ApiRequest::get(path), |request, (name, value)| {
                request.with_query(*name, *value)
            });
        self.request(request).await
    }

    /// Sends POST with a JSON body.
    ///
    /// # Errors
    /// See [`ApiClient::request`].
    pub async fn post(&self, path: &str, body: Value) -> Result<ApiResponse, ApiError> {
        self.request(ApiRequest::post(path, body)).await
    }

    /// Sends PUT with a JSON body.
    ///
    /// # Errors
    /// See [`ApiClient::request`].
    pub async fn put(&self, path: &str, body: Value) -> Result<ApiResponse, ApiError> {
        self.request(ApiRequest::put(path, body)).await
    }

    /// Sends DELETE.
    ///
    /// # Errors
    /// See [`ApiClient::request`].
    pub async fn delete(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.request(ApiRequest::delete(path)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::TransportError;
    use crate::domain::http::HttpMethod;
    use crate::domain::ports::mocks::MockTransport;
    use parking_lot::Mutex;
    use serde_json::json;

    fn config(base: &str) -> ApiClientConfig {
        ApiClientConfig::parse(base).unwrap()
    }

    #[test]
    fn test_config_defaults() {
        let config = config("https://api.example.com");
        assert!(!config.with_credentials());
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_parse_rejects_relative_url() {
        assert!(matches!(
            ApiClientConfig::parse("/api"),
            Err(ApiError::InvalidRequest { .. })
        ));
    }

    #[test]
    fn test_resolve_keeps_base_path() {
        let config = config("https://host.example/backend/");
        let url = config
            .resolve(&ApiRequest::get("/api/v1/login"))
            .unwrap();
        assert_eq!(url.as_str(), "https://host.example/backend/api/v1/login");
    }

    #[test]
    fn test_resolve_appends_query() {
        let config = config("https://host.example");
        let request = ApiRequest::get("api/v1/project/p1/te-investment-item")
            .with_query("project_id", "p1");

        let url = config.resolve(&request).unwrap();

        assert_eq!(url.path(), "/api/v1/project/p1/te-investment-item");
        assert_eq!(url.query(), Some("project_id=p1"));
    }

    #[tokio::test]
    async fn test_success_passes_through_unchanged() {
        let transport = Arc::new(MockTransport::new());
        transport.respond(201, json!({"id": 1}));
        let client = ApiClient::new(config("https://h.example"), transport.clone());

        let response = client.post("/items", json!({"a": 1})).await.unwrap();

        assert_eq!(response, ApiResponse::new(201, json!({"id": 1})));
        let sent = transport.last_request().unwrap();
        assert_eq!(sent.method, HttpMethod::Post);
        assert_eq!(sent.body, Some(json!({"a": 1})));
    }

    #[tokio::test]
    async fn test_non_success_status_becomes_error() {
        let transport = Arc::new(MockTransport::new());
        transport.respond(422, json!({"errors": ["name"]}));
        let client = ApiClient::new(config("https://h.example"), transport);

        let error = client.delete("/items/1").await.unwrap_err();

        assert_eq!(error.status(), Some(422));
        assert_eq!(error.body(), Some(&json!({"errors": ["name"]})));
    }

    #[tokio::test]
    async fn test_transport_failure_becomes_error() {
        let transport = Arc::new(MockTransport::new());
        transport.fail(TransportError::connect("connection refused"));
        let client = ApiClient::new(config("https://h.example"), transport);

        let error = client.get("/items", &[]).await.unwrap_err();

        assert!(error.is_network_error());
    }

    struct Tagging(&'static str);

    impl RequestInterceptor for Tagging {
        fn on_request(&self, request: ApiRequest) -> ApiRequest {
            let previous = request.headers.get("X-Chain").unwrap_or("").to_string();
            request.with_header("X-Chain", format!("{previous}{}", self.0))
        }
    }

    #[derive(Default)]
    struct Recording {
        seen: Mutex<Vec<String>>,
    }

    impl ResponseInterceptor for Recording {
        fn on_error(&self, error: ApiError) -> ApiError {
            self.seen.lock().push(error.message().to_string());
            error
        }
    }

    #[tokio::test]
    async fn test_interceptors_run_in_order() {
        let transport = Arc::new(MockTransport::new());
        let client = ApiClient::new(config("https://h.example"), transport.clone())
            .with_request_interceptor(Arc::new(Tagging("a")))
            .with_request_interceptor(Arc::new(Tagging("b")));

        client.get("/x", &[]).await.unwrap();

        let sent = transport.last_request().unwrap();
        assert_eq!(sent.headers.get("x-chain"), Some("ab"));
    }

    #[tokio::test]
    async fn test_response_interceptor_sees_errors_only() {
        let transport = Arc::new(MockTransport::new());
        transport.respond(200, Value::Null).respond(500, Value::Null);
        let recording = Arc::new(Recording::default());
        let client = ApiClient::new(config("https://h.example"), transport)
            .with_response_interceptor(recording.clone());

        client.get("/ok", &[]).await.unwrap();
        client.get("/boom", &[]).await.unwrap_err();

        assert_eq!(
            *recording.seen.lock(),
            vec!["Request failed with status code 500".to_string()]
        );
    }
}
