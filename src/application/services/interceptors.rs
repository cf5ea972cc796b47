//! Request and response interceptors applied by the API client.

use std::sync::Arc;

use tracing::{debug, warn};

use super::SharedSession;
use crate::domain::errors::ApiError;
use crate::domain::http::{ApiRequest, ApiResponse};
use crate::domain::ports::NotificationSink;

const AUTHORIZATION: &str = "Authorization";

/// Hook run on every outgoing request.
pub trait RequestInterceptor: Send + Sync {
    /// Returns the request to send.
    fn on_request(&self, request: ApiRequest) -> ApiRequest;
}

/// Hook run on every response or failure.
pub trait ResponseInterceptor: Send + Sync {
    /// Handles a 2xx response.
    fn on_response(&self, response: ApiResponse) -> ApiResponse {
        response
    }

    /// Handles a failure. The returned error is what the caller receives.
    fn on_error(&self, error: ApiError) -> ApiError {
        error
    }
}

/// Adds the session bearer token to outgoing requests.
pub struct BearerAuthInterceptor {
    session: SharedSession,
}

impl BearerAuthInterceptor {
    /// Reads the token from `session` on every request.
    #[must_use]
    pub const fn new(session: SharedSession) -> Self {
        Self { session }
    }
}

impl RequestInterceptor for BearerAuthInterceptor {
    fn on_request(&self, mut request: ApiRequest) -> ApiRequest {
        if let Some(token) = self.session.token() {
            request.headers.insert(AUTHORIZATION, token.bearer());
        }
        request
    }
}

/// Dismisses stale notices and reports failures to the notification sink.
pub struct ErrorNotificationInterceptor {
    sink: Arc<dyn NotificationSink>,
}

impl ErrorNotificationInterceptor {
    /// Reports failures to `sink`.
    #[must_use]
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self { sink }
    }
}

impl ResponseInterceptor for ErrorNotificationInterceptor {
    fn on_error(&self, error: ApiError) -> ApiError {
        self.sink.dismiss_all();

        if error.is_notified() {
            warn!(status = ?error.status(), message = %error.message(), "API request failed");
            self.sink.error(error.message());
        } else {
            debug!(
                status = ?error.status(),
                message = %error.message(),
                "API request failed without notification"
            );
        }

        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::TransportError;
    use crate::domain::ports::mocks::{MockNotificationSink, SinkCall};
    use serde_json::{Value, json};
    use test_case::test_case;

    fn logged_in(token: &str) -> SharedSession {
        let session = SharedSession::default();
        session.update(|s| s.set_token(token));
        session
    }

    #[test]
    fn test_bearer_added_when_logged_in() {
        let interceptor = BearerAuthInterceptor::new(logged_in("abc"));

        let request = interceptor.on_request(ApiRequest::get("/api/v1/me"));

        assert_eq!(request.headers.get("Authorization"), Some("Bearer abc"));
    }

    #[test]
    fn test_bearer_header_uses_canonical_name() {
        let interceptor = BearerAuthInterceptor::new(logged_in("abc"));

        let request = interceptor.on_request(ApiRequest::get("/x"));

        assert_eq!(
            request.headers.iter().collect::<Vec<_>>(),
            vec![("Authorization", "Bearer abc")]
        );
    }

    #[test]
    fn test_bearer_overwrites_existing_authorization_and_keeps_others() {
        let interceptor = BearerAuthInterceptor::new(logged_in("abc"));
        let request = ApiRequest::get("/x")
            .with_header("authorization", "Basic old")
            .with_header("X-Request-Id", "42");

        let request = interceptor.on_request(request);

        assert_eq!(request.headers.len(), 2);
        assert_eq!(request.headers.get("Authorization"), Some("Bearer abc"));
        assert_eq!(request.headers.get("x-request-id"), Some("42"));
    }

    #[test]
    fn test_logged_out_request_untouched() {
        let interceptor = BearerAuthInterceptor::new(SharedSession::default());
        let original = ApiRequest::get("/x").with_header("Authorization", "Basic caller");

        let request = interceptor.on_request(original.clone());

        assert_eq!(request, original);
    }

    #[test]
    fn test_token_read_at_send_time() {
        let session = logged_in("first");
        let interceptor = BearerAuthInterceptor::new(session.clone());

        session.update(|s| s.set_token("second"));
        let request = interceptor.on_request(ApiRequest::get("/x"));

        assert_eq!(request.headers.get("Authorization"), Some("Bearer second"));
    }

    #[test]
    fn test_not_found_dismisses_then_notifies_once() {
        let sink = Arc::new(MockNotificationSink::new());
        let interceptor = ErrorNotificationInterceptor::new(sink.clone());

        let error = interceptor.on_error(ApiError::from_status(404, Value::Null));

        assert_eq!(
            sink.calls(),
            vec![
                SinkCall::DismissAll,
                SinkCall::Error("Request failed with status code 404".to_string()),
            ]
        );
        assert_eq!(error.status(), Some(404));
    }

    #[test_case(418 ; "teapot")]
    #[test_case(409 ; "conflict")]
    #[test_case(503 ; "unavailable")]
    fn test_unlisted_status_only_dismisses(status: u16) {
        let sink = Arc::new(MockNotificationSink::new());
        let interceptor = ErrorNotificationInterceptor::new(sink.clone());

        let error = interceptor.on_error(ApiError::from_status(status, json!({"detail": "x"})));

        assert_eq!(sink.calls(), vec![SinkCall::DismissAll]);
        assert_eq!(error.status(), Some(status));
    }

    #[test]
    fn test_transport_error_only_dismisses() {
        let sink = Arc::new(MockNotificationSink::new());
        let interceptor = ErrorNotificationInterceptor::new(sink.clone());

        interceptor.on_error(TransportError::timeout("request timed out").into());

        assert!(sink.errors().is_empty());
        assert_eq!(sink.calls(), vec![SinkCall::DismissAll]);
    }

    #[test]
    fn test_success_passes_through() {
        let sink = Arc::new(MockNotificationSink::new());
        let interceptor = ErrorNotificationInterceptor::new(sink.clone());
        let response = ApiResponse::new(200, json!({"ok": true}));

        assert_eq!(interceptor.on_response(response.clone()), response);
        assert!(sink.calls().is_empty());
    }
}
