//! API call error types.

use serde_json::Value;
use thiserror::Error;

/// Status codes that raise a user-facing error notification.
pub const NOTIFIED_STATUSES: [u16; 5] = [400, 401, 403, 404, 500];

/// Transport failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Request exceeded the configured timeout.
    Timeout,
    /// Connection could not be established.
    Connect,
    /// Any other transport failure.
    Other,
}

/// Failure below the HTTP status layer.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct TransportError {
    /// Failure category.
    pub kind: TransportErrorKind,
    /// Human-readable message.
    pub message: String,
}

impl TransportError {
    #[must_use]
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Timeout, message)
    }

    #[must_use]
    pub fn connect(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Connect, message)
    }

    #[must_use]
    pub fn other(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Other, message)
    }
}

/// API call error variants.
#[derive(Debug, Clone, Error)]
#[allow(missing_docs)]
pub enum ApiError {
    #[error("{message}")]
    Status {
        status: u16,
        message: String,
        body: Value,
    },

    #[error("{message}")]
    Transport {
        kind: TransportErrorKind,
        message: String,
    },

    #[error("invalid request: {message}")]
    InvalidRequest { message: String },
}

impl ApiError {
    /// Creates an error for a non-2xx response.
    #[must_use]
    pub fn from_status(status: u16, body: Value) -> Self {
        Self::Status {
            status,
            message: format!("Request failed with status code {status}"),
            body,
        }
    }

    /// Creates invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Returns the error message without the rest of the error.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Status { message, .. }
            | Self::Transport { message, .. }
            | Self::InvalidRequest { message } => message,
        }
    }

    /// Returns the HTTP status, if the server answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the response body, if the server answered.
    #[must_use]
    pub const fn body(&self) -> Option<&Value> {
        match self {
            Self::Status { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Whether this error should raise a user notification.
    #[must_use]
    pub fn is_notified(&self) -> bool {
        self.status()
            .is_some_and(|status| NOTIFIED_STATUSES.contains(&status))
    }

    /// Whether the server rejected the credentials.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401, .. })
    }

    /// Whether the error happened before a response arrived.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

impl From<TransportError> for ApiError {
    fn from(error: TransportError) -> Self {
        Self::Transport {
            kind: error.kind,
            message: error.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(400, true ; "bad_request")]
    #[test_case(401, true ; "unauthorized")]
    #[test_case(403, true ; "forbidden")]
    #[test_case(404, true ; "not_found")]
    #[test_case(500, true ; "server_error")]
    #[test_case(418, false ; "teapot")]
    #[test_case(422, false ; "unprocessable")]
    #[test_case(502, false ; "bad_gateway")]
    fn test_notified_statuses(status: u16, notified: bool) {
        assert_eq!(ApiError::from_status(status, Value::Null).is_notified(), notified);
    }

    #[test]
    fn test_status_error_keeps_structure() {
        let error = ApiError::from_status(404, serde_json::json!({"detail": "missing"}));

        assert_eq!(error.message(), "Request failed with status code 404");
        assert_eq!(error.status(), Some(404));
        assert_eq!(error.body().and_then(|b| b.get("detail")), Some(&serde_json::json!("missing")));
        assert_eq!(error.to_string(), error.message());
    }

    #[test]
    fn test_transport_error_is_never_notified() {
        let error = ApiError::from(TransportError::connect("connection refused"));

        assert!(!error.is_notified());
        assert!(error.is_network_error());
        assert_eq!(error.status(), None);
        assert_eq!(error.message(), "connection refused");
    }
}
