//! Authentication DTOs.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::domain::entities::UserData;
use crate::domain::http::ApiResponse;

/// Body of the login request.
#[derive(Clone, Serialize, Zeroize, ZeroizeOnDrop)]
pub struct LoginCredentials {
    /// Account login.
    pub login: String,
    /// Account password.
    pub password: String,
}

impl LoginCredentials {
    #[must_use]
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("login", &self.login)
            .field("password", &"***")
            .finish()
    }
}

/// Token and user found in a login response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginOutcome {
    /// Bearer token, if the response carried one.
    pub token: Option<String>,
    /// User record, if the response carried one.
    pub user: Option<UserData>,
}

impl LoginOutcome {
    /// Extracts token and user from a login response.
    ///
    /// Looks for `token` or `access_token` and for `user`, first at the top
    /// level and then under `data`.
    #[must_use]
    pub fn from_response(response: &ApiResponse) -> Self {
        let scopes = [Some(&response.body), response.body.get("data")];

        let token = scopes.iter().flatten().find_map(|scope| {
            ["token", "access_token"]
                .iter()
                .find_map(|key| scope.get(key).and_then(Value::as_str))
                .filter(|token| !token.is_empty())
                .map(str::to_string)
        });

        let user = scopes
            .iter()
            .flatten()
            .find_map(|scope| scope.get("user").and_then(Value::as_object).cloned());

        Self { token, user }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_credentials_serialize_as_login_body() {
        let credentials = LoginCredentials::new("olena", "s3cret");
        assert_eq!(
            serde_json::to_value(&credentials).unwrap(),
            json!({"login": "olena", "password": "s3cret"})
        );
    }

    #[test]
    fn test_debug_hides_password() {
        let credentials = LoginCredentials::new("olena", "s3cret");
        assert!(!format!("{credentials:?}").contains("s3cret"));
    }

    #[test]
    fn test_outcome_from_top_level() {
        let response = ApiResponse::new(200, json!({"token": "abc", "user": {"id": 1}}));

        let outcome = LoginOutcome::from_response(&response);

        assert_eq!(outcome.token.as_deref(), Some("abc"));
        assert_eq!(outcome.user.and_then(|u| u.get("id").cloned()), Some(json!(1)));
    }

    #[test]
    fn test_outcome_from_data_envelope() {
        let response =
            ApiResponse::new(200, json!({"data": {"access_token": "xyz", "user": {"id": 2}}}));

        let outcome = LoginOutcome::from_response(&response);

        assert_eq!(outcome.token.as_deref(), Some("xyz"));
        assert!(outcome.user.is_some());
    }

    #[test]
    fn test_outcome_ignores_empty_token() {
        let response = ApiResponse::new(200, json!({"token": ""}));
        assert_eq!(LoginOutcome::from_response(&response), LoginOutcome::default());
    }
}
