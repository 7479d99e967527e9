//! Authentication flows and backend error normalization
//!
//! `AuthService` orchestrates login/registration/logout/session-restore atop
//! the typed client and the token store. Failures during login/register are
//! surfaced as [`AuthError`] with per-field details for display; failures
//! during best-effort logout and session restore collapse into a clean
//! logged-out state instead of propagating.

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{
    validate_username, LoginRequest, PasswordChangeRequest, RegisterRequest, UserDetails,
};
use crate::token_store::TokenStore;

/// Uniform error shape for the auth flows: one human-readable message, the
/// HTTP status when there was one, and the backend's raw per-field details
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct AuthError {
    pub message: String,
    pub status: Option<u16>,
    pub details: Option<Map<String, Value>>,
}

impl AuthError {
    fn message_only(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            details: None,
        }
    }
}

impl From<Error> for AuthError {
    /// Normalize heterogeneous backend error shapes into one message.
    ///
    /// Field priority: password, username, email, non_field_errors, detail,
    /// then the first key present (in which case the whole body is kept as
    /// details).
    fn from(err: Error) -> Self {
        match err {
            Error::Http { status, body } => {
                let (message, details) = extract_message(&body);
                Self {
                    message,
                    status: Some(status),
                    details,
                }
            }
            Error::Network(_) => Self::message_only("Network error. Please check your connection."),
            other => Self::message_only(other.to_string()),
        }
    }
}

const PRIORITY_FIELDS: [&str; 4] = ["password", "username", "email", "non_field_errors"];

fn extract_message(body: &Value) -> (String, Option<Map<String, Value>>) {
    let Some(object) = body.as_object() else {
        return ("An error occurred".to_string(), None);
    };

    for field in PRIORITY_FIELDS {
        if let Some(message) = object.get(field).and_then(field_message) {
            return (message, None);
        }
    }

    if let Some(detail) = object.get("detail").and_then(Value::as_str) {
        return (detail.to_string(), None);
    }

    // Unrecognized shape: first field's first message, raw body as details
    let message = object
        .values()
        .next()
        .and_then(field_message)
        .unwrap_or_else(|| "An error occurred".to_string());
    (message, Some(object.clone()))
}

/// First message of a field error, which is either a list of strings or a
/// bare string
fn field_message(value: &Value) -> Option<String> {
    match value {
        Value::Array(items) => items.first().and_then(Value::as_str).map(str::to_string),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

/// An authenticated session: the token-attached client plus the profile it
/// was opened for
///
/// Services that need authenticated calls take this (or its client) as an
/// explicit argument; there is no implicit shared header state anywhere.
#[derive(Debug, Clone)]
pub struct Session {
    client: ApiClient,
    user: UserDetails,
    token: String,
}

impl Session {
    /// Client with the session token attached to every request
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn user(&self) -> &UserDetails {
        &self.user
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Orchestrates the session lifecycle against the backend
pub struct AuthService {
    client: ApiClient,
    store: TokenStore,
}

impl AuthService {
    /// `client` is the unauthenticated base client; tokens are attached per
    /// session, never onto `client` itself
    pub fn new(client: ApiClient, store: TokenStore) -> Self {
        Self { client, store }
    }

    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    /// Exchange credentials for a session
    ///
    /// On success the token is persisted (24 h horizon) and the profile is
    /// fetched with it. On failure nothing is stored.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let body = LoginRequest {
            username: None,
            email: Some(email.to_string()),
            password: password.to_string(),
        };
        let token = self.client.login(&body).await?;
        self.open_session(token.key).await
    }

    /// Register a new account and sign in
    ///
    /// The email doubles as the username. The display name is split on
    /// whitespace: first token becomes the first name, the remainder joined
    /// becomes the last name (empty for single-word names).
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<Session, AuthError> {
        validate_username(email)?;
        let (first_name, last_name) = split_name(name);
        let body = RegisterRequest {
            username: Some(email.to_string()),
            email: email.to_string(),
            password1: password.to_string(),
            password2: password.to_string(),
            first_name: Some(first_name),
            last_name: Some(last_name),
        };
        let token = self.client.register(&body).await?;
        self.open_session(token.key).await
    }

    async fn open_session(&self, token: String) -> Result<Session, AuthError> {
        self.store.set_token(&token)?;
        let client = self.client.with_token(&token);
        let user = client.user_details().await?;
        Ok(Session {
            client,
            user,
            token,
        })
    }

    /// End the session
    ///
    /// The backend logout call is best-effort; the local token is cleared
    /// regardless, so local termination never depends on reachability.
    pub async fn logout(&self) -> Result<(), AuthError> {
        match self.store.get_token() {
            Ok(Some(token)) => {
                if let Err(e) = self.client.with_token(&token).logout().await {
                    warn!("Backend logout failed, clearing local session anyway: {}", e);
                }
            }
            Ok(None) => {}
            Err(e) => warn!("Could not read stored token during logout: {}", e),
        }
        self.store.remove_token()?;
        Ok(())
    }

    /// Restore the stored session, if any
    ///
    /// No stored token resolves to `Ok(None)` without touching the network.
    /// A 401/403 means the token is no longer honored: it is purged and the
    /// result is `Ok(None)`, not an error. Anything else propagates.
    pub async fn current_user(&self) -> Result<Option<Session>, AuthError> {
        let token = match self.store.get_token()? {
            Some(token) => token,
            None => return Ok(None),
        };

        let client = self.client.with_token(&token);
        match client.user_details().await {
            Ok(user) => Ok(Some(Session {
                client,
                user,
                token,
            })),
            Err(Error::Http { status, .. }) if status == 401 || status == 403 => {
                debug!(status, "stored token rejected, clearing session");
                self.store.remove_token()?;
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Change the signed-in user's password
    pub async fn change_password(
        &self,
        session: &Session,
        new_password: &str,
    ) -> Result<String, AuthError> {
        let body = PasswordChangeRequest {
            new_password1: new_password.to_string(),
            new_password2: new_password.to_string(),
        };
        let detail = session.client().change_password(&body).await?;
        Ok(detail.detail)
    }
}

/// First whitespace token -> first name, remainder joined -> last name.
/// Single-word names get an empty last name; the backend accepts both.
fn split_name(name: &str) -> (String, String) {
    let mut parts = name.split_whitespace();
    let first = parts.next().unwrap_or("").to_string();
    let last = parts.collect::<Vec<_>>().join(" ");
    (first, last)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn http_error(status: u16, body: Value) -> Error {
        Error::Http { status, body }
    }

    #[test]
    fn test_normalize_password_field() {
        let err = AuthError::from(http_error(400, json!({"password": ["too short"]})));
        assert_eq!(err.message, "too short");
        assert_eq!(err.status, Some(400));
        assert_eq!(err.details, None);
    }

    #[test]
    fn test_normalize_non_field_errors() {
        let err = AuthError::from(http_error(400, json!({"non_field_errors": ["bad credentials"]})));
        assert_eq!(err.message, "bad credentials");
    }

    #[test]
    fn test_normalize_priority_order() {
        // password outranks email even when both are present
        let err = AuthError::from(http_error(
            400,
            json!({"email": ["invalid email"], "password": ["too short"]}),
        ));
        assert_eq!(err.message, "too short");
    }

    #[test]
    fn test_normalize_detail() {
        let err = AuthError::from(http_error(403, json!({"detail": "Invalid token."})));
        assert_eq!(err.message, "Invalid token.");
        assert_eq!(err.status, Some(403));
    }

    #[test]
    fn test_normalize_unrecognized_shape_keeps_details() {
        let body = json!({"foo": ["x"]});
        let err = AuthError::from(http_error(400, body.clone()));
        assert_eq!(err.message, "x");
        assert_eq!(
            err.details,
            Some(body.as_object().cloned().unwrap())
        );
    }

    #[test]
    fn test_normalize_bare_string_field() {
        let err = AuthError::from(http_error(400, json!({"username": "already taken"})));
        assert_eq!(err.message, "already taken");
    }

    #[test]
    fn test_normalize_non_object_body() {
        let err = AuthError::from(http_error(500, Value::String("oops".to_string())));
        assert_eq!(err.message, "An error occurred");
        assert_eq!(err.status, Some(500));
    }

    #[test]
    fn test_normalize_non_http_error_has_no_status() {
        let err = AuthError::from(Error::InvalidData("bad username".to_string()));
        assert_eq!(err.status, None);
        assert_eq!(err.message, "Invalid data: bad username");
    }

    #[test]
    fn test_split_name_two_words() {
        assert_eq!(
            split_name("Ada Lovelace"),
            ("Ada".to_string(), "Lovelace".to_string())
        );
    }

    #[test]
    fn test_split_name_multi_part_surname() {
        assert_eq!(
            split_name("Ada King of Lovelace"),
            ("Ada".to_string(), "King of Lovelace".to_string())
        );
    }

    #[test]
    fn test_split_name_single_word_leaves_last_empty() {
        assert_eq!(split_name("Ada"), ("Ada".to_string(), String::new()));
    }
}
