//! HTTP client for the Moneta backend
//!
//! `ApiClient` owns the base URL and an optional session token. Every
//! endpoint method (see the `api` module) funnels through the same
//! execute/decode path, which keeps the three failure categories distinct:
//! transport errors, HTTP error responses, and schema-invalid bodies.
//!
//! There is no shared mutable client state: an authenticated client is a
//! value produced by [`ApiClient::with_token`] and passed explicitly to
//! whatever service needs it.

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};

/// Authorization header scheme used by the backend (`Token <key>`, not
/// `Bearer`)
pub const AUTH_SCHEME: &str = "Token";

/// Environment variable naming the backend base URL
pub const API_URL_ENV: &str = "MONETA_API_URL";

/// Typed client bound to one base URL
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create an unauthenticated client
    pub fn new(base_url: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Create from the `MONETA_API_URL` environment variable
    pub fn from_env() -> Option<Self> {
        let base_url = std::env::var(API_URL_ENV).ok()?;
        Some(Self::new(&base_url))
    }

    /// Clone of this client with a session token attached
    ///
    /// Every request issued through the returned client carries
    /// `Authorization: Token <key>`.
    pub fn with_token(&self, token: &str) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            token: Some(token.to_string()),
        }
    }

    /// Clone of this client with no session token
    pub fn without_token(&self) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            token: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Build a request for `path`, attaching the session token if present
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = &self.token {
            builder = builder.header(
                reqwest::header::AUTHORIZATION,
                format!("{} {}", AUTH_SCHEME, token),
            );
        }
        builder
    }

    /// Send a request and classify the outcome
    ///
    /// Transport failure -> `Error::Network`; non-2xx -> `Error::Http` with
    /// the body preserved; 2xx -> raw bytes for decoding.
    pub(crate) async fn execute(&self, builder: RequestBuilder) -> Result<Vec<u8>> {
        let response = builder.send().await.map_err(Error::Network)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(Error::Network)?;

        if !status.is_success() {
            let body = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                    Value::String(String::from_utf8_lossy(&bytes).into_owned())
                })
            };
            debug!(status = status.as_u16(), "backend returned error status");
            return Err(Error::Http {
                status: status.as_u16(),
                body,
            });
        }

        Ok(bytes.to_vec())
    }

    /// Decode a 2xx body against the endpoint's schema
    pub(crate) fn decode<T: DeserializeOwned>(bytes: &[u8], endpoint: &'static str) -> Result<T> {
        serde_json::from_slice(bytes).map_err(|source| Error::Validation { endpoint, source })
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        endpoint: &'static str,
    ) -> Result<T> {
        let bytes = self.execute(self.request(Method::GET, path)).await?;
        Self::decode(&bytes, endpoint)
    }

    /// GET with query parameters; `None` fields are not appended at all
    pub(crate) async fn get_json_query<T: DeserializeOwned, Q: Serialize>(
        &self,
        path: &str,
        query: &Q,
        endpoint: &'static str,
    ) -> Result<T> {
        let bytes = self
            .execute(self.request(Method::GET, path).query(query))
            .await?;
        Self::decode(&bytes, endpoint)
    }

    /// POST/PUT/PATCH a JSON body and decode the response
    pub(crate) async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        endpoint: &'static str,
    ) -> Result<T> {
        let bytes = self.execute(self.request(method, path).json(body)).await?;
        Self::decode(&bytes, endpoint)
    }

    /// POST with no body and decode the response
    pub(crate) async fn post_empty<T: DeserializeOwned>(
        &self,
        path: &str,
        endpoint: &'static str,
    ) -> Result<T> {
        let bytes = self.execute(self.request(Method::POST, path)).await?;
        Self::decode(&bytes, endpoint)
    }

    /// DELETE resolving to no payload (body, if any, is discarded)
    pub(crate) async fn delete_void(&self, path: &str) -> Result<()> {
        self.execute(self.request(Method::DELETE, path)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_with_token_does_not_mutate_original() {
        let client = ApiClient::new("http://localhost:8000");
        let authed = client.with_token("abc123");
        assert!(!client.has_token());
        assert!(authed.has_token());
        assert!(!authed.without_token().has_token());
    }

    #[test]
    fn test_decode_missing_field_is_validation_error() {
        let result: Result<crate::models::AuthToken> = ApiClient::decode(b"{}", "login");
        match result {
            Err(Error::Validation { endpoint, .. }) => assert_eq!(endpoint, "login"),
            other => panic!("expected validation error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        // Port 1 on localhost refuses connections without a response
        let client = ApiClient::new("http://127.0.0.1:1");
        let result: Result<crate::models::MonthTracking> =
            client.get_json("/api/month-tracking", "month_tracking").await;
        assert!(matches!(result, Err(Error::Network(_))));
    }
}
