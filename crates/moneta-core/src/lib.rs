//! Moneta Core Library
//!
//! Shared client functionality for the Moneta personal finance service:
//! - Typed API client covering every backend route (auth, chat, accounts,
//!   tags, transactions, reports)
//! - Schema types with runtime validation via serde
//! - Persistent token store with a client-side session horizon
//! - Auth service: login/registration/logout/session restore and backend
//!   error normalization
//! - Chat service wrapper over the conversational agent endpoints
//! - Config resolution for the backend base URL

pub mod api;
pub mod auth;
pub mod chat;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod token_store;

/// Test utilities including the mock backend server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

#[cfg(test)]
mod tests;

pub use auth::{AuthError, AuthService, Session};
pub use chat::ChatService;
pub use client::{ApiClient, API_URL_ENV, AUTH_SCHEME};
pub use config::ServiceConfig;
pub use error::{Error, Result};
pub use token_store::{TokenStore, DEFAULT_EXPIRY_HOURS};
