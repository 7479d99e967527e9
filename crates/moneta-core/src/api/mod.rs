//! Endpoint table: every backend route the client speaks, grouped by domain
//!
//! Each method on [`ApiClient`](crate::client::ApiClient) corresponds to one
//! (HTTP method, path) pair on the backend:
//! - `auth` - session, password, registration, and profile routes
//! - `chat` - conversational agent history and send
//! - `accounts` - linked financial accounts (`/user_accounts/`)
//! - `tags` - spending tags and tag goals
//! - `transactions` - transactions, date-range filters, recurring templates
//! - `reports` - read-only dashboard/report endpoints
//!
//! Wire paths are kept exactly as the backend serves them, including the
//! historical `summery_widgets` spelling; Rust method names are corrected.

mod accounts;
mod auth;
mod chat;
mod reports;
mod tags;
mod transactions;
