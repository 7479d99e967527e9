//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `auth` - Session commands (login, register, logout, whoami, password)
//! - `accounts` - Linked account commands
//! - `tags` - Tag management commands
//! - `transactions` - Transaction and recurring-transaction commands
//! - `chat` - Finance agent conversation commands
//! - `reports` - Dashboard report commands

pub mod accounts;
pub mod auth;
pub mod chat;
pub mod reports;
pub mod tags;
pub mod transactions;

// Re-export command functions for main.rs
pub use accounts::*;
pub use auth::*;
pub use chat::*;
pub use reports::*;
pub use tags::*;
pub use transactions::*;

use std::path::PathBuf;

use anyhow::{bail, Context as _, Result};
use serde::Serialize;

use moneta_core::{ApiClient, AuthService, ServiceConfig, Session, TokenStore};

/// Shared command context: base client, auth service, output mode
pub struct Ctx {
    /// Unauthenticated base client (session clients are derived per call)
    pub client: ApiClient,
    pub auth: AuthService,
    pub json: bool,
}

impl Ctx {
    /// Resolve configuration and open the token store
    pub fn build(api_url: Option<&str>, data_dir: Option<&PathBuf>, json: bool) -> Result<Self> {
        let config = ServiceConfig::resolve(api_url)?;
        let store = match data_dir {
            Some(dir) => TokenStore::open(dir)?,
            None => TokenStore::open_default()?,
        };
        let client = ApiClient::new(&config.api_url);
        tracing::debug!(api_url = %config.api_url, "resolved backend");
        Ok(Self {
            client: client.clone(),
            auth: AuthService::new(client, store),
            json,
        })
    }

    /// Restore the stored session or fail with a sign-in hint
    pub async fn session(&self) -> Result<Session> {
        match self.auth.current_user().await {
            Ok(Some(session)) => Ok(session),
            Ok(None) => bail!("Not signed in. Run 'moneta login' first."),
            Err(e) => Err(anyhow::anyhow!(e)).context("Could not restore session"),
        }
    }
}

/// Print a value as pretty JSON (used by --json output)
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        format!("{}...", &s[..max.saturating_sub(3)])
    }
}

/// Amount with ANSI color: red for expenses, green for income
pub fn format_amount(value: f64) -> String {
    if value < 0.0 {
        format!("\x1b[31m${:.2}\x1b[0m", value.abs())
    } else {
        format!("\x1b[32m+${:.2}\x1b[0m", value)
    }
}
