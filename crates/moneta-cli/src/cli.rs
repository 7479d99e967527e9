//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Moneta - track finances and talk to your money
#[derive(Parser)]
#[command(name = "moneta")]
#[command(about = "Command-line client for the Moneta finance service", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Backend base URL
    ///
    /// Falls back to the MONETA_API_URL environment variable, then to
    /// api_url in ~/.config/moneta/config.toml.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Directory for the session token store
    ///
    /// Defaults to the platform data directory
    /// (~/.local/share/moneta on Linux).
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print raw JSON instead of formatted output
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and store a session token
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },

    /// Register a new account and sign in
    Register {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,

        /// Display name ("First Last")
        #[arg(short, long)]
        name: String,
    },

    /// Sign out and clear the local session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Manage linked financial accounts
    Accounts {
        #[command(subcommand)]
        action: Option<AccountsAction>,
    },

    /// Manage spending tags
    Tags {
        #[command(subcommand)]
        action: Option<TagsAction>,
    },

    /// Manage transactions
    #[command(visible_alias = "tx")]
    Transactions {
        #[command(subcommand)]
        action: Option<TransactionsAction>,
    },

    /// Manage recurring transactions
    Recurring {
        #[command(subcommand)]
        action: Option<RecurringAction>,
    },

    /// Talk to the finance agent
    Chat {
        #[command(subcommand)]
        action: ChatAction,
    },

    /// Dashboard reports
    Report {
        #[command(subcommand)]
        action: ReportAction,
    },

    /// Password operations
    Password {
        #[command(subcommand)]
        action: PasswordAction,
    },
}

#[derive(Subcommand)]
pub enum AccountsAction {
    /// List linked accounts
    List,

    /// Link a new account
    Add {
        /// Institution name
        #[arg(short, long)]
        company: String,

        /// Account type (checking, savings, card, ...)
        #[arg(short = 't', long = "type", default_value = "checking")]
        kind: String,

        /// Opening balance (decimal string)
        #[arg(short, long, default_value = "0.00")]
        balance: String,
    },

    /// Unlink an account
    Rm {
        /// Account id
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum TagsAction {
    /// List tags
    List,

    /// Create a tag
    Add {
        /// Tag name
        name: String,

        /// Mark the tag as an expense tag
        #[arg(long)]
        expense: bool,

        /// Cadence: "MONTHLY FIXED", PERIODIC, or CONTINUOUS
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
    },

    /// Delete a tag
    Rm {
        /// Tag id
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum TransactionsAction {
    /// List transactions, optionally bounded by date
    List {
        /// Include transactions on or after this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Include transactions on or before this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
    },

    /// Record a transaction
    Add {
        /// Description
        name: String,

        /// Amount (negative for expenses)
        value: f64,

        /// Transaction date (YYYY-MM-DD); defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Tag id to assign
        #[arg(short, long)]
        tag: Option<i64>,
    },

    /// Delete a transaction
    Rm {
        /// Transaction id
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum RecurringAction {
    /// List recurring transactions
    List,

    /// Create a recurring transaction
    Add {
        /// Description
        name: String,

        /// Amount (negative for expenses)
        value: f64,

        /// Anchor date (YYYY-MM-DD); defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Delete a recurring transaction
    Rm {
        /// Recurring transaction id
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum ChatAction {
    /// Send a message to the agent
    Send {
        /// Message text
        text: String,
    },

    /// Show the conversation history
    History,
}

#[derive(Subcommand)]
pub enum ReportAction {
    /// Dashboard summary (averages over tracked months)
    Summary,

    /// Current month per-category breakdown
    Month,

    /// Month-to-date expense total
    Total,
}

#[derive(Subcommand)]
pub enum PasswordAction {
    /// Change the signed-in user's password
    Change {
        /// New password
        new_password: String,
    },

    /// Request a password-reset email
    Reset {
        /// Account email
        email: String,
    },
}
