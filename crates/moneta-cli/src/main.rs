//! Moneta CLI - command-line client for the Moneta finance service
//!
//! Usage:
//!   moneta login -e you@example.com -p secret   Sign in
//!   moneta tx list --from 2024-06-01            List transactions
//!   moneta chat send "how am I doing?"          Ask the finance agent
//!   moneta report summary                       Dashboard summary

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;
use commands::Ctx;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let ctx = Ctx::build(cli.api_url.as_deref(), cli.data_dir.as_ref(), cli.json)?;

    match cli.command {
        Commands::Login { email, password } => commands::cmd_login(&ctx, &email, &password).await,
        Commands::Register {
            email,
            password,
            name,
        } => commands::cmd_register(&ctx, &email, &password, &name).await,
        Commands::Logout => commands::cmd_logout(&ctx).await,
        Commands::Whoami => commands::cmd_whoami(&ctx).await,
        Commands::Accounts { action } => match action.unwrap_or(AccountsAction::List) {
            AccountsAction::List => commands::cmd_accounts_list(&ctx).await,
            AccountsAction::Add {
                company,
                kind,
                balance,
            } => commands::cmd_accounts_add(&ctx, &company, &kind, &balance).await,
            AccountsAction::Rm { id } => commands::cmd_accounts_rm(&ctx, id).await,
        },
        Commands::Tags { action } => match action.unwrap_or(TagsAction::List) {
            TagsAction::List => commands::cmd_tags_list(&ctx).await,
            TagsAction::Add {
                name,
                expense,
                kind,
            } => commands::cmd_tags_add(&ctx, &name, expense, kind.as_deref()).await,
            TagsAction::Rm { id } => commands::cmd_tags_rm(&ctx, id).await,
        },
        Commands::Transactions { action } => {
            match action.unwrap_or(TransactionsAction::List {
                from: None,
                to: None,
            }) {
                TransactionsAction::List { from, to } => {
                    commands::cmd_tx_list(&ctx, from, to).await
                }
                TransactionsAction::Add {
                    name,
                    value,
                    date,
                    tag,
                } => commands::cmd_tx_add(&ctx, &name, value, date, tag).await,
                TransactionsAction::Rm { id } => commands::cmd_tx_rm(&ctx, id).await,
            }
        }
        Commands::Recurring { action } => match action.unwrap_or(RecurringAction::List) {
            RecurringAction::List => commands::cmd_recurring_list(&ctx).await,
            RecurringAction::Add { name, value, date } => {
                commands::cmd_recurring_add(&ctx, &name, value, date).await
            }
            RecurringAction::Rm { id } => commands::cmd_recurring_rm(&ctx, id).await,
        },
        Commands::Chat { action } => match action {
            ChatAction::Send { text } => commands::cmd_chat_send(&ctx, &text).await,
            ChatAction::History => commands::cmd_chat_history(&ctx).await,
        },
        Commands::Report { action } => match action {
            ReportAction::Summary => commands::cmd_report_summary(&ctx).await,
            ReportAction::Month => commands::cmd_report_month(&ctx).await,
            ReportAction::Total => commands::cmd_report_total(&ctx).await,
        },
        Commands::Password { action } => match action {
            PasswordAction::Change { new_password } => {
                commands::cmd_password_change(&ctx, &new_password).await
            }
            PasswordAction::Reset { email } => commands::cmd_password_reset(&ctx, &email).await,
        },
    }
}
