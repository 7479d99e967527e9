//! CLI command tests
//!
//! Commands run against the mock backend server with a temp-dir token
//! store, the same way a user session would.

use clap::Parser;
use tempfile::TempDir;

use moneta_core::test_utils::{MockApiServer, TEST_EMAIL, TEST_PASSWORD};
use moneta_core::{ApiClient, AuthService, TokenStore};

use crate::cli::{Cli, Commands};
use crate::commands::{self, truncate, Ctx};

fn test_ctx(url: &str) -> (TempDir, Ctx) {
    let dir = tempfile::tempdir().unwrap();
    let store = TokenStore::open(dir.path()).unwrap();
    let client = ApiClient::new(url);
    let ctx = Ctx {
        client: client.clone(),
        auth: AuthService::new(client, store),
        json: false,
    };
    (dir, ctx)
}

async fn signed_in_ctx(server: &MockApiServer) -> (TempDir, Ctx) {
    let (dir, ctx) = test_ctx(&server.url());
    commands::cmd_login(&ctx, TEST_EMAIL, TEST_PASSWORD)
        .await
        .unwrap();
    (dir, ctx)
}

// ========== Argument Parsing Tests ==========

#[test]
fn test_cli_structure_is_valid() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}

#[test]
fn test_parse_login_args() {
    let cli = Cli::try_parse_from(["moneta", "login", "-e", "a@b.example", "-p", "secret"]).unwrap();
    match cli.command {
        Commands::Login { email, password } => {
            assert_eq!(email, "a@b.example");
            assert_eq!(password, "secret");
        }
        _ => panic!("expected login command"),
    }
}

#[test]
fn test_parse_tx_alias() {
    let cli = Cli::try_parse_from(["moneta", "tx", "list", "--from", "2024-06-01"]).unwrap();
    assert!(matches!(cli.command, Commands::Transactions { .. }));
}

#[test]
fn test_parse_rejects_bad_date() {
    assert!(Cli::try_parse_from(["moneta", "tx", "list", "--from", "june"]).is_err());
}

// ========== Command Tests ==========

#[tokio::test]
async fn test_cmd_login_and_whoami() {
    let server = MockApiServer::start().await;
    let (_dir, ctx) = signed_in_ctx(&server).await;

    commands::cmd_whoami(&ctx).await.unwrap();
    assert!(ctx.auth.store().is_valid());
}

#[tokio::test]
async fn test_cmd_login_bad_credentials() {
    let server = MockApiServer::start().await;
    let (_dir, ctx) = test_ctx(&server.url());

    let err = commands::cmd_login(&ctx, TEST_EMAIL, "nope")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Login failed"));
    assert!(!ctx.auth.store().is_valid());
}

#[tokio::test]
async fn test_cmd_logout_clears_session() {
    let server = MockApiServer::start().await;
    let (_dir, ctx) = signed_in_ctx(&server).await;

    commands::cmd_logout(&ctx).await.unwrap();
    assert!(!ctx.auth.store().is_valid());
}

#[tokio::test]
async fn test_commands_require_session() {
    let server = MockApiServer::start().await;
    let (_dir, ctx) = test_ctx(&server.url());

    let err = commands::cmd_tags_list(&ctx).await.unwrap_err();
    assert!(err.to_string().contains("Not signed in"));
}

#[tokio::test]
async fn test_cmd_accounts_round_trip() {
    let server = MockApiServer::start().await;
    let (_dir, ctx) = signed_in_ctx(&server).await;

    commands::cmd_accounts_add(&ctx, "Demo Bank", "checking", "100.00")
        .await
        .unwrap();
    commands::cmd_accounts_list(&ctx).await.unwrap();
    commands::cmd_accounts_rm(&ctx, 1).await.unwrap();
}

#[tokio::test]
async fn test_cmd_tags_add_with_kind() {
    let server = MockApiServer::start().await;
    let (_dir, ctx) = signed_in_ctx(&server).await;

    commands::cmd_tags_add(&ctx, "Rent", true, Some("MONTHLY FIXED"))
        .await
        .unwrap();
    commands::cmd_tags_list(&ctx).await.unwrap();
}

#[tokio::test]
async fn test_cmd_tags_add_rejects_unknown_kind() {
    let server = MockApiServer::start().await;
    let (_dir, ctx) = signed_in_ctx(&server).await;

    let err = commands::cmd_tags_add(&ctx, "Rent", true, Some("SOMETIMES"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Unknown tag type"));
}

#[tokio::test]
async fn test_cmd_tx_add_and_list() {
    let server = MockApiServer::start().await;
    let (_dir, ctx) = signed_in_ctx(&server).await;

    commands::cmd_tx_add(&ctx, "Coffee", -4.5, None, None)
        .await
        .unwrap();
    assert_eq!(server.transaction_count(), 1);
    commands::cmd_tx_list(&ctx, None, None).await.unwrap();
}

#[tokio::test]
async fn test_cmd_chat_send() {
    let server = MockApiServer::start().await;
    let (_dir, ctx) = signed_in_ctx(&server).await;

    commands::cmd_chat_send(&ctx, "hello").await.unwrap();
    commands::cmd_chat_history(&ctx).await.unwrap();
}

#[tokio::test]
async fn test_cmd_reports() {
    let server = MockApiServer::start().await;
    let (_dir, ctx) = signed_in_ctx(&server).await;

    commands::cmd_report_summary(&ctx).await.unwrap();
    commands::cmd_report_month(&ctx).await.unwrap();
    commands::cmd_report_total(&ctx).await.unwrap();
}

// ========== Helper Tests ==========

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("short", 40), "short");
}

#[test]
fn test_truncate_long_string() {
    let long = "a".repeat(50);
    let result = truncate(&long, 40);
    assert_eq!(result.len(), 40);
    assert!(result.ends_with("..."));
}
