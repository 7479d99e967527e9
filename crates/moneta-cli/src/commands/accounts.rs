//! Linked account command implementations

use anyhow::Result;
use serde_json::Map;

use moneta_core::models::Credential;

use super::{print_json, Ctx};

pub async fn cmd_accounts_list(ctx: &Ctx) -> Result<()> {
    let session = ctx.session().await?;
    let accounts = session.client().list_accounts().await?;

    if ctx.json {
        return print_json(&accounts);
    }

    if accounts.is_empty() {
        println!("No linked accounts. Link one with:");
        println!("  moneta accounts add --company \"My Bank\"");
        return Ok(());
    }

    println!();
    println!("🏦 Accounts");
    println!("   ─────────────────────────────────────────────────────────────");

    for account in accounts {
        let scanned = account
            .last_scanned
            .as_deref()
            .map(|s| format!(" (scanned {})", s))
            .unwrap_or_default();
        println!(
            "   #{:<4} {} [{}] balance {}{}",
            account.id, account.company, account.kind, account.balance, scanned
        );
    }

    Ok(())
}

pub async fn cmd_accounts_add(ctx: &Ctx, company: &str, kind: &str, balance: &str) -> Result<()> {
    let session = ctx.session().await?;
    let created = session
        .client()
        .create_account(&Credential {
            id: 0,
            company: company.to_string(),
            kind: kind.to_string(),
            last_scanned: None,
            additional_info: None,
            balance: balance.to_string(),
            extra: Map::new(),
        })
        .await?;

    if ctx.json {
        return print_json(&created);
    }
    println!("Linked account #{}: {}", created.id, created.company);
    Ok(())
}

pub async fn cmd_accounts_rm(ctx: &Ctx, id: i64) -> Result<()> {
    let session = ctx.session().await?;
    session.client().delete_account(id).await?;
    println!("Unlinked account #{}", id);
    Ok(())
}
