//! Transaction and recurring-transaction command implementations

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use serde_json::Map;

use moneta_core::models::{RecurringTransaction, Transaction, TransactionQuery};

use super::{format_amount, print_json, truncate, Ctx};

pub async fn cmd_tx_list(ctx: &Ctx, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<()> {
    let session = ctx.session().await?;
    let query = TransactionQuery {
        date_gte: from,
        date_lte: to,
        ..Default::default()
    };
    let transactions = session.client().list_transactions(&query).await?;

    if ctx.json {
        return print_json(&transactions);
    }

    if transactions.is_empty() {
        println!("No transactions in this range.");
        return Ok(());
    }

    println!();
    println!("📝 Transactions");
    println!("   ─────────────────────────────────────────────────────────────");

    for tx in transactions {
        let tag = if tx.tag_name.is_empty() {
            String::new()
        } else {
            format!(" · {}", tx.tag_name)
        };
        println!(
            "   #{:<4} {} │ {:>10} │ {}{}",
            tx.id,
            tx.date,
            format_amount(tx.value),
            truncate(&tx.name, 40),
            tag
        );
    }

    Ok(())
}

pub async fn cmd_tx_add(
    ctx: &Ctx,
    name: &str,
    value: f64,
    date: Option<NaiveDate>,
    tag: Option<i64>,
) -> Result<()> {
    let session = ctx.session().await?;
    let created = session
        .client()
        .create_transaction(&Transaction {
            id: 0,
            tag_name: String::new(),
            date: date.unwrap_or_else(|| Utc::now().date_naive()),
            name: name.to_string(),
            value,
            month: None,
            month_date: None,
            bank: Some(false),
            identifier: None,
            user: None,
            credential: None,
            tag,
            extra: Map::new(),
        })
        .await?;

    if ctx.json {
        return print_json(&created);
    }
    println!(
        "Recorded #{}: {} {} on {}",
        created.id,
        created.name,
        format_amount(created.value),
        created.date
    );
    Ok(())
}

pub async fn cmd_tx_rm(ctx: &Ctx, id: i64) -> Result<()> {
    let session = ctx.session().await?;
    session.client().delete_transaction(id).await?;
    println!("Deleted transaction #{}", id);
    Ok(())
}

pub async fn cmd_recurring_list(ctx: &Ctx) -> Result<()> {
    let session = ctx.session().await?;
    let recurring = session.client().list_recurring_transactions().await?;

    if ctx.json {
        return print_json(&recurring);
    }

    if recurring.is_empty() {
        println!("No recurring transactions.");
        return Ok(());
    }

    println!();
    println!("🔁 Recurring Transactions");
    println!("   ─────────────────────────────────────────────────────────────");

    for item in recurring {
        println!(
            "   #{:<4} {} │ {:>10} │ {}",
            item.id,
            item.date,
            format_amount(item.value),
            truncate(&item.name, 40)
        );
    }

    Ok(())
}

pub async fn cmd_recurring_add(
    ctx: &Ctx,
    name: &str,
    value: f64,
    date: Option<NaiveDate>,
) -> Result<()> {
    let session = ctx.session().await?;
    let created = session
        .client()
        .create_recurring_transaction(&RecurringTransaction {
            id: 0,
            name: name.to_string(),
            date: date.unwrap_or_else(|| Utc::now().date_naive()),
            value,
            user: None,
            credential: None,
            extra: Map::new(),
        })
        .await?;

    if ctx.json {
        return print_json(&created);
    }
    println!("Created recurring #{}: {}", created.id, created.name);
    Ok(())
}

pub async fn cmd_recurring_rm(ctx: &Ctx, id: i64) -> Result<()> {
    let session = ctx.session().await?;
    session.client().delete_recurring_transaction(id).await?;
    println!("Deleted recurring #{}", id);
    Ok(())
}
