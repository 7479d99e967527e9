//! Tag command implementations

use anyhow::Result;
use serde_json::Map;

use moneta_core::models::{Tag, TagKind};

use super::{print_json, Ctx};

pub async fn cmd_tags_list(ctx: &Ctx) -> Result<()> {
    let session = ctx.session().await?;
    let tags = session.client().list_tags().await?;

    if ctx.json {
        return print_json(&tags);
    }

    if tags.is_empty() {
        println!("No tags yet. Create one with:");
        println!("  moneta tags add Groceries --expense");
        return Ok(());
    }

    println!();
    println!("🏷️  Tags");
    println!("   ─────────────────────────────────────────────────────────────");

    for tag in tags {
        let kind = tag
            .kind
            .map(|k| format!(" ({})", k))
            .unwrap_or_default();
        let marker = if tag.expense.unwrap_or(false) {
            "expense"
        } else {
            "income"
        };
        println!("   #{:<4} {} [{}]{}", tag.id, tag.name, marker, kind);
    }

    Ok(())
}

pub async fn cmd_tags_add(ctx: &Ctx, name: &str, expense: bool, kind: Option<&str>) -> Result<()> {
    let kind = kind
        .map(|k| k.parse::<TagKind>().map_err(anyhow::Error::msg))
        .transpose()?;

    let session = ctx.session().await?;
    let created = session
        .client()
        .create_tag(&Tag {
            id: 0,
            key: None,
            name: name.to_string(),
            expense: Some(expense),
            kind,
            user: None,
            extra: Map::new(),
        })
        .await?;

    if ctx.json {
        return print_json(&created);
    }
    println!("Created tag #{}: {}", created.id, created.name);
    Ok(())
}

pub async fn cmd_tags_rm(ctx: &Ctx, id: i64) -> Result<()> {
    let session = ctx.session().await?;
    session.client().delete_tag(id).await?;
    println!("Deleted tag #{}", id);
    Ok(())
}
