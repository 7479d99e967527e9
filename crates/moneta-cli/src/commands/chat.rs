//! Finance agent conversation commands

use anyhow::Result;

use moneta_core::models::{ChatMessage, MessagePayload, Sender};
use moneta_core::ChatService;

use super::{print_json, Ctx};

pub async fn cmd_chat_send(ctx: &Ctx, text: &str) -> Result<()> {
    let session = ctx.session().await?;
    let chat = ChatService::new(session.client().clone());
    let reply = chat.send_message(text).await?;

    if ctx.json {
        return print_json(&reply);
    }
    print_message(&reply);
    Ok(())
}

pub async fn cmd_chat_history(ctx: &Ctx) -> Result<()> {
    let session = ctx.session().await?;
    let chat = ChatService::new(session.client().clone());
    let history = chat.fetch_history().await?;

    if ctx.json {
        return print_json(&history);
    }

    if history.is_empty() {
        println!("No conversation yet. Say hello with:");
        println!("  moneta chat send \"hello\"");
        return Ok(());
    }

    println!();
    println!("💬 Conversation");
    println!("   ─────────────────────────────────────────────────────────────");
    for message in &history {
        print_message(message);
    }
    Ok(())
}

fn print_message(message: &ChatMessage) {
    let who = match message.sender {
        Sender::User => "you",
        Sender::Agent => "agent",
    };
    match &message.payload {
        MessagePayload::Text(text) => println!("   {:>5} │ {}", who, text.text),
        MessagePayload::Image(image) => {
            let target = image
                .url
                .as_deref()
                .or(image.chart_url.as_deref())
                .unwrap_or("<no url>");
            println!("   {:>5} │ [image] {}", who, target);
        }
        MessagePayload::Buttons(buttons) => {
            println!("   {:>5} │ [options] {}", who, buttons.buttons.join(" / "))
        }
        MessagePayload::Chart(chart) => {
            if let (Some(labels), Some(values)) = (&chart.labels, &chart.values) {
                let series = labels
                    .iter()
                    .zip(values)
                    .map(|(label, value)| format!("{}: {}", label, value))
                    .collect::<Vec<_>>()
                    .join(", ");
                println!("   {:>5} │ [chart] {}", who, series);
            } else {
                println!(
                    "   {:>5} │ [chart] {}",
                    who,
                    chart.chart_url.as_deref().unwrap_or("<no data>")
                );
            }
        }
        MessagePayload::Form(form) => {
            let fields = form
                .fields
                .iter()
                .map(|f| f.label.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            println!("   {:>5} │ [form] {}", who, fields);
        }
        MessagePayload::Other { content_type, .. } => {
            println!("   {:>5} │ [{}]", who, content_type)
        }
    }
}
