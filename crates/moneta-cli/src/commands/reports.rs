//! Dashboard report command implementations

use anyhow::Result;

use super::{format_amount, print_json, Ctx};

pub async fn cmd_report_summary(ctx: &Ctx) -> Result<()> {
    let session = ctx.session().await?;
    let client = session.client();

    let widgets = client.summary_widgets().await?;
    let tracking = client.month_tracking().await?;

    if ctx.json {
        return print_json(&widgets);
    }

    println!();
    println!("📊 Summary ({})", tracking.text);
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Months tracked:        {}", widgets.number_of_months);
    println!(
        "   Average income:        {}",
        format_amount(widgets.average_income)
    );
    println!(
        "   Average expenses:      {}",
        format_amount(-widgets.average_expenses.abs())
    );
    println!(
        "   Average bank expenses: {}",
        format_amount(-widgets.average_bank_expenses.abs())
    );
    Ok(())
}

pub async fn cmd_report_month(ctx: &Ctx) -> Result<()> {
    let session = ctx.session().await?;
    let category = session.client().month_category().await?;

    if ctx.json {
        return print_json(&category);
    }

    println!();
    println!("📅 Current Month - {}", category.category);
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   Spent {} of a {} goal ({:.0}%)",
        format_amount(-category.value.abs()),
        category.goal,
        category.percent
    );
    Ok(())
}

pub async fn cmd_report_total(ctx: &Ctx) -> Result<()> {
    let session = ctx.session().await?;
    let totals = session.client().total_month_expenses().await?;

    if ctx.json {
        return print_json(&totals);
    }

    println!();
    println!("💸 Month-to-date Expenses");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Total:          {}", format_amount(-totals.value.abs()));
    println!(
        "   Moving average: {}",
        format_amount(-totals.moving_average.abs())
    );
    println!("   Status:         {}", totals.text);
    Ok(())
}
