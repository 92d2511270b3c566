//! `quickquote history list | show <id> | clear`

use serde_json::json;

use quickquote_core::{CurrencyFormatter, QuoteRecord};

use crate::cli::HistoryCommand;
use crate::context::Context;
use crate::error::CliResult;
use crate::output::{print_list, print_one};

pub async fn run(ctx: &Context, command: HistoryCommand) -> CliResult<()> {
    let repo = ctx.db().await?.history();

    match command {
        HistoryCommand::List => {
            let history = repo.list().await?;
            if history.is_empty() && !ctx.json {
                println!("No saved quotes");
                return Ok(());
            }
            print_list(ctx.json, history.entries(), |record| {
                list_row(record, &ctx.formatter(&record.currency))
            })
        }
        HistoryCommand::Show { id } => {
            let record = repo.get(&id).await?;
            print_one(ctx.json, &record, |record| {
                record_details(record, &ctx.formatter(&record.currency))
            })
        }
        HistoryCommand::Clear => {
            let cleared = repo.clear().await?;
            print_one(ctx.json, &json!({ "cleared": cleared }), |_| {
                let text = if cleared { "History cleared" } else { "History was already empty" };
                text.to_string()
            })
        }
    }
}

fn saved_at(record: &QuoteRecord) -> String {
    record
        .saved_at()
        .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn list_row(record: &QuoteRecord, fmt: &CurrencyFormatter) -> String {
    format!(
        "{}  {}  {}, {} ({} {})  {}",
        record.id,
        saved_at(record),
        record.project_type,
        record.location,
        record.size,
        record.unit.label(),
        fmt.format(record.total)
    )
}

fn record_details(record: &QuoteRecord, fmt: &CurrencyFormatter) -> String {
    [
        format!("Quote {}", record.id),
        format!("Saved: {}", saved_at(record)),
        format!("Role: {}", record.role),
        format!("Project: {}", record.project_type),
        format!("Quality: {}", record.quality),
        format!("Location: {} ({})", record.location, record.currency),
        format!("Room Size: {} {}", record.size, record.unit.label()),
        format!("Labor (base): {}", fmt.format(record.labor_base)),
        format!(
            "Labor (+{}% markup): {}",
            record.labor_markup_pct,
            fmt.format(record.labor_final)
        ),
        format!("Material (base): {}", fmt.format(record.material_base)),
        format!("Material extras: {}", fmt.format(record.material_extras_total)),
        format!(
            "Material (+{}% markup): {}",
            record.material_markup_pct,
            fmt.format(record.material_final)
        ),
        format!("Overhead: {}%", record.overhead_pct),
        format!("Discount: {}%", record.discount_pct),
        format!("Tax: {}%", record.tax_pct),
        format!("Base Total: {}", fmt.format(record.base_total)),
        format!("Grand Total: {}", fmt.format(record.total)),
    ]
    .join("\n")
}
