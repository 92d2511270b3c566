//! `quickquote draft show | clear`
//!
//! `show` prints the form the draft would restore to, so fields the current
//! rate table rejects are visible as the defaults they fall back to.

use serde_json::json;
use tracing::warn;

use quickquote_core::{Draft, QuoteInputs};

use crate::cli::DraftCommand;
use crate::context::Context;
use crate::error::CliResult;
use crate::output::print_one;

pub async fn run(ctx: &Context, command: DraftCommand) -> CliResult<()> {
    let repo = ctx.db().await?.drafts();

    match command {
        DraftCommand::Show => {
            let Some(draft) = repo.load().await? else {
                return print_one(ctx.json, &json!(null), |_| "No saved draft".to_string());
            };

            let mut inputs = ctx.new_inputs();
            let rejected = inputs.apply_draft(&draft, &ctx.rates);
            if !rejected.is_empty() {
                warn!(?rejected, "Draft has fields the rate table does not accept");
            }
            print_one(ctx.json, &draft, |draft| describe(draft, &inputs))
        }
        DraftCommand::Clear => {
            let cleared = repo.clear().await?;
            print_one(ctx.json, &json!({ "cleared": cleared }), |_| {
                let text = if cleared { "Draft cleared" } else { "No saved draft" };
                text.to_string()
            })
        }
    }
}

fn describe(draft: &Draft, inputs: &QuoteInputs) -> String {
    let mut lines = vec![match draft.saved_at() {
        Some(ts) => format!("Draft saved {}", ts.format("%Y-%m-%d %H:%M")),
        None => "Draft".to_string(),
    }];
    lines.extend([
        format!("Role: {}", inputs.role),
        format!("Project: {}", inputs.project_type),
        format!("Quality: {}", inputs.quality),
        format!("Location: {}", inputs.location),
        format!("Room Size: {} {}", inputs.size, inputs.unit.label()),
        format!("Currency: {}", inputs.currency_mode),
        format!(
            "Markup: labor {}%, material {}%",
            inputs.labor_markup_pct, inputs.material_markup_pct
        ),
        format!(
            "Overhead {}%, discount {}%, tax {}%",
            inputs.overhead_pct, inputs.discount_pct, inputs.tax_pct
        ),
    ]);
    for addition in &inputs.material_additions {
        lines.push(format!("  + {}: {}", addition.name, addition.cost));
    }
    if !inputs.client.is_empty() {
        lines.push(format!("Client: {}", inputs.client.name.trim()));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use quickquote_core::{MaterialAddition, RateTable};

    #[test]
    fn test_describe() {
        let rates = RateTable::builtin().unwrap();
        let mut inputs = QuoteInputs::with_defaults(&rates);
        inputs.location = "UK".to_string();
        inputs.material_additions = vec![MaterialAddition::custom("Tile", 12.5).unwrap()];
        inputs.client.name = "  Ada ".to_string();
        let draft = inputs.to_draft(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 0).unwrap());

        let text = describe(&draft, &inputs);

        assert!(text.starts_with("Draft saved 2024-01-02 03:04"));
        assert!(text.contains("Location: UK"));
        assert!(text.contains("Currency: Auto"));
        assert!(text.contains("  + Tile: 12.5"));
        assert!(text.contains("Client: Ada"));
    }
}
