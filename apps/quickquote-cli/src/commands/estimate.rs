//! # `quickquote estimate`
//!
//! ```text
//! config defaults ──► draft (--from-draft) or saved quote (--from-history)
//!                          │
//!                          ▼
//!                    explicit flags ──► QuoteInputs
//!                                           │
//!                        --save-draft ◄─────┤
//!                                           ▼
//!                                    calculate() ──► summary ──► stdout
//!                                           │                  └► --export FILE
//!                             --save ◄──────┘
//! ```
//!
//! The draft is saved before pricing, so a form that fails to price (an
//! unknown project, say) is still kept. A failed quote is never recorded.

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use quickquote_core::normalize::{COST_BOUNDS, PERCENT_BOUNDS, ROOM_SIZE_BOUNDS};
use quickquote_core::{
    render_summary, CurrencyFormatter, MaterialAddition, MaterialFavorite, Quote, QuoteInputs,
    QuoteRecord, QuoteSummary,
};

use crate::cli::{EstimateArgs, QuoteArgs};
use crate::context::Context;
use crate::error::{CliError, CliResult};
use crate::output::print_one;

pub async fn run(ctx: &Context, args: EstimateArgs) -> CliResult<()> {
    let mut inputs = ctx.new_inputs();

    if args.from_draft {
        match ctx.db().await?.drafts().load().await? {
            Some(draft) => {
                let rejected = inputs.apply_draft(&draft, &ctx.rates);
                if !rejected.is_empty() {
                    warn!(?rejected, "Ignored invalid draft fields");
                }
            }
            None => warn!("No saved draft; starting from defaults"),
        }
    }
    if let Some(id) = &args.from_history {
        let record = ctx.db().await?.history().get(id).await?;
        let rejected = inputs.apply_record(&record, &ctx.rates);
        if !rejected.is_empty() {
            warn!(?rejected, "Ignored invalid fields of saved quote");
        }
    }

    let favorites = if args.quote.favorites.is_empty() {
        Vec::new()
    } else {
        ctx.db().await?.favorites().list().await?
    };
    apply_flags(&mut inputs, &args.quote, &favorites)?;

    if args.save_draft {
        ctx.db().await?.drafts().save(&inputs.to_draft(Utc::now())).await?;
    }

    let quote = inputs.calculate(&ctx.rates)?;
    let fmt = ctx.formatter(&quote.display_currency);
    let summary = render_summary(&QuoteSummary::new(&inputs, &quote, &ctx.rates), &fmt);

    let saved_id = if args.save {
        let record = QuoteRecord::new(&inputs, &quote, Utc::now());
        let id = record.id.clone();
        ctx.db().await?.history().record(record).await?;
        Some(id)
    } else {
        None
    };

    if let Some(path) = &args.export {
        std::fs::write(path, &summary)?;
        info!(path = %path.display(), "Exported summary");
    }

    let output = EstimateOutput {
        inputs: &inputs,
        formatted: FormattedTotals::new(&quote, &fmt),
        quote: &quote,
        summary: &summary,
        saved_id,
        draft_saved: args.save_draft,
    };
    print_one(ctx.json, &output, |out| {
        let mut text = out.summary.trim_end().to_string();
        if let Some(id) = &out.saved_id {
            text.push_str(&format!("\n\nSaved to history: {id}"));
        }
        text
    })
}

/// Applies the explicit quote flags on top of `inputs`.
///
/// Numbers are sanitized rather than rejected. Names (role, unit, currency)
/// must parse. `--favorite` ids are looked up in `favorites`. Any material
/// flag replaces the material lines already on the form.
pub fn apply_flags(
    inputs: &mut QuoteInputs,
    args: &QuoteArgs,
    favorites: &[MaterialFavorite],
) -> CliResult<()> {
    if let Some(role) = &args.role {
        inputs.role = role.parse()?;
    }
    if let Some(project) = &args.project {
        inputs.project_type = project.trim().to_string();
    }
    if let Some(quality) = &args.quality {
        inputs.quality = quality.trim().to_string();
    }
    if let Some(location) = &args.location {
        inputs.location = location.trim().to_string();
    }
    if let Some(size) = &args.size {
        inputs.size = ROOM_SIZE_BOUNDS.clamp(size);
    }
    if let Some(unit) = &args.unit {
        inputs.unit = unit.parse()?;
    }
    if let Some(currency) = &args.currency {
        inputs.currency_mode = currency.parse()?;
    }

    let percentages = [
        (&args.labor_markup, &mut inputs.labor_markup_pct),
        (&args.material_markup, &mut inputs.material_markup_pct),
        (&args.overhead, &mut inputs.overhead_pct),
        (&args.discount, &mut inputs.discount_pct),
        (&args.tax, &mut inputs.tax_pct),
    ];
    for (flag, field) in percentages {
        if let Some(text) = flag {
            *field = PERCENT_BOUNDS.clamp(text);
        }
    }

    if !args.favorites.is_empty() || !args.extras.is_empty() {
        let mut additions = Vec::with_capacity(args.favorites.len() + args.extras.len());
        for id in &args.favorites {
            let favorite = favorites
                .iter()
                .find(|f| &f.id == id)
                .ok_or_else(|| CliError::not_found("Favorite", id))?;
            additions.push(MaterialAddition::from_favorite(favorite));
        }
        for extra in &args.extras {
            additions.push(parse_extra(extra)?);
        }
        inputs.material_additions = additions;
    }

    let client = &mut inputs.client;
    let fields = [
        (&args.client_name, &mut client.name),
        (&args.client_company, &mut client.company),
        (&args.client_email, &mut client.email),
        (&args.client_phone, &mut client.phone),
        (&args.client_notes, &mut client.notes),
    ];
    for (flag, field) in fields {
        if let Some(value) = flag {
            *field = value.clone();
        }
    }

    Ok(())
}

/// Parses `NAME=COST`. The last `=` splits, so names may contain one.
fn parse_extra(text: &str) -> CliResult<MaterialAddition> {
    let (name, cost) = text.rsplit_once('=').ok_or_else(|| {
        CliError::validation(format!("--extra expects NAME=COST, got '{text}'"))
    })?;
    Ok(MaterialAddition::custom(name, COST_BOUNDS.clamp(cost))?)
}

// =============================================================================
// Output
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EstimateOutput<'a> {
    inputs: &'a QuoteInputs,
    quote: &'a Quote,
    formatted: FormattedTotals,
    summary: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    saved_id: Option<String>,
    draft_saved: bool,
}

/// The main amounts as display strings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FormattedTotals {
    labor: String,
    material: String,
    subtotal: String,
    overhead: String,
    discount: String,
    tax: String,
    grand_total: String,
    range_low: String,
    range_high: String,
}

impl FormattedTotals {
    fn new(quote: &Quote, fmt: &CurrencyFormatter) -> Self {
        let t = &quote.totals;
        FormattedTotals {
            labor: fmt.format(t.markup_labor),
            material: fmt.format(t.markup_material),
            subtotal: fmt.format(t.subtotal),
            overhead: fmt.format(t.overhead_amt),
            discount: fmt.format(t.discount_amt),
            tax: fmt.format(t.tax_amt),
            grand_total: fmt.format(t.grand_total),
            range_low: fmt.format(t.range_low),
            range_high: fmt.format(t.range_high),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickquote_core::materials::default_favorites;
    use quickquote_core::{AreaUnit, CurrencyMode, RateTable, Role};

    fn blank() -> QuoteInputs {
        QuoteInputs::with_defaults(&RateTable::builtin().unwrap())
    }

    #[test]
    fn test_flags_override_form() {
        let mut inputs = blank();
        let args = QuoteArgs {
            role: Some("Contractor".to_string()),
            project: Some("Flooring".to_string()),
            location: Some("Ghana".to_string()),
            size: Some("12abc34".to_string()),
            unit: Some("sqm".to_string()),
            currency: Some("eur".to_string()),
            tax: Some("8.25".to_string()),
            overhead: Some("-5".to_string()),
            client_name: Some("Ada".to_string()),
            ..QuoteArgs::default()
        };

        apply_flags(&mut inputs, &args, &[]).unwrap();

        assert_eq!(inputs.role, Role::Contractor);
        assert_eq!(inputs.project_type, "Flooring");
        assert_eq!(inputs.location, "Ghana");
        assert_eq!(inputs.size, 1234.0);
        assert_eq!(inputs.unit, AreaUnit::SqM);
        assert_eq!(inputs.currency_mode, CurrencyMode::Fixed("EUR".to_string()));
        assert_eq!(inputs.tax_pct, 8.25);
        assert_eq!(inputs.overhead_pct, 5.0);
        assert_eq!(inputs.client.name, "Ada");
        assert_eq!(inputs.quality, "Medium");
    }

    #[test]
    fn test_size_is_clamped() {
        let mut inputs = blank();
        let args = QuoteArgs {
            size: Some("250000".to_string()),
            ..QuoteArgs::default()
        };
        apply_flags(&mut inputs, &args, &[]).unwrap();
        assert_eq!(inputs.size, 100_000.0);

        let args = QuoteArgs {
            size: Some("abc".to_string()),
            ..QuoteArgs::default()
        };
        apply_flags(&mut inputs, &args, &[]).unwrap();
        assert_eq!(inputs.size, 1.0);
    }

    #[test]
    fn test_bad_names_are_rejected() {
        for args in [
            QuoteArgs {
                role: Some("Landlord".to_string()),
                ..QuoteArgs::default()
            },
            QuoteArgs {
                unit: Some("acres".to_string()),
                ..QuoteArgs::default()
            },
            QuoteArgs {
                currency: Some("EURO".to_string()),
                ..QuoteArgs::default()
            },
        ] {
            let err = apply_flags(&mut blank(), &args, &[]).unwrap_err();
            assert_eq!(err.code, crate::error::ErrorCode::ValidationError);
        }
    }

    #[test]
    fn test_material_flags_replace_lines() {
        let mut inputs = blank();
        inputs.material_additions = vec![MaterialAddition::custom("Old", 1.0).unwrap()];
        let args = QuoteArgs {
            favorites: vec!["lvp-box".to_string()],
            extras: vec!["Tile=Grout=9.999".to_string()],
            ..QuoteArgs::default()
        };

        apply_flags(&mut inputs, &args, &default_favorites()).unwrap();

        let names: Vec<&str> = inputs
            .material_additions
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(names, vec!["Luxury Vinyl Plank (box)", "Tile=Grout"]);
        assert_eq!(inputs.material_additions[0].favorite_id, "lvp-box");
        assert_eq!(inputs.material_additions[1].cost, 10.0);
    }

    #[test]
    fn test_unknown_favorite_and_bad_extra() {
        let args = QuoteArgs {
            favorites: vec!["nope".to_string()],
            ..QuoteArgs::default()
        };
        let err = apply_flags(&mut blank(), &args, &default_favorites()).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::NotFound);

        for extra in ["NoCost", "=5"] {
            let args = QuoteArgs {
                extras: vec![extra.to_string()],
                ..QuoteArgs::default()
            };
            let err = apply_flags(&mut blank(), &args, &[]).unwrap_err();
            assert_eq!(err.code, crate::error::ErrorCode::ValidationError, "{extra}");
        }
    }

    #[test]
    fn test_formatted_totals() {
        let rates = RateTable::builtin().unwrap();
        let inputs = QuoteInputs {
            project_type: "Bathroom Remodel".to_string(),
            ..QuoteInputs::with_defaults(&rates)
        };
        let quote = inputs.calculate(&rates).unwrap();

        let formatted = FormattedTotals::new(&quote, &CurrencyFormatter::usd());
        assert_eq!(formatted.subtotal, "$7,275.00");
        assert_eq!(formatted.grand_total, "$8,002.50");
        assert_eq!(formatted.range_low, "$6,802.13");
        assert_eq!(formatted.range_high, "$9,202.88");
    }
}
