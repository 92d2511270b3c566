//! # Quote Summary
//!
//! The printable estimate: the same facts the exported document carries,
//! rendered as plain text.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::currency::CurrencyFormatter;
use crate::quote::{Quote, QuoteInputs};
use crate::rates::RateTable;
use crate::totals::MaterialExtra;
use crate::types::{AreaUnit, ClientSnapshot, Role};

/// Document title.
pub const SUMMARY_TITLE: &str = "QuickQuote Estimate";

/// Everything printed on an exported quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummary {
    pub role: Role,
    pub project_type: String,
    pub quality: String,
    pub location: String,
    pub currency: String,
    pub size: f64,
    pub unit: AreaUnit,
    pub client: ClientSnapshot,

    pub labor_base: f64,
    pub labor_markup_pct: f64,
    pub labor_final: f64,
    pub material_base: f64,
    pub materials: Vec<MaterialExtra>,
    pub material_markup_pct: f64,
    pub material_final: f64,
    pub subtotal: f64,
    pub overhead_pct: f64,
    pub overhead_amt: f64,
    pub discount_pct: f64,
    pub discount_amt: f64,
    pub tax_pct: f64,
    pub tax_amt: f64,
    pub grand_total: f64,
    pub range_low: f64,
    pub range_high: f64,

    /// Unit costs of the project, when it is in the table.
    pub labor_per_area: Option<f64>,
    pub material_per_area: Option<f64>,
}

impl QuoteSummary {
    pub fn new(inputs: &QuoteInputs, quote: &Quote, rates: &RateTable) -> Self {
        let project = rates.project(&inputs.project_type);
        let totals = &quote.totals;

        QuoteSummary {
            role: inputs.role,
            project_type: inputs.project_type.clone(),
            quality: inputs.quality.clone(),
            location: inputs.location.clone(),
            currency: quote.display_currency.clone(),
            size: inputs.size,
            unit: inputs.unit,
            client: inputs.client.trimmed(),
            labor_base: quote.estimate.labor,
            labor_markup_pct: inputs.labor_markup_pct,
            labor_final: totals.markup_labor,
            material_base: quote.estimate.material,
            materials: inputs
                .material_additions
                .iter()
                .map(|addition| addition.to_extra())
                .collect(),
            material_markup_pct: inputs.material_markup_pct,
            material_final: totals.markup_material,
            subtotal: totals.subtotal,
            overhead_pct: inputs.overhead_pct,
            overhead_amt: totals.overhead_amt,
            discount_pct: inputs.discount_pct,
            discount_amt: totals.discount_amt,
            tax_pct: inputs.tax_pct,
            tax_amt: totals.tax_amt,
            grand_total: totals.grand_total,
            range_low: totals.range_low,
            range_high: totals.range_high,
            labor_per_area: project.map(|p| p.labor_per_area),
            material_per_area: project.map(|p| p.material_per_area),
        }
    }
}

/// Renders `summary` as plain text, amounts formatted by `fmt`.
///
/// Client lines appear only for non-empty fields.
pub fn render_summary(summary: &QuoteSummary, fmt: &CurrencyFormatter) -> String {
    let money = |amount: f64| fmt.format(amount);
    let mut lines = vec![
        SUMMARY_TITLE.to_string(),
        format!("Role: {}", summary.role),
        format!("Project: {}", summary.project_type),
        format!("Quality: {}", summary.quality),
        format!("Location: {} ({})", summary.location, summary.currency),
        format!("Room Size: {} {}", summary.size, summary.unit.label()),
    ];

    let client = &summary.client;
    let client_lines: Vec<String> = [
        ("Name", &client.name),
        ("Company", &client.company),
        ("Email", &client.email),
        ("Phone", &client.phone),
        ("Notes", &client.notes),
    ]
    .into_iter()
    .filter(|(_, value)| !value.trim().is_empty())
    .map(|(label, value)| format!("{label}: {}", value.trim()))
    .collect();
    if !client_lines.is_empty() {
        lines.push(String::new());
        lines.push("Client".to_string());
        lines.extend(client_lines);
    }

    lines.push(String::new());
    lines.push("Breakdown".to_string());
    lines.push(format!("Labor (base): {}", money(summary.labor_base)));
    lines.push(format!(
        "Labor (+{}% markup): {}",
        summary.labor_markup_pct,
        money(summary.labor_final)
    ));
    lines.push(format!("Material (base): {}", money(summary.material_base)));
    for extra in &summary.materials {
        lines.push(format!("  + {}: {}", extra.name, money(extra.cost)));
    }
    lines.push(format!(
        "Material (+{}% markup): {}",
        summary.material_markup_pct,
        money(summary.material_final)
    ));
    lines.push(format!("Subtotal: {}", money(summary.subtotal)));
    lines.push(format!(
        "Overhead ({}%): {}",
        summary.overhead_pct,
        money(summary.overhead_amt)
    ));
    lines.push(format!(
        "Discount ({}%): -{}",
        summary.discount_pct,
        money(summary.discount_amt)
    ));
    lines.push(format!("Tax ({}%): {}", summary.tax_pct, money(summary.tax_amt)));
    lines.push(format!("Grand Total: {}", money(summary.grand_total)));

    lines.push(String::new());
    lines.push(format!(
        "Range: {} to {}",
        money(summary.range_low),
        money(summary.range_high)
    ));

    if let (Some(labor), Some(material)) = (summary.labor_per_area, summary.material_per_area) {
        lines.push(String::new());
        lines.push("Rates used:".to_string());
        lines.push(format!("Labor per sq ft: {labor}"));
        lines.push(format!("Material per sq ft: {material}"));
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

// =============================================================================
// Unit Tests
// =============================================================================
