//! # Derived Totals
//!
//! Applies markups, overhead, discount and tax to a base estimate.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  EstimateResult { labor, material }  +  AdjustmentParameters            │
//! │                                                                         │
//! │  materialExtrasTotal = Σ extras.cost                                    │
//! │  adjustedMaterial    = material + materialExtrasTotal                   │
//! │  markupLabor         = labor            × (1 + laborMarkup%)            │
//! │  markupMaterial      = adjustedMaterial × (1 + materialMarkup%)         │
//! │  subtotal            = markupLabor + markupMaterial                     │
//! │  overheadAmt         = subtotal × overhead%                             │
//! │  subWithOverhead     = subtotal + overheadAmt                           │
//! │  discountAmt         = subWithOverhead × discount%                      │
//! │  taxBase             = subWithOverhead − discountAmt                    │
//! │  taxAmt              = taxBase × tax%                                   │
//! │  grandTotal          = taxBase + taxAmt                                 │
//! │                                                                         │
//! │  rangeLow / rangeHigh = grandTotal × (1 ∓ band)                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every line is rounded with `round2` before the next line reads it. The
//! result is recomputed from scratch whenever an input changes.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::estimate::EstimateResult;
use crate::money::round2_or_zero as r2;
use crate::types::ConfidenceBand;

// =============================================================================
// Inputs
// =============================================================================

/// A named material cost added on top of the per-area material estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MaterialExtra {
    pub name: String,
    pub cost: f64,
}

impl MaterialExtra {
    pub fn new(name: impl Into<String>, cost: f64) -> Self {
        MaterialExtra {
            name: name.into(),
            cost,
        }
    }
}

/// Percentages and extras applied to a base estimate.
///
/// Percentages are independent of each other and are not capped at 100.
/// `Default` is all zeros, which leaves the estimate unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct AdjustmentParameters {
    pub labor_markup_pct: f64,
    pub material_markup_pct: f64,
    pub overhead_pct: f64,
    pub discount_pct: f64,
    pub tax_pct: f64,
    pub material_extras: Vec<MaterialExtra>,
}

impl AdjustmentParameters {
    /// Sum of the extras, rounded. Non-finite costs count as zero.
    pub fn material_extras_total(&self) -> f64 {
        let sum: f64 = self
            .material_extras
            .iter()
            .map(|extra| if extra.cost.is_finite() { extra.cost } else { 0.0 })
            .sum();
        r2(sum)
    }
}

// =============================================================================
// Output
// =============================================================================

/// Every intermediate of the totals pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DerivedTotals {
    pub material_extras_total: f64,
    pub adjusted_material: f64,
    pub markup_labor: f64,
    pub markup_material: f64,
    pub subtotal: f64,
    pub overhead_amt: f64,
    pub sub_with_overhead: f64,
    pub discount_amt: f64,
    pub tax_base: f64,
    pub tax_amt: f64,
    pub grand_total: f64,
    /// `labor + adjustedMaterial`, before any markup.
    pub base_cost: f64,
    /// How much the markups added: `subtotal - baseCost`.
    pub markup_delta: f64,
    /// Fraction used for the range (`0.1`, `0.15` or `0.2`).
    pub confidence_band: f64,
    pub range_low: f64,
    pub range_high: f64,
}

// =============================================================================
// Derivation
// =============================================================================

/// Derives the adjusted totals for `estimate`.
///
/// `quality_tier` only selects the confidence band. Never fails; an
/// overflowing intermediate becomes zero.
///
/// ## Example
/// ```rust
/// use quickquote_core::estimate::compute_estimate;
/// use quickquote_core::rates::RateTable;
/// use quickquote_core::totals::{derive_totals, AdjustmentParameters};
///
/// let rates = RateTable::builtin().unwrap();
/// let estimate = compute_estimate(&rates, 100.0, "Bathroom Remodel", "Medium", "US").unwrap();
///
/// let totals = derive_totals(&estimate, &AdjustmentParameters::default(), "Medium");
/// assert_eq!(totals.grand_total, 6500.0);
/// ```
pub fn derive_totals(
    estimate: &EstimateResult,
    params: &AdjustmentParameters,
    quality_tier: &str,
) -> DerivedTotals {
    let material_extras_total = params.material_extras_total();
    let adjusted_material = r2(estimate.material + material_extras_total);

    let markup_labor = r2(estimate.labor * (1.0 + params.labor_markup_pct / 100.0));
    let markup_material = r2(adjusted_material * (1.0 + params.material_markup_pct / 100.0));
    let subtotal = r2(markup_labor + markup_material);

    let overhead_amt = r2(subtotal * (params.overhead_pct / 100.0));
    let sub_with_overhead = r2(subtotal + overhead_amt);

    let discount_amt = r2(sub_with_overhead * (params.discount_pct / 100.0));
    let tax_base = r2(sub_with_overhead - discount_amt);

    let tax_amt = r2(tax_base * (params.tax_pct / 100.0));
    let grand_total = r2(tax_base + tax_amt);

    let base_cost = r2(estimate.labor + adjusted_material);
    let markup_delta = r2(subtotal - base_cost);

    let band = ConfidenceBand::for_quality(quality_tier).fraction();
    let range_low = r2(grand_total * (1.0 - band));
    let range_high = r2(grand_total * (1.0 + band));

    debug!(subtotal, grand_total, range_low, range_high, "Derived totals");

    DerivedTotals {
        material_extras_total,
        adjusted_material,
        markup_labor,
        markup_material,
        subtotal,
        overhead_amt,
        sub_with_overhead,
        discount_amt,
        tax_base,
        tax_amt,
        grand_total,
        base_cost,
        markup_delta,
        confidence_band: band,
        range_low,
        range_high,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
