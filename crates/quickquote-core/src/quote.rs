//! # Quote Form Model
//!
//! Everything the user has entered for one quote, plus the saved forms of
//! it: drafts (work in progress) and history records (finished quotes).
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Draft ──apply_draft()──►┌──────────────┐◄──apply_record()── QuoteRecord │
//! │                          │ QuoteInputs  │                               │
//! │  Draft ◄──to_draft()─────└──────┬───────┘                               │
//! │                                 │ calculate()                           │
//! │                                 ▼                                       │
//! │             to square feet → compute_estimate → derive_totals           │
//! │                                 │                                       │
//! │                                 ▼                                       │
//! │                              Quote ──QuoteRecord::new()──► QuoteHistory │
//! │                                                           (newest 5)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Restoring
//! Saved payloads may come from older builds or be hand-edited. Restoring
//! applies a field only when it is valid against the current rate table;
//! other fields keep their current value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::CoreResult;
use crate::estimate::{compute_estimate, EstimateResult};
use crate::lenient;
use crate::materials::{new_id, MaterialAddition, StoredMaterial};
use crate::money::round2;
use crate::normalize::ROOM_SIZE_BOUNDS;
use crate::rates::RateTable;
use crate::totals::{derive_totals, AdjustmentParameters, DerivedTotals};
use crate::types::{AreaUnit, ClientSnapshot, CurrencyMode, Role};
use crate::{
    DEFAULT_DISCOUNT_PCT, DEFAULT_LABOR_MARKUP_PCT, DEFAULT_LOCATION, DEFAULT_MATERIAL_MARKUP_PCT,
    DEFAULT_OVERHEAD_PCT, DEFAULT_QUALITY, DEFAULT_ROOM_SIZE, DEFAULT_TAX_PCT, MAX_HISTORY_ENTRIES,
};

// =============================================================================
// Quote Inputs
// =============================================================================

/// The full quote form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteInputs {
    pub role: Role,
    pub project_type: String,
    pub quality: String,
    pub location: String,
    pub unit: AreaUnit,
    /// Room size in `unit`.
    pub size: f64,
    pub currency_mode: CurrencyMode,
    pub labor_markup_pct: f64,
    pub material_markup_pct: f64,
    pub overhead_pct: f64,
    pub discount_pct: f64,
    pub tax_pct: f64,
    pub material_additions: Vec<MaterialAddition>,
    pub client: ClientSnapshot,
}

impl QuoteInputs {
    /// A blank form for `rates`.
    ///
    /// Project is the first in the table. Quality and location prefer
    /// `Medium` and `US`, else the first key.
    pub fn with_defaults(rates: &RateTable) -> Self {
        QuoteInputs {
            role: Role::default(),
            project_type: rates
                .projects()
                .next()
                .map(|(name, _)| name.to_string())
                .unwrap_or_default(),
            quality: preferred_or_first(rates.quality_tiers().map(|(k, _)| k), DEFAULT_QUALITY),
            location: preferred_or_first(rates.locations().map(|(k, _)| k), DEFAULT_LOCATION),
            unit: AreaUnit::default(),
            size: DEFAULT_ROOM_SIZE,
            currency_mode: CurrencyMode::default(),
            labor_markup_pct: DEFAULT_LABOR_MARKUP_PCT,
            material_markup_pct: DEFAULT_MATERIAL_MARKUP_PCT,
            overhead_pct: DEFAULT_OVERHEAD_PCT,
            discount_pct: DEFAULT_DISCOUNT_PCT,
            tax_pct: DEFAULT_TAX_PCT,
            material_additions: Vec::new(),
            client: ClientSnapshot::default(),
        }
    }

    /// Room size converted to square feet.
    pub fn area_sq_ft(&self) -> f64 {
        self.unit.to_square_feet(self.size)
    }

    /// Percentages and material lines in the shape `derive_totals` reads.
    pub fn adjustments(&self) -> AdjustmentParameters {
        AdjustmentParameters {
            labor_markup_pct: self.labor_markup_pct,
            material_markup_pct: self.material_markup_pct,
            overhead_pct: self.overhead_pct,
            discount_pct: self.discount_pct,
            tax_pct: self.tax_pct,
            material_extras: self
                .material_additions
                .iter()
                .map(MaterialAddition::to_extra)
                .collect(),
        }
    }

    /// Runs the full pipeline.
    ///
    /// ## Errors
    /// Whatever [`compute_estimate`] returns for this area and project.
    pub fn calculate(&self, rates: &RateTable) -> CoreResult<Quote> {
        let area_sq_ft = self.area_sq_ft();
        let estimate = compute_estimate(
            rates,
            area_sq_ft,
            &self.project_type,
            &self.quality,
            &self.location,
        )?;
        let totals = derive_totals(&estimate, &self.adjustments(), &self.quality);
        let display_currency = self.currency_mode.resolve(&estimate.currency_code).to_string();

        Ok(Quote {
            area_sq_ft,
            estimate,
            totals,
            display_currency,
        })
    }

    // -------------------------------------------------------------------------
    // Drafts
    // -------------------------------------------------------------------------

    /// Snapshot of the form for later restore.
    pub fn to_draft(&self, now: DateTime<Utc>) -> Draft {
        Draft {
            ts: Some(now.timestamp_millis()),
            role: Some(self.role.to_string()),
            project_type: Some(self.project_type.clone()),
            quality: Some(self.quality.clone()),
            location: Some(self.location.clone()),
            unit: Some(unit_code(self.unit).to_string()),
            size_input: Some(self.size),
            currency_mode: Some(self.currency_mode.to_string()),
            overhead_pct: Some(self.overhead_pct),
            tax_pct: Some(self.tax_pct),
            discount_pct: Some(self.discount_pct),
            labor_markup_pct: Some(self.labor_markup_pct),
            material_markup_pct: Some(self.material_markup_pct),
            material_additions: Some(
                self.material_additions
                    .iter()
                    .map(|a| StoredMaterial {
                        entry_id: Some(a.entry_id.clone()),
                        id: Some(a.favorite_id.clone()),
                        name: Some(a.name.clone()),
                        cost: Some(a.cost),
                    })
                    .collect(),
            ),
            client: Some(self.client.clone()),
        }
    }

    /// Restores the valid fields of `draft`. Returns the names of fields
    /// that were present but rejected.
    pub fn apply_draft(&mut self, draft: &Draft, rates: &RateTable) -> Vec<&'static str> {
        let mut rejected = Vec::new();

        if let Some(role) = &draft.role {
            match role.parse() {
                Ok(role) => self.role = role,
                Err(_) => rejected.push("role"),
            }
        }
        self.restore_names(
            draft.project_type.as_deref(),
            draft.quality.as_deref(),
            draft.location.as_deref(),
            rates,
            &mut rejected,
        );
        if let Some(unit) = &draft.unit {
            match unit.as_str() {
                "sqft" => self.unit = AreaUnit::SqFt,
                "sqm" => self.unit = AreaUnit::SqM,
                _ => rejected.push("unit"),
            }
        }
        if let Some(size) = draft.size_input {
            self.size = ROOM_SIZE_BOUNDS.clamp(size);
        }
        if let Some(mode) = &draft.currency_mode {
            match mode.parse() {
                Ok(mode) => self.currency_mode = mode,
                Err(_) => rejected.push("currencyMode"),
            }
        }
        self.restore_percentages(
            [
                draft.labor_markup_pct,
                draft.material_markup_pct,
                draft.overhead_pct,
                draft.discount_pct,
                draft.tax_pct,
            ],
        );

        if let Some(additions) = &draft.material_additions {
            self.material_additions = additions
                .iter()
                .cloned()
                .filter_map(StoredMaterial::into_addition)
                .collect();
        }
        if let Some(client) = &draft.client {
            self.client = client.clone();
        }

        debug!(?rejected, "Applied draft");
        rejected
    }

    /// Restores a saved quote. The record's currency becomes a fixed
    /// display currency.
    pub fn apply_record(&mut self, record: &QuoteRecord, rates: &RateTable) -> Vec<&'static str> {
        let mut rejected = Vec::new();

        self.role = record.role;
        self.restore_names(
            Some(&record.project_type),
            Some(&record.quality),
            Some(&record.location),
            rates,
            &mut rejected,
        );
        self.unit = record.unit;
        if record.size.is_finite() {
            self.size = ROOM_SIZE_BOUNDS.clamp(record.size);
        }
        match record.currency.parse::<CurrencyMode>() {
            Ok(CurrencyMode::Fixed(code)) => self.currency_mode = CurrencyMode::Fixed(code),
            _ => rejected.push("currency"),
        }
        self.restore_percentages(
            [
                record.labor_markup_pct,
                record.material_markup_pct,
                record.overhead_pct,
                record.discount_pct,
                record.tax_pct,
            ]
            .map(Some),
        );

        debug!(id = %record.id, ?rejected, "Applied history record");
        rejected
    }

    fn restore_names(
        &mut self,
        project_type: Option<&str>,
        quality: Option<&str>,
        location: Option<&str>,
        rates: &RateTable,
        rejected: &mut Vec<&'static str>,
    ) {
        if let Some(project) = project_type {
            if rates.project(project).is_some() {
                self.project_type = project.to_string();
            } else {
                rejected.push("projectType");
            }
        }
        if let Some(quality) = quality {
            if rates.has_quality_tier(quality) {
                self.quality = quality.to_string();
            } else {
                rejected.push("quality");
            }
        }
        if let Some(location) = location {
            if rates.location(location).is_some() {
                self.location = location.to_string();
            } else {
                rejected.push("location");
            }
        }
    }

    /// Order: labor markup, material markup, overhead, discount, tax.
    fn restore_percentages(&mut self, values: [Option<f64>; 5]) {
        let targets = [
            &mut self.labor_markup_pct,
            &mut self.material_markup_pct,
            &mut self.overhead_pct,
            &mut self.discount_pct,
            &mut self.tax_pct,
        ];
        for (target, value) in targets.into_iter().zip(values) {
            if let Some(value) = value.filter(|v| v.is_finite()) {
                *target = round2(value);
            }
        }
    }
}

fn preferred_or_first<'a>(keys: impl Iterator<Item = &'a str>, preferred: &str) -> String {
    let keys: Vec<&str> = keys.collect();
    if keys.iter().any(|k| *k == preferred) {
        return preferred.to_string();
    }
    keys.first()
        .map_or_else(|| preferred.to_string(), |k| k.to_string())
}

fn unit_code(unit: AreaUnit) -> &'static str {
    match unit {
        AreaUnit::SqFt => "sqft",
        AreaUnit::SqM => "sqm",
    }
}

// =============================================================================
// Quote
// =============================================================================

/// A calculated quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub area_sq_ft: f64,
    pub estimate: EstimateResult,
    pub totals: DerivedTotals,
    /// Currency amounts are shown in. Amounts are never converted.
    pub display_currency: String,
}

// =============================================================================
// Draft
// =============================================================================

/// A saved, possibly partial, copy of the form.
///
/// Every field is optional and read leniently so one bad field does not
/// discard the rest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    /// Save time, epoch milliseconds.
    #[serde(default, deserialize_with = "lenient::value", skip_serializing_if = "Option::is_none")]
    pub ts: Option<i64>,
    #[serde(default, deserialize_with = "lenient::value", skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "lenient::value", skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::value", skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    #[serde(default, deserialize_with = "lenient::value", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient::value", skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub size_input: Option<f64>,
    #[serde(default, deserialize_with = "lenient::value", skip_serializing_if = "Option::is_none")]
    pub currency_mode: Option<String>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub overhead_pct: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub tax_pct: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub discount_pct: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub labor_markup_pct: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub material_markup_pct: Option<f64>,
    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Option::is_none")]
    pub material_additions: Option<Vec<StoredMaterial>>,
    #[serde(default, deserialize_with = "lenient::value", skip_serializing_if = "Option::is_none")]
    pub client: Option<ClientSnapshot>,
}

impl Draft {
    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        self.ts.and_then(DateTime::from_timestamp_millis)
    }
}

// =============================================================================
// History
// =============================================================================

/// Flat snapshot of a calculated quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRecord {
    /// Empty for records written before ids existed.
    #[serde(default)]
    pub id: String,
    /// Save time, epoch milliseconds.
    #[ts(type = "number")]
    pub ts: i64,
    pub role: Role,
    pub project_type: String,
    pub quality: String,
    pub location: String,
    pub unit: AreaUnit,
    pub size: f64,
    pub labor_base: f64,
    pub labor_final: f64,
    pub material_base: f64,
    pub material_extras_total: f64,
    pub material_final: f64,
    /// Grand total after every adjustment.
    pub total: f64,
    /// Engine total before adjustments.
    pub base_total: f64,
    pub currency: String,
    pub labor_markup_pct: f64,
    pub material_markup_pct: f64,
    pub overhead_pct: f64,
    pub discount_pct: f64,
    pub tax_pct: f64,
}

impl QuoteRecord {
    /// Snapshots a quote calculated from `inputs`.
    pub fn new(inputs: &QuoteInputs, quote: &Quote, now: DateTime<Utc>) -> Self {
        QuoteRecord {
            id: new_id(),
            ts: now.timestamp_millis(),
            role: inputs.role,
            project_type: inputs.project_type.clone(),
            quality: inputs.quality.clone(),
            location: inputs.location.clone(),
            unit: inputs.unit,
            size: inputs.size,
            labor_base: quote.estimate.labor,
            labor_final: quote.totals.markup_labor,
            material_base: quote.estimate.material,
            material_extras_total: quote.totals.material_extras_total,
            material_final: quote.totals.markup_material,
            total: quote.totals.grand_total,
            base_total: quote.estimate.total,
            currency: quote.display_currency.clone(),
            labor_markup_pct: inputs.labor_markup_pct,
            material_markup_pct: inputs.material_markup_pct,
            overhead_pct: inputs.overhead_pct,
            discount_pct: inputs.discount_pct,
            tax_pct: inputs.tax_pct,
        }
    }

    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.ts)
    }
}

/// Saved quotes, newest first, at most [`MAX_HISTORY_ENTRIES`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuoteHistory {
    entries: Vec<QuoteRecord>,
}

impl QuoteHistory {
    /// Wraps stored entries, keeping the newest [`MAX_HISTORY_ENTRIES`].
    /// Entries without an id are given one.
    pub fn from_entries(mut entries: Vec<QuoteRecord>) -> Self {
        entries.truncate(MAX_HISTORY_ENTRIES);
        for entry in entries.iter_mut().filter(|e| e.id.is_empty()) {
            entry.id = new_id();
        }
        QuoteHistory { entries }
    }

    /// Adds a record at the front, dropping the oldest past the cap.
    pub fn push(&mut self, record: QuoteRecord) {
        self.entries.insert(0, record);
        self.entries.truncate(MAX_HISTORY_ENTRIES);
    }

    pub fn find(&self, id: &str) -> Option<&QuoteRecord> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn entries(&self) -> &[QuoteRecord] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<QuoteRecord> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::materials::default_favorites;
    use chrono::TimeZone;
    use serde_json::json;

    fn rates() -> RateTable {
        RateTable::builtin().unwrap()
    }

    fn bathroom() -> QuoteInputs {
        QuoteInputs {
            project_type: "Bathroom Remodel".to_string(),
            ..QuoteInputs::with_defaults(&rates())
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_defaults() {
        let inputs = QuoteInputs::with_defaults(&rates());

        assert_eq!(inputs.role, Role::Homeowner);
        assert_eq!(inputs.quality, "Medium");
        assert_eq!(inputs.location, "US");
        assert_eq!(inputs.size, 100.0);
        assert_eq!(inputs.labor_markup_pct, 15.0);
        assert_eq!(inputs.material_markup_pct, 10.0);
        assert_eq!(inputs.overhead_pct, 10.0);
        assert!(rates().project(&inputs.project_type).is_some());
    }

    #[test]
    fn test_calculate_full_pipeline() {
        let quote = bathroom().calculate(&rates()).unwrap();

        assert_eq!(quote.estimate.total, 6500.0);
        assert_eq!(quote.totals.grand_total, 8002.5);
        assert_eq!(quote.display_currency, "USD");
    }

    #[test]
    fn test_calculate_square_metres() {
        let inputs = QuoteInputs {
            unit: AreaUnit::SqM,
            size: 10.0,
            ..bathroom()
        };
        let quote = inputs.calculate(&rates()).unwrap();

        assert_eq!(quote.area_sq_ft, 10.0 * crate::SQM_TO_SQFT);
        // 25 × 107.639 = 2690.975
        assert!((quote.estimate.labor - 2690.98).abs() < 0.011);
    }

    #[test]
    fn test_currency_override_only_changes_display() {
        let auto = QuoteInputs {
            location: "Ghana".to_string(),
            ..bathroom()
        };
        let fixed = QuoteInputs {
            currency_mode: CurrencyMode::Fixed("EUR".to_string()),
            ..auto.clone()
        };

        let a = auto.calculate(&rates()).unwrap();
        let f = fixed.calculate(&rates()).unwrap();

        assert_eq!(a.display_currency, "GHS");
        assert_eq!(f.display_currency, "EUR");
        assert_eq!(a.totals, f.totals);
        assert_eq!(f.estimate.currency_code, "GHS");
    }

    #[test]
    fn test_calculate_unknown_project_fails() {
        let inputs = QuoteInputs {
            project_type: "UnknownThing".to_string(),
            ..bathroom()
        };
        assert!(matches!(
            inputs.calculate(&rates()),
            Err(CoreError::UnknownProjectType(_))
        ));
    }

    #[test]
    fn test_additions_feed_totals() {
        let mut inputs = bathroom();
        let favorites = default_favorites();
        inputs.material_additions.push(MaterialAddition::from_favorite(&favorites[0]));
        inputs.material_additions.push(MaterialAddition::from_favorite(&favorites[1]));

        let quote = inputs.calculate(&rates()).unwrap();
        assert_eq!(quote.totals.material_extras_total, 80.0);
        assert_eq!(quote.totals.adjusted_material, 4080.0);
    }

    #[test]
    fn test_draft_round_trip_restores_form() {
        let mut original = bathroom();
        original.role = Role::Contractor;
        original.location = "Ghana".to_string();
        original.unit = AreaUnit::SqM;
        original.size = 42.5;
        original.currency_mode = CurrencyMode::Fixed("GHS".to_string());
        original.tax_pct = 8.25;
        original.client.name = "Kelly".to_string();
        original
            .material_additions
            .push(MaterialAddition::from_favorite(&default_favorites()[2]));

        let json = serde_json::to_string(&original.to_draft(now())).unwrap();
        let draft: Draft = serde_json::from_str(&json).unwrap();

        let mut restored = QuoteInputs::with_defaults(&rates());
        let rejected = restored.apply_draft(&draft, &rates());

        assert!(rejected.is_empty());
        assert_eq!(restored, original);
        assert_eq!(draft.saved_at(), Some(now()));
    }

    #[test]
    fn test_draft_invalid_fields_are_skipped() {
        let draft: Draft = serde_json::from_value(json!({
            "role": "Landlord",
            "projectType": "Treehouse",
            "quality": "High",
            "location": 7,
            "unit": "acres",
            "sizeInput": "250",
            "currencyMode": "Dollars",
            "overheadPct": "abc",
            "taxPct": 7.125,
            "materialAdditions": [{ "name": "Tile", "cost": 30 }, { "cost": 5 }]
        }))
        .unwrap();

        let mut inputs = bathroom();
        let rejected = inputs.apply_draft(&draft, &rates());

        assert_eq!(rejected, vec!["role", "projectType", "unit", "currencyMode"]);
        assert_eq!(inputs.role, Role::Homeowner);
        assert_eq!(inputs.project_type, "Bathroom Remodel");
        assert_eq!(inputs.quality, "High");
        assert_eq!(inputs.location, "US");
        assert_eq!(inputs.size, 250.0);
        assert_eq!(inputs.overhead_pct, 10.0);
        assert_eq!(inputs.tax_pct, 7.13);
        assert_eq!(inputs.material_additions.len(), 1);
        assert!(!inputs.material_additions[0].entry_id.is_empty());
    }

    #[test]
    fn test_apply_record() {
        let mut source = bathroom();
        source.location = "Ghana".to_string();
        source.discount_pct = 5.0;
        let quote = source.calculate(&rates()).unwrap();
        let record = QuoteRecord::new(&source, &quote, now());

        let mut inputs = QuoteInputs::with_defaults(&rates());
        let rejected = inputs.apply_record(&record, &rates());

        assert!(rejected.is_empty());
        assert_eq!(inputs.location, "Ghana");
        assert_eq!(inputs.discount_pct, 5.0);
        assert_eq!(inputs.currency_mode, CurrencyMode::Fixed("GHS".to_string()));
    }

    #[test]
    fn test_record_snapshot() {
        let inputs = bathroom();
        let quote = inputs.calculate(&rates()).unwrap();
        let record = QuoteRecord::new(&inputs, &quote, now());

        assert_eq!(record.labor_base, 2500.0);
        assert_eq!(record.labor_final, 2875.0);
        assert_eq!(record.material_final, 4400.0);
        assert_eq!(record.total, 8002.5);
        assert_eq!(record.base_total, 6500.0);
        assert_eq!(record.saved_at(), Some(now()));

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["ts"], now().timestamp_millis());
        assert_eq!(value["projectType"], "Bathroom Remodel");
        assert_eq!(value["unit"], "sqft");
    }

    #[test]
    fn test_history_keeps_newest_five() {
        let inputs = bathroom();
        let quote = inputs.calculate(&rates()).unwrap();
        let mut history = QuoteHistory::default();

        let mut ids = Vec::new();
        for _ in 0..7 {
            let record = QuoteRecord::new(&inputs, &quote, now());
            ids.push(record.id.clone());
            history.push(record);
        }

        assert_eq!(history.len(), MAX_HISTORY_ENTRIES);
        assert_eq!(history.entries()[0].id, ids[6]);
        assert_eq!(history.entries()[4].id, ids[2]);
        assert!(history.find(&ids[0]).is_none());
        assert!(history.find(&ids[5]).is_some());
    }

    #[test]
    fn test_legacy_records_get_ids() {
        let legacy = json!([{
            "ts": 1714564800000_i64, "role": "Homeowner", "projectType": "Painting",
            "quality": "Low", "location": "US", "unit": "sqft", "size": 10,
            "laborBase": 25, "laborFinal": 25, "materialBase": 12.5,
            "materialExtrasTotal": 0, "materialFinal": 12.5, "total": 37.5,
            "baseTotal": 37.5, "currency": "USD", "laborMarkupPct": 0,
            "materialMarkupPct": 0, "overheadPct": 0, "discountPct": 0, "taxPct": 0
        }]);
        let entries: Vec<QuoteRecord> = serde_json::from_value(legacy).unwrap();
        let history = QuoteHistory::from_entries(entries);

        assert_eq!(history.len(), 1);
        assert!(!history.entries()[0].id.is_empty());
    }
}
