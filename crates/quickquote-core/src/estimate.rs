//! # Estimate Engine
//!
//! Turns a room size and three rate table keys into a rounded
//! labor / material / total breakdown.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  compute_estimate(area, project, quality, location)                     │
//! │                                                                         │
//! │  area finite and > 0? ──── no ───► CoreError::InvalidArea               │
//! │       │                                                                 │
//! │  projects[project]? ────── no ───► CoreError::UnknownProjectType        │
//! │       │                                                                 │
//! │  quality_mul  = qualityMultipliers[quality]  or 1                       │
//! │  (loc_mul, currency) = locationMultipliers[location] or (1, "USD")      │
//! │       │                                                                 │
//! │  labor    = round2(laborPerArea    × area × quality_mul × loc_mul)      │
//! │  material = round2(materialPerArea × area × quality_mul × loc_mul)      │
//! │  total    = round2(labor + material)   ← sums the ROUNDED parts         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine is a pure function: no state, no I/O, same input → same bits.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::round2;
use crate::rates::RateTable;

// =============================================================================
// Input
// =============================================================================

/// One estimate request. The area is in square feet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateInput {
    pub area: f64,
    pub project_type: String,
    pub quality_tier: String,
    pub location_name: String,
}

impl EstimateInput {
    pub fn new(
        area: f64,
        project_type: impl Into<String>,
        quality_tier: impl Into<String>,
        location_name: impl Into<String>,
    ) -> Self {
        EstimateInput {
            area,
            project_type: project_type.into(),
            quality_tier: quality_tier.into(),
            location_name: location_name.into(),
        }
    }

    /// Runs the engine against `rates`.
    pub fn compute(&self, rates: &RateTable) -> CoreResult<EstimateResult> {
        compute_estimate(
            rates,
            self.area,
            &self.project_type,
            &self.quality_tier,
            &self.location_name,
        )
    }
}

// =============================================================================
// Result
// =============================================================================

/// A rounded cost breakdown.
///
/// ## Invariant
/// `total == round2(labor + material)` where `labor` and `material` are
/// already rounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct EstimateResult {
    pub labor: f64,
    pub material: f64,
    pub total: f64,
    /// ISO 4217 code of the location; `"USD"` for flat entries.
    #[serde(alias = "currency")]
    pub currency_code: String,
}

// =============================================================================
// Engine
// =============================================================================

/// Computes the base estimate.
///
/// ## Errors
/// - [`CoreError::InvalidArea`] if `area` is not finite or `<= 0`
/// - [`CoreError::UnknownProjectType`] if `project_type` has no rates
///
/// An unknown quality tier or location is NOT an error: it uses a
/// multiplier of `1` (and `USD` for the location).
///
/// ## Example
/// ```rust
/// use quickquote_core::estimate::compute_estimate;
/// use quickquote_core::rates::RateTable;
///
/// let rates = RateTable::builtin().unwrap();
/// let estimate = compute_estimate(&rates, 100.0, "Bathroom Remodel", "Medium", "US").unwrap();
///
/// assert_eq!(estimate.labor, 2500.0);
/// assert_eq!(estimate.material, 4000.0);
/// assert_eq!(estimate.total, 6500.0);
/// assert_eq!(estimate.currency_code, "USD");
/// ```
pub fn compute_estimate(
    rates: &RateTable,
    area: f64,
    project_type: &str,
    quality_tier: &str,
    location_name: &str,
) -> CoreResult<EstimateResult> {
    if !area.is_finite() || area <= 0.0 {
        return Err(CoreError::InvalidArea { area });
    }

    let project = rates
        .project(project_type)
        .ok_or_else(|| CoreError::UnknownProjectType(project_type.to_string()))?;

    let quality_mul = rates.quality_multiplier(quality_tier);
    let (location_mul, currency_code) = rates.resolve_location(location_name);

    let labor_raw = project.labor_per_area * area;
    let material_raw = project.material_per_area * area;

    let labor = round2(labor_raw * quality_mul * location_mul);
    let material = round2(material_raw * quality_mul * location_mul);
    let total = round2(labor + material);

    debug!(
        area,
        project_type,
        quality_tier,
        location_name,
        labor,
        material,
        total,
        currency_code,
        "Computed estimate"
    );

    Ok(EstimateResult {
        labor,
        material,
        total,
        currency_code: currency_code.to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn rates() -> RateTable {
        RateTable::builtin().unwrap()
    }

    #[test]
    fn test_bathroom_remodel_medium_us() {
        let estimate = compute_estimate(&rates(), 100.0, "Bathroom Remodel", "Medium", "US").unwrap();

        assert_eq!(estimate.labor, 2500.0);
        assert_eq!(estimate.material, 4000.0);
        assert_eq!(estimate.total, 6500.0);
        assert_eq!(estimate.currency_code, "USD");
    }

    #[test]
    fn test_rich_location_multiplier_and_currency() {
        // US baseline 6500 × 0.8 = 5200
        let estimate =
            compute_estimate(&rates(), 100.0, "Bathroom Remodel", "Medium", "Ghana").unwrap();

        assert_eq!(estimate.total, 5200.0);
        assert_eq!(estimate.currency_code, "GHS");
        assert_eq!(estimate.total, round2(estimate.labor + estimate.material));
    }

    #[test]
    fn test_flooring_high_quality() {
        // 22 × 60 × 1.25 = 1650, 35 × 60 × 1.25 = 2625
        let estimate = compute_estimate(&rates(), 60.0, "Flooring", "High", "US").unwrap();

        assert_eq!(estimate.labor, 1650.0);
        assert_eq!(estimate.material, 2625.0);
        assert_eq!(estimate.total, 4275.0);
    }

    #[test]
    fn test_invalid_area() {
        for area in [0.0, -5.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = compute_estimate(&rates(), area, "Painting", "Low", "US").unwrap_err();
            assert!(matches!(err, CoreError::InvalidArea { .. }), "area {area}");
        }
    }

    #[test]
    fn test_area_checked_before_project() {
        let err = compute_estimate(&rates(), 0.0, "UnknownThing", "Low", "US").unwrap_err();
        assert!(matches!(err, CoreError::InvalidArea { .. }));
    }

    #[test]
    fn test_unknown_project_type() {
        let err = compute_estimate(&rates(), 50.0, "UnknownThing", "Low", "US").unwrap_err();
        assert!(matches!(err, CoreError::UnknownProjectType(ref p) if p == "UnknownThing"));
    }

    #[test]
    fn test_unknown_quality_and_location_are_neutral() {
        let baseline = compute_estimate(&rates(), 100.0, "Bathroom Remodel", "Medium", "US").unwrap();
        let lenient =
            compute_estimate(&rates(), 100.0, "Bathroom Remodel", "Platinum", "Atlantis").unwrap();

        assert_eq!(lenient, baseline);
        assert_eq!(lenient.currency_code, "USD");
    }

    #[test]
    fn test_location_scales_linearly() {
        let json = r#"{
            "projects": { "Bathroom Remodel": { "laborPerArea": 25, "materialPerArea": 40 } },
            "qualityMultipliers": { "Medium": 1 },
            "locationMultipliers": {
                "Base": { "multiplier": 1, "currencyCode": "EUR" },
                "Half": { "multiplier": 0.5, "currencyCode": "EUR" },
                "Double": { "multiplier": 2, "currencyCode": "EUR" }
            }
        }"#;
        let rates = RateTable::from_json(json).unwrap();

        let base = compute_estimate(&rates, 100.0, "Bathroom Remodel", "Medium", "Base").unwrap();
        let half = compute_estimate(&rates, 100.0, "Bathroom Remodel", "Medium", "Half").unwrap();
        let double = compute_estimate(&rates, 100.0, "Bathroom Remodel", "Medium", "Double").unwrap();

        assert_eq!(base.total, 6500.0);
        assert_eq!(half.total, 3250.0);
        assert_eq!(double.total, 13000.0);
        assert_eq!(double.currency_code, "EUR");
    }

    #[test]
    fn test_results_are_rounded_to_cents() {
        let estimate = compute_estimate(&rates(), 33.0, "Painting", "Low", "US").unwrap();

        for value in [estimate.labor, estimate.material, estimate.total] {
            assert!(value.is_finite());
            assert_eq!(round2(value), value);
        }
        assert_eq!(estimate.total, round2(estimate.labor + estimate.material));
    }

    #[test]
    fn test_total_sums_rounded_parts() {
        let json = r#"{
            "projects": {
                "Grout": { "laborPerArea": 0.005, "materialPerArea": 0.005 },
                "Caulk": { "laborPerArea": 0.125, "materialPerArea": 0.125 }
            },
            "qualityMultipliers": { "Medium": 1 },
            "locationMultipliers": { "US": 1 }
        }"#;
        let rates = RateTable::from_json(json).unwrap();

        // 0.005 + 0.005 rounded once would be 0.01
        let grout = compute_estimate(&rates, 1.0, "Grout", "Medium", "US").unwrap();
        assert_eq!(grout.labor, 0.01);
        assert_eq!(grout.material, 0.01);
        assert_eq!(grout.total, 0.02);

        // 0.375 + 0.375 rounded once would be 0.75
        let caulk = compute_estimate(&rates, 3.0, "Caulk", "Medium", "US").unwrap();
        assert_eq!(caulk.labor, 0.38);
        assert_eq!(caulk.material, 0.38);
        assert_eq!(caulk.total, 0.76);
    }

    #[test]
    fn test_idempotent() {
        let first = compute_estimate(&rates(), 137.5, "Kitchen Remodel", "High", "UK").unwrap();
        let second = compute_estimate(&rates(), 137.5, "Kitchen Remodel", "High", "UK").unwrap();

        assert_eq!(first.labor.to_bits(), second.labor.to_bits());
        assert_eq!(first.material.to_bits(), second.material.to_bits());
        assert_eq!(first.total.to_bits(), second.total.to_bits());
        assert_eq!(first.currency_code, second.currency_code);
    }

    #[test]
    fn test_estimate_input_compute() {
        let input = EstimateInput::new(10.0, "Painting", "Medium", "Ghana");
        let estimate = input.compute(&rates()).unwrap();
        assert_eq!(estimate.currency_code, "GHS");
    }

    #[test]
    fn test_result_serializes_flat() {
        let estimate = compute_estimate(&rates(), 100.0, "Bathroom Remodel", "Medium", "US").unwrap();
        let value = serde_json::to_value(&estimate).unwrap();

        assert_eq!(value["labor"], 2500.0);
        assert_eq!(value["currencyCode"], "USD");
        assert!(value.as_object().unwrap().values().all(|v| !v.is_object()));
    }
}
