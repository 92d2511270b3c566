//! # Rate Table
//!
//! Static pricing data: per-area unit costs per project type, quality tier
//! multipliers, and regional location multipliers.
//!
//! ## Document Shape
//! ```text
//! {
//!   "projects": {
//!     "Bathroom Remodel": { "laborPerArea": 25, "materialPerArea": 40 }
//!   },
//!   "qualityMultipliers": { "Low": 0.85, "Medium": 1, "High": 1.25 },
//!   "locationMultipliers": {
//!     "US": 1,                                              ← Flat
//!     "Ghana": { "multiplier": 0.8, "currencyCode": "GHS" } ← Rich
//!   }
//! }
//! ```
//!
//! Older documents use `laborPerSqFt` / `materialPerSqFt` and `currency`;
//! both spellings are accepted.
//!
//! ## Lifecycle
//! A `RateTable` is validated once when constructed and never mutated
//! afterwards. It is `Send + Sync` and can be shared freely.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::DEFAULT_CURRENCY;

/// The rate table compiled into the crate.
pub const BUILTIN_RATES_JSON: &str = include_str!("../rates.json");

// =============================================================================
// Project Rates
// =============================================================================

/// Per-area unit costs for one project type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRates {
    /// Labor cost per square foot.
    #[serde(alias = "laborPerSqFt")]
    pub labor_per_area: f64,

    /// Material cost per square foot.
    #[serde(alias = "materialPerSqFt")]
    pub material_per_area: f64,
}

// =============================================================================
// Location Entry
// =============================================================================

/// A location's cost adjustment.
///
/// Either a bare multiplier (priced in USD) or a multiplier paired with the
/// currency the location is quoted in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocationEntry {
    /// `"US": 1`
    Flat(f64),

    /// `"Ghana": { "multiplier": 0.8, "currencyCode": "GHS" }`
    Rich {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        multiplier: Option<f64>,

        #[serde(
            rename = "currencyCode",
            alias = "currency",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        currency_code: Option<String>,
    },
}

impl LocationEntry {
    /// The cost multiplier. A rich entry without one is neutral.
    pub fn multiplier(&self) -> f64 {
        match self {
            LocationEntry::Flat(m) => *m,
            LocationEntry::Rich { multiplier, .. } => multiplier.unwrap_or(1.0),
        }
    }

    /// The currency this location is quoted in.
    ///
    /// Flat entries, and rich entries without a code, quote in USD.
    pub fn currency_code(&self) -> &str {
        match self {
            LocationEntry::Flat(_) => DEFAULT_CURRENCY,
            LocationEntry::Rich { currency_code, .. } => {
                currency_code.as_deref().unwrap_or(DEFAULT_CURRENCY)
            }
        }
    }
}

// =============================================================================
// Rate Table
// =============================================================================

/// Immutable pricing data read by the estimate engine.
///
/// ## Invariants
/// - `projects`, `quality_multipliers` and `location_multipliers` are all
///   non-empty
/// - every unit cost and multiplier is positive and finite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateTable {
    projects: BTreeMap<String, ProjectRates>,
    quality_multipliers: BTreeMap<String, f64>,
    location_multipliers: BTreeMap<String, LocationEntry>,
}

impl RateTable {
    /// Creates a validated rate table.
    pub fn new(
        projects: BTreeMap<String, ProjectRates>,
        quality_multipliers: BTreeMap<String, f64>,
        location_multipliers: BTreeMap<String, LocationEntry>,
    ) -> CoreResult<Self> {
        let table = RateTable {
            projects,
            quality_multipliers,
            location_multipliers,
        };
        table.validate()?;
        Ok(table)
    }

    /// Parses and validates a JSON rate table document.
    ///
    /// ## Example
    /// ```rust
    /// use quickquote_core::rates::RateTable;
    ///
    /// let json = r#"{
    ///     "projects": { "Painting": { "laborPerSqFt": 2, "materialPerSqFt": 1 } },
    ///     "qualityMultipliers": { "Medium": 1 },
    ///     "locationMultipliers": { "US": 1 }
    /// }"#;
    /// let rates = RateTable::from_json(json).unwrap();
    /// assert!(rates.project("Painting").is_some());
    /// ```
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let table: RateTable =
            serde_json::from_str(json).map_err(|e| CoreError::InvalidRateTable {
                reason: e.to_string(),
            })?;
        table.validate()?;
        Ok(table)
    }

    /// The rate table shipped with the crate.
    pub fn builtin() -> CoreResult<Self> {
        Self::from_json(BUILTIN_RATES_JSON)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.projects.is_empty() {
            return Err(ValidationError::Required {
                field: "projects".to_string(),
            });
        }
        if self.quality_multipliers.is_empty() {
            return Err(ValidationError::Required {
                field: "qualityMultipliers".to_string(),
            });
        }
        if self.location_multipliers.is_empty() {
            return Err(ValidationError::Required {
                field: "locationMultipliers".to_string(),
            });
        }

        for (name, rates) in &self.projects {
            check_positive(&format!("projects.{name}.laborPerArea"), rates.labor_per_area)?;
            check_positive(
                &format!("projects.{name}.materialPerArea"),
                rates.material_per_area,
            )?;
        }

        for (tier, multiplier) in &self.quality_multipliers {
            check_positive(&format!("qualityMultipliers.{tier}"), *multiplier)?;
        }

        for (location, entry) in &self.location_multipliers {
            check_positive(&format!("locationMultipliers.{location}"), entry.multiplier())?;
            if let LocationEntry::Rich {
                currency_code: Some(code),
                ..
            } = entry
            {
                if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
                    return Err(ValidationError::InvalidFormat {
                        field: format!("locationMultipliers.{location}.currencyCode"),
                        reason: "must be a 3-letter currency code".to_string(),
                    });
                }
            }
        }

        Ok(())
    }

    // -------------------------------------------------------------------------
    // Lookups
    // -------------------------------------------------------------------------

    /// Unit costs for a project type, if it exists.
    pub fn project(&self, project_type: &str) -> Option<&ProjectRates> {
        self.projects.get(project_type)
    }

    /// Multiplier for a quality tier; unknown tiers are neutral (`1`).
    pub fn quality_multiplier(&self, quality_tier: &str) -> f64 {
        self.quality_multipliers
            .get(quality_tier)
            .copied()
            .unwrap_or(1.0)
    }

    /// The raw location entry, if it exists.
    pub fn location(&self, location_name: &str) -> Option<&LocationEntry> {
        self.location_multipliers.get(location_name)
    }

    /// Multiplier and currency for a location; unknown locations are
    /// neutral (`1`, `USD`).
    pub fn resolve_location(&self, location_name: &str) -> (f64, &str) {
        match self.location(location_name) {
            Some(entry) => (entry.multiplier(), entry.currency_code()),
            None => (1.0, DEFAULT_CURRENCY),
        }
    }

    pub fn has_quality_tier(&self, quality_tier: &str) -> bool {
        self.quality_multipliers.contains_key(quality_tier)
    }

    pub fn projects(&self) -> impl Iterator<Item = (&str, &ProjectRates)> {
        self.projects.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn quality_tiers(&self) -> impl Iterator<Item = (&str, f64)> {
        self.quality_multipliers.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn locations(&self) -> impl Iterator<Item = (&str, &LocationEntry)> {
        self.location_multipliers.iter().map(|(k, v)| (k.as_str(), v))
    }
}

fn check_positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::MustBePositive {
            field: field.to_string(),
            value,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_loads() {
        let rates = RateTable::builtin().unwrap();

        let bathroom = rates.project("Bathroom Remodel").unwrap();
        assert_eq!(bathroom.labor_per_area, 25.0);
        assert_eq!(bathroom.material_per_area, 40.0);

        assert_eq!(rates.quality_multiplier("Medium"), 1.0);
        assert_eq!(rates.quality_multiplier("High"), 1.25);
        assert_eq!(rates.resolve_location("US"), (1.0, "USD"));
        assert_eq!(rates.resolve_location("Ghana"), (0.8, "GHS"));
    }

    #[test]
    fn test_legacy_field_names_accepted() {
        let json = r#"{
            "projects": { "Flooring": { "laborPerSqFt": 22, "materialPerSqFt": 35 } },
            "qualityMultipliers": { "Medium": 1 },
            "locationMultipliers": { "Ghana": { "multiplier": 0.8, "currency": "GHS" } }
        }"#;
        let rates = RateTable::from_json(json).unwrap();

        assert_eq!(rates.project("Flooring").unwrap().labor_per_area, 22.0);
        assert_eq!(rates.resolve_location("Ghana"), (0.8, "GHS"));
    }

    #[test]
    fn test_unknown_lookups_are_neutral() {
        let rates = RateTable::builtin().unwrap();
        assert_eq!(rates.quality_multiplier("Platinum"), 1.0);
        assert_eq!(rates.resolve_location("Atlantis"), (1.0, "USD"));
        assert!(rates.project("UnknownThing").is_none());
    }

    #[test]
    fn test_rich_entry_defaults() {
        let entry = LocationEntry::Rich {
            multiplier: None,
            currency_code: None,
        };
        assert_eq!(entry.multiplier(), 1.0);
        assert_eq!(entry.currency_code(), "USD");
    }

    #[test]
    fn test_empty_projects_rejected() {
        let json = r#"{
            "projects": {},
            "qualityMultipliers": { "Medium": 1 },
            "locationMultipliers": { "US": 1 }
        }"#;
        let err = RateTable::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Required { ref field }) if field == "projects"
        ));
    }

    #[test]
    fn test_non_positive_multiplier_rejected() {
        let json = r#"{
            "projects": { "Painting": { "laborPerArea": 2, "materialPerArea": 1 } },
            "qualityMultipliers": { "Medium": 0 },
            "locationMultipliers": { "US": 1 }
        }"#;
        let err = RateTable::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::MustBePositive { .. })
        ));
    }

    #[test]
    fn test_bad_currency_code_rejected() {
        let json = r#"{
            "projects": { "Painting": { "laborPerArea": 2, "materialPerArea": 1 } },
            "qualityMultipliers": { "Medium": 1 },
            "locationMultipliers": { "Mars": { "multiplier": 2, "currencyCode": "MARS" } }
        }"#;
        assert!(RateTable::from_json(json).is_err());
    }

    #[test]
    fn test_malformed_json_is_reported() {
        let err = RateTable::from_json("{ not json").unwrap_err();
        assert!(matches!(err, CoreError::InvalidRateTable { .. }));
    }

    #[test]
    fn test_constructor_validates() {
        let mut projects = BTreeMap::new();
        projects.insert(
            "Painting".to_string(),
            ProjectRates {
                labor_per_area: f64::NAN,
                material_per_area: 1.0,
            },
        );
        let quality = BTreeMap::from([("Medium".to_string(), 1.0)]);
        let locations = BTreeMap::from([("US".to_string(), LocationEntry::Flat(1.0))]);

        assert!(RateTable::new(projects, quality, locations).is_err());
    }
}
