//! # Domain Types
//!
//! Small value types shared by the estimate pipeline and the quote form.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    AreaUnit     │   │      Role       │   │  CurrencyMode   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  SqFt           │   │  Homeowner      │   │  Auto           │       │
//! │  │  SqM (×10.7639) │   │  Contractor     │   │  Fixed("GHS")   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │ ClientSnapshot  │   │ ConfidenceBand  │                             │
//! │  │  name, company  │   │  Low  → ±20%    │                             │
//! │  │  email, phone   │   │  High → ±10%    │                             │
//! │  │  notes          │   │  else → ±15%    │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::SQM_TO_SQFT;

// =============================================================================
// Area Unit
// =============================================================================

/// Unit the room size was entered in.
///
/// The estimate engine always works in square feet; conversion happens
/// before the engine is called.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum AreaUnit {
    /// Square feet (`"sqft"`).
    #[default]
    SqFt,
    /// Square metres (`"sqm"`).
    SqM,
}

impl AreaUnit {
    /// Converts a size in this unit to square feet.
    ///
    /// ## Example
    /// ```rust
    /// use quickquote_core::AreaUnit;
    ///
    /// assert_eq!(AreaUnit::SqFt.to_square_feet(100.0), 100.0);
    /// assert_eq!(AreaUnit::SqM.to_square_feet(1.0), 10.7639);
    /// ```
    pub fn to_square_feet(self, size: f64) -> f64 {
        match self {
            AreaUnit::SqFt => size,
            AreaUnit::SqM => size * SQM_TO_SQFT,
        }
    }

    /// Short label for display (`"sq ft"`, `"sq m"`).
    pub fn label(self) -> &'static str {
        match self {
            AreaUnit::SqFt => "sq ft",
            AreaUnit::SqM => "sq m",
        }
    }
}

impl FromStr for AreaUnit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqft" | "ft2" | "sq ft" => Ok(AreaUnit::SqFt),
            "sqm" | "m2" | "sq m" => Ok(AreaUnit::SqM),
            other => Err(ValidationError::InvalidFormat {
                field: "unit".to_string(),
                reason: format!("'{other}' is not one of: sqft, sqm"),
            }),
        }
    }
}

// =============================================================================
// Role
// =============================================================================

/// Who the quote is being prepared for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Role {
    #[default]
    Homeowner,
    Contractor,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Homeowner => f.write_str("Homeowner"),
            Role::Contractor => f.write_str("Contractor"),
        }
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Homeowner" | "homeowner" => Ok(Role::Homeowner),
            "Contractor" | "contractor" => Ok(Role::Contractor),
            other => Err(ValidationError::InvalidFormat {
                field: "role".to_string(),
                reason: format!("'{other}' is not one of: Homeowner, Contractor"),
            }),
        }
    }
}

// =============================================================================
// Currency Mode
// =============================================================================

/// Which currency amounts are displayed in.
///
/// `Auto` uses the currency of the selected location. `Fixed` only changes
/// the display; amounts are never converted.
///
/// Serialized as `"Auto"` or the 3-letter code, matching saved drafts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CurrencyMode {
    #[default]
    Auto,
    Fixed(String),
}

impl CurrencyMode {
    /// Picks the display currency for an estimate quoted in
    /// `estimate_currency`.
    ///
    /// ## Example
    /// ```rust
    /// use quickquote_core::CurrencyMode;
    ///
    /// assert_eq!(CurrencyMode::Auto.resolve("GHS"), "GHS");
    /// assert_eq!(CurrencyMode::Fixed("EUR".into()).resolve("GHS"), "EUR");
    /// ```
    pub fn resolve<'a>(&'a self, estimate_currency: &'a str) -> &'a str {
        match self {
            CurrencyMode::Auto => estimate_currency,
            CurrencyMode::Fixed(code) => code,
        }
    }
}

impl FromStr for CurrencyMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("auto") {
            return Ok(CurrencyMode::Auto);
        }
        if s.len() == 3 && s.chars().all(|c| c.is_ascii_alphabetic()) {
            return Ok(CurrencyMode::Fixed(s.to_ascii_uppercase()));
        }
        Err(ValidationError::InvalidFormat {
            field: "currency".to_string(),
            reason: format!("'{s}' is neither 'Auto' nor a 3-letter code"),
        })
    }
}

impl TryFrom<String> for CurrencyMode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CurrencyMode> for String {
    fn from(mode: CurrencyMode) -> Self {
        match mode {
            CurrencyMode::Auto => "Auto".to_string(),
            CurrencyMode::Fixed(code) => code,
        }
    }
}

impl fmt::Display for CurrencyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurrencyMode::Auto => f.write_str("Auto"),
            CurrencyMode::Fixed(code) => f.write_str(code),
        }
    }
}

// =============================================================================
// Client Snapshot
// =============================================================================

/// Contact details printed on an exported summary.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct ClientSnapshot {
    pub name: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub notes: String,
}

impl ClientSnapshot {
    /// Returns a copy with every field trimmed.
    pub fn trimmed(&self) -> Self {
        ClientSnapshot {
            name: self.name.trim().to_string(),
            company: self.company.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            notes: self.notes.trim().to_string(),
        }
    }

    /// True when every field is blank.
    pub fn is_empty(&self) -> bool {
        [
            &self.name,
            &self.company,
            &self.email,
            &self.phone,
            &self.notes,
        ]
        .iter()
        .all(|field| field.trim().is_empty())
    }
}

// =============================================================================
// Confidence Band
// =============================================================================

/// Relative uncertainty of an estimate, by quality tier.
///
/// Lower-quality work varies more in price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceBand(f64);

impl ConfidenceBand {
    /// `Low` → 0.20, `High` → 0.10, anything else → 0.15.
    pub fn for_quality(quality_tier: &str) -> Self {
        match quality_tier {
            "Low" => ConfidenceBand(0.20),
            "High" => ConfidenceBand(0.10),
            _ => ConfidenceBand(0.15),
        }
    }

    /// The band as a fraction (e.g. `0.15`).
    #[inline]
    pub fn fraction(self) -> f64 {
        self.0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_unit_conversion() {
        assert_eq!(AreaUnit::SqFt.to_square_feet(250.0), 250.0);
        assert_eq!(AreaUnit::SqM.to_square_feet(1.0), SQM_TO_SQFT);
    }

    #[test]
    fn test_area_unit_parse_and_serde() {
        assert_eq!("sqm".parse::<AreaUnit>().unwrap(), AreaUnit::SqM);
        assert_eq!("SQFT".parse::<AreaUnit>().unwrap(), AreaUnit::SqFt);
        assert!("acres".parse::<AreaUnit>().is_err());

        let json = serde_json::to_string(&AreaUnit::SqM).unwrap();
        assert_eq!(json, "\"sqm\"");
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("Contractor".parse::<Role>().unwrap(), Role::Contractor);
        assert!("Landlord".parse::<Role>().is_err());
        assert_eq!(Role::default(), Role::Homeowner);
    }

    #[test]
    fn test_currency_mode_serde() {
        let auto: CurrencyMode = serde_json::from_str("\"Auto\"").unwrap();
        assert_eq!(auto, CurrencyMode::Auto);

        let fixed: CurrencyMode = serde_json::from_str("\"ghs\"").unwrap();
        assert_eq!(fixed, CurrencyMode::Fixed("GHS".to_string()));
        assert_eq!(serde_json::to_string(&fixed).unwrap(), "\"GHS\"");

        assert!(serde_json::from_str::<CurrencyMode>("\"Dollars\"").is_err());
    }

    #[test]
    fn test_client_snapshot_trim() {
        let client = ClientSnapshot {
            name: "  Kelly Ramirez ".to_string(),
            ..Default::default()
        };
        assert_eq!(client.trimmed().name, "Kelly Ramirez");
        assert!(!client.is_empty());
        assert!(ClientSnapshot::default().is_empty());
    }

    #[test]
    fn test_confidence_band() {
        assert_eq!(ConfidenceBand::for_quality("Low").fraction(), 0.20);
        assert_eq!(ConfidenceBand::for_quality("High").fraction(), 0.10);
        assert_eq!(ConfidenceBand::for_quality("Medium").fraction(), 0.15);
        assert_eq!(ConfidenceBand::for_quality("Bespoke").fraction(), 0.15);
    }
}
