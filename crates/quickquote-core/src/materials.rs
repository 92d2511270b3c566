//! # Material Favorites
//!
//! Saved material line items and the copies placed on a quote.
//!
//! ```text
//! MaterialFavorite { id, name, cost }        ← user's saved catalogue
//!         │ from_favorite()
//!         ▼
//! MaterialAddition { entryId, id, name, cost } ← one line on the quote
//!         │ to_extra()
//!         ▼
//! MaterialExtra { name, cost }               ← fed to derive_totals
//! ```
//!
//! An addition keeps its own `entryId` so the same favorite can be added
//! twice and each copy edited or removed on its own.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::lenient;
use crate::money::round2_or_zero;
use crate::totals::MaterialExtra;

/// Fresh random identifier for favorites and additions.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Favorite
// =============================================================================

/// A reusable material line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MaterialFavorite {
    pub id: String,
    pub name: String,
    pub cost: f64,
}

impl MaterialFavorite {
    /// Creates a favorite with a fresh id.
    ///
    /// ## Errors
    /// - [`ValidationError::Required`] if the trimmed name is empty
    /// - [`ValidationError::NotFinite`] if the cost is NaN or infinite
    pub fn new(name: &str, cost: f64) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::Required {
                field: "name".to_string(),
            });
        }
        if !cost.is_finite() {
            return Err(ValidationError::NotFinite {
                field: "cost".to_string(),
            });
        }
        Ok(MaterialFavorite {
            id: new_id(),
            name: name.to_string(),
            cost: round2_or_zero(cost),
        })
    }
}

/// The catalogue a new installation starts with.
pub fn default_favorites() -> Vec<MaterialFavorite> {
    [
        ("drywall-sheet", "Drywall Sheet (4x8)", 18.0),
        ("lvp-box", "Luxury Vinyl Plank (box)", 62.0),
        ("paint-gallon", "Interior Paint (gallon)", 42.0),
        ("trim-pack", "Finish Trim Pack", 55.0),
        ("led-kit", "LED Recessed Light Kit", 78.0),
    ]
    .into_iter()
    .map(|(id, name, cost)| MaterialFavorite {
        id: id.to_string(),
        name: name.to_string(),
        cost,
    })
    .collect()
}

// =============================================================================
// Addition
// =============================================================================

/// A material line on the current quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MaterialAddition {
    /// Identity of this line.
    pub entry_id: String,
    /// Favorite this line was copied from.
    #[serde(rename = "id")]
    pub favorite_id: String,
    pub name: String,
    pub cost: f64,
}

impl MaterialAddition {
    /// Copies a favorite onto the quote.
    pub fn from_favorite(favorite: &MaterialFavorite) -> Self {
        MaterialAddition {
            entry_id: new_id(),
            favorite_id: favorite.id.clone(),
            name: favorite.name.clone(),
            cost: round2_or_zero(favorite.cost),
        }
    }

    /// A one-off line that is not in the catalogue.
    pub fn custom(name: &str, cost: f64) -> Result<Self, ValidationError> {
        let favorite = MaterialFavorite::new(name, cost)?;
        Ok(MaterialAddition {
            entry_id: new_id(),
            favorite_id: favorite.id,
            name: favorite.name,
            cost: favorite.cost,
        })
    }

    pub fn to_extra(&self) -> MaterialExtra {
        MaterialExtra::new(self.name.clone(), self.cost)
    }
}

// =============================================================================
// Stored Form
// =============================================================================

/// A favorite or addition as read back from storage, before validation.
///
/// Every field is optional; items without a name are dropped on restore.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredMaterial {
    #[serde(default, deserialize_with = "lenient::value", skip_serializing_if = "Option::is_none")]
    pub entry_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::value", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::value", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

impl StoredMaterial {
    fn named(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    fn id_or_new(id: &Option<String>) -> String {
        id.clone()
            .filter(|id| !id.is_empty())
            .unwrap_or_else(new_id)
    }

    /// Restores a favorite, regenerating a missing id.
    pub fn into_favorite(self) -> Option<MaterialFavorite> {
        let name = self.named()?.to_string();
        Some(MaterialFavorite {
            id: Self::id_or_new(&self.id),
            name,
            cost: round2_or_zero(self.cost.unwrap_or(0.0)),
        })
    }

    /// Restores an addition, regenerating missing ids.
    pub fn into_addition(self) -> Option<MaterialAddition> {
        let name = self.named()?.to_string();
        Some(MaterialAddition {
            entry_id: Self::id_or_new(&self.entry_id),
            favorite_id: Self::id_or_new(&self.id),
            name,
            cost: round2_or_zero(self.cost.unwrap_or(0.0)),
        })
    }
}

/// Restores a stored favorites list, dropping unnamed items.
pub fn restore_favorites(items: Vec<StoredMaterial>) -> Vec<MaterialFavorite> {
    items
        .into_iter()
        .filter_map(StoredMaterial::into_favorite)
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
