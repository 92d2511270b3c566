//! # quickquote-core: Pure Estimating Logic for QuickQuote
//!
//! This crate holds every pricing rule of QuickQuote as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        QuickQuote Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  quickquote (CLI, clap)                         │   │
//! │  │    rates ──► estimate ──► history / draft / favorites           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ quickquote-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │  normalize ──► estimate ──► totals ──► currency ──► summary     │   │
//! │  │   clamp()      engine       markups    formatter    render      │   │
//! │  │                  ▲                                              │   │
//! │  │                rates        quote / materials (form model)      │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                quickquote-store (SQLite)                        │   │
//! │  │           history, draft, material favorites                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`rates`] - Static rate table (projects, quality, locations)
//! - [`estimate`] - The estimate engine
//! - [`normalize`] - Free-text numeric input sanitizing
//! - [`currency`] - Locale-aware money formatting with USD fallback
//! - [`totals`] - Markups, overhead, discount, tax and confidence range
//! - [`money`] - Rounding rules
//! - [`materials`] - Material favorites and quote line items
//! - [`quote`] - The quote form, drafts and history
//! - [`summary`] - Plain-text export
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same bits out
//! 2. **No I/O**: storage and terminals belong to the other crates
//! 3. **Cumulative Rounding**: every step rounds to cents before the next
//! 4. **Explicit Errors**: bad area and unknown project are typed errors
//!
//! ## Example Usage
//!
//! ```rust
//! use quickquote_core::currency::make_formatter;
//! use quickquote_core::estimate::compute_estimate;
//! use quickquote_core::rates::RateTable;
//!
//! let rates = RateTable::builtin().unwrap();
//! let estimate = compute_estimate(&rates, 100.0, "Bathroom Remodel", "Medium", "US").unwrap();
//!
//! let fmt = make_formatter(&estimate.currency_code);
//! assert_eq!(fmt.format(estimate.total), "$6,500.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod currency;
pub mod error;
pub mod estimate;
mod lenient;
pub mod materials;
pub mod money;
pub mod normalize;
pub mod quote;
pub mod rates;
pub mod summary;
pub mod totals;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use currency::{make_formatter, make_formatter_with, CurrencyFormatter, FormatterFactory, Locale};
pub use error::{CoreError, CoreResult, ValidationError};
pub use estimate::{compute_estimate, EstimateInput, EstimateResult};
pub use materials::{MaterialAddition, MaterialFavorite};
pub use normalize::clamp;
pub use quote::{Draft, Quote, QuoteHistory, QuoteInputs, QuoteRecord};
pub use rates::{LocationEntry, ProjectRates, RateTable};
pub use summary::{render_summary, QuoteSummary};
pub use totals::{derive_totals, AdjustmentParameters, DerivedTotals, MaterialExtra};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Currency for locations without one, and the formatter fallback.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Square feet per square metre.
pub const SQM_TO_SQFT: f64 = 10.7639;

/// Smallest room size the form accepts.
pub const MIN_ROOM_SIZE: f64 = 1.0;

/// Largest room size the form accepts.
pub const MAX_ROOM_SIZE: f64 = 100_000.0;

/// Room size a new form starts with.
pub const DEFAULT_ROOM_SIZE: f64 = 100.0;

/// Saved quotes kept in history.
pub const MAX_HISTORY_ENTRIES: usize = 5;

/// Preferred quality tier for a new form.
pub const DEFAULT_QUALITY: &str = "Medium";

/// Preferred location for a new form.
pub const DEFAULT_LOCATION: &str = "US";

pub const DEFAULT_LABOR_MARKUP_PCT: f64 = 15.0;
pub const DEFAULT_MATERIAL_MARKUP_PCT: f64 = 10.0;
pub const DEFAULT_OVERHEAD_PCT: f64 = 10.0;
pub const DEFAULT_DISCOUNT_PCT: f64 = 0.0;
pub const DEFAULT_TAX_PCT: f64 = 0.0;
