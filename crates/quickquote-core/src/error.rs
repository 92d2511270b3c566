//! # Error Types
//!
//! Domain-specific error types for quickquote-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  quickquote-core errors (this file)                                    │
//! │  ├── CoreError        - Estimate failures, rate table problems         │
//! │  └── ValidationError  - Field-level input validation failures          │
//! │                                                                         │
//! │  quickquote-store errors (separate crate)                              │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CliError         - What the user sees (code + message)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → stderr / JSON          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! An unknown quality tier or location silently degrades to a neutral
//! multiplier of `1` (and `USD` for location). Only the area and the project
//! type are strict. Formatting and input sanitizing never fail.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Estimate and rate table errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The room size is not usable.
    ///
    /// ## When This Occurs
    /// - Area is `NaN` or infinite
    /// - Area is zero or negative
    #[error("Invalid room size: {area}")]
    InvalidArea { area: f64 },

    /// The project type has no entry in the rate table.
    ///
    /// ## User Workflow
    /// ```text
    /// estimate --project "UnknownThing"
    ///      │
    ///      ▼
    /// rates.projects["UnknownThing"] → missing
    ///      │
    ///      ▼
    /// UnknownProjectType("UnknownThing")
    ///      │
    ///      ▼
    /// CLI prints: "Unknown project type: UnknownThing"
    /// ```
    #[error("Unknown project type: {0}")]
    UnknownProjectType(String),

    /// The rate table document could not be parsed.
    #[error("Invalid rate table: {reason}")]
    InvalidRateTable { reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Whether this error came from the user's inputs rather than from
    /// broken configuration.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            CoreError::InvalidArea { .. } | CoreError::UnknownProjectType(_)
        )
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field-level validation errors.
///
/// Raised while loading a rate table and while creating material favorites.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive and finite.
    #[error("{field} must be a positive number, got {value}")]
    MustBePositive { field: String, value: f64 },

    /// Value must be a finite number.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Invalid format (e.g., malformed currency code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
