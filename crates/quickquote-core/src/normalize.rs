//! # Input Normalizer
//!
//! Turns free-text numeric input into a bounded number before it reaches the
//! estimate engine.
//!
//! ## Sanitize-to-Floor Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  clamp("12abc34", 1, 100000)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  keep only [0-9.]          "12abc34" → "1234"                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  parse                     ""        → 0                                │
//! │       │                    "1.2.3"   → not a number → min               │
//! │       ▼                                                                 │
//! │  clamp into [min, max]     1234 → 1234,   0 → 1,   100001 → 100000      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Never fails: anything unparseable becomes `min`. A minus sign is a
//! non-digit, so it is stripped like any other character.

use std::borrow::Cow;

use crate::{MAX_ROOM_SIZE, MIN_ROOM_SIZE};

// =============================================================================
// Raw Input
// =============================================================================

/// A value as it arrives from a form field or a command-line flag.
#[derive(Debug, Clone, PartialEq)]
pub enum RawInput<'a> {
    /// Text typed by the user.
    Text(Cow<'a, str>),
    /// A value that is already numeric.
    Number(f64),
}

impl RawInput<'_> {
    /// The input as text. Numbers render in plain decimal notation.
    fn as_text(&self) -> Cow<'_, str> {
        match self {
            RawInput::Text(text) => Cow::Borrowed(text.as_ref()),
            RawInput::Number(n) => Cow::Owned(n.to_string()),
        }
    }
}

impl<'a> From<&'a str> for RawInput<'a> {
    fn from(value: &'a str) -> Self {
        RawInput::Text(Cow::Borrowed(value))
    }
}

impl<'a> From<&'a String> for RawInput<'a> {
    fn from(value: &'a String) -> Self {
        RawInput::Text(Cow::Borrowed(value.as_str()))
    }
}

impl From<String> for RawInput<'static> {
    fn from(value: String) -> Self {
        RawInput::Text(Cow::Owned(value))
    }
}

impl From<f64> for RawInput<'static> {
    fn from(value: f64) -> Self {
        RawInput::Number(value)
    }
}

impl From<i64> for RawInput<'static> {
    fn from(value: i64) -> Self {
        RawInput::Number(value as f64)
    }
}

// =============================================================================
// Clamp
// =============================================================================

/// Sanitizes `input` and clamps it into `[min, max]`.
///
/// ## Example
/// ```rust
/// use quickquote_core::normalize::clamp;
///
/// assert_eq!(clamp("abc", 1.0, 100000.0), 1.0);
/// assert_eq!(clamp("0", 1.0, 100000.0), 1.0);
/// assert_eq!(clamp("100001", 1.0, 100000.0), 100000.0);
/// assert_eq!(clamp("12abc34", 1.0, 100000.0), 1234.0);
/// assert_eq!(clamp(250.5, 1.0, 100000.0), 250.5);
/// ```
pub fn clamp<'a>(input: impl Into<RawInput<'a>>, min: f64, max: f64) -> f64 {
    let input = input.into();
    let cleaned: String = input
        .as_text()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let parsed = if cleaned.is_empty() {
        Some(0.0)
    } else {
        cleaned.parse::<f64>().ok()
    };

    match parsed {
        Some(n) if n.is_finite() => min.max(n.min(max)),
        _ => min,
    }
}

// =============================================================================
// Bounds
// =============================================================================

/// Inclusive bounds for one numeric field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

/// Room size input: 1 to 100,000.
pub const ROOM_SIZE_BOUNDS: Bounds = Bounds {
    min: MIN_ROOM_SIZE,
    max: MAX_ROOM_SIZE,
};

/// Percentage inputs: zero or more, no upper cap.
pub const PERCENT_BOUNDS: Bounds = Bounds {
    min: 0.0,
    max: f64::MAX,
};

/// Material costs: zero or more.
pub const COST_BOUNDS: Bounds = Bounds {
    min: 0.0,
    max: f64::MAX,
};

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Bounds { min, max }
    }

    /// No bounds at all.
    pub const fn unbounded() -> Self {
        Bounds {
            min: f64::NEG_INFINITY,
            max: f64::INFINITY,
        }
    }

    /// [`clamp`] with these bounds.
    pub fn clamp<'a>(&self, input: impl Into<RawInput<'a>>) -> f64 {
        clamp(input, self.min, self.max)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
