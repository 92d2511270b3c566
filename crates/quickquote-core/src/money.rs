//! # Money Module
//!
//! Rounding rules for monetary amounts.
//!
//! ## Why Floats Here?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Saved quotes already hold f64 amounts produced by this exact rule:     │
//! │    round2(x) = round_half_up((x + EPSILON) * 100) / 100                 │
//! │                                                                         │
//! │  1.005 is stored as 1.00499999999999989...                              │
//! │    plain rounding:    1.00   ❌                                         │
//! │    with EPSILON:      1.01   ✅                                         │
//! │                                                                         │
//! │  Switching to integer cents would change historical totals, so the     │
//! │  rule is reproduced bit-for-bit instead.                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Cumulative Rounding
//! Every pipeline step rounds its own output before the next step reads it.
//! `total = round2(round2(labor) + round2(material))`, never
//! `round2(labor + material)` on raw values.
//!
//! ## Usage
//! ```rust
//! use quickquote_core::money::round2;
//!
//! assert_eq!(round2(1.005), 1.01);
//! assert_eq!(round2(2500.0), 2500.0);
//! assert_eq!(round2(0.125), 0.13);
//! ```

/// Rounds half toward positive infinity.
///
/// `2.5 → 3`, `-2.5 → -2`. This differs from [`f64::round`], which rounds
/// half away from zero (`-2.5 → -3`).
///
/// Non-finite values pass through unchanged.
#[inline]
pub fn round_half_up(x: f64) -> f64 {
    if !x.is_finite() {
        return x;
    }
    let floor = x.floor();
    // x - floor is exact for every finite f64
    if x - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Rounds to 2 decimal places, half up, with an epsilon nudge.
///
/// ## Algorithm
/// ```text
/// round2(x) = round_half_up((x + f64::EPSILON) * 100) / 100
/// ```
///
/// ## Example
/// ```rust
/// use quickquote_core::money::round2;
///
/// assert_eq!(round2(6500.0), 6500.0);
/// assert_eq!(round2(1.005), 1.01);
/// assert_eq!(round2(727.5), 727.5);
/// ```
#[inline]
pub fn round2(x: f64) -> f64 {
    round_half_up((x + f64::EPSILON) * 100.0) / 100.0
}

/// Like [`round2`], but maps non-finite input to `0`.
///
/// Used when re-reading user-supplied or persisted numbers, where a
/// `NaN` should become a harmless zero instead of propagating.
///
/// ## Example
/// ```rust
/// use quickquote_core::money::round2_or_zero;
///
/// assert_eq!(round2_or_zero(f64::NAN), 0.0);
/// assert_eq!(round2_or_zero(42.004), 42.0);
/// ```
#[inline]
pub fn round2_or_zero(x: f64) -> f64 {
    if x.is_finite() {
        round2(x)
    } else {
        0.0
    }
}

/// Returns `round2(amount * (pct / 100))`.
///
/// The percentage is scaled first; `amount * pct / 100` can differ in the
/// last bit.
///
/// ## Example
/// ```rust
/// use quickquote_core::money::percent_of;
///
/// assert_eq!(percent_of(7275.0, 10.0), 727.5);
/// ```
#[inline]
pub fn percent_of(amount: f64, pct: f64) -> f64 {
    round2(amount * (pct / 100.0))
}

/// Returns `round2(amount * (1 + pct / 100))`.
///
/// ## Example
/// ```rust
/// use quickquote_core::money::apply_markup;
///
/// assert_eq!(apply_markup(2500.0, 15.0), 2875.0);
/// assert_eq!(apply_markup(2500.0, 0.0), 2500.0);
/// ```
#[inline]
pub fn apply_markup(amount: f64, pct: f64) -> f64 {
    round2(amount * (1.0 + pct / 100.0))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up_ties() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(2.4999), 2.0);
        assert_eq!(round_half_up(-0.4), -0.0);
        assert_eq!(round_half_up(7.0), 7.0);
    }

    #[test]
    fn test_round_half_up_non_finite() {
        assert!(round_half_up(f64::NAN).is_nan());
        assert_eq!(round_half_up(f64::INFINITY), f64::INFINITY);
    }

    #[test]
    fn test_round2_epsilon_correction() {
        // 1.005 is 1.00499999999999989 in binary; the nudge carries it over
        assert_eq!(round2(1.005), 1.01);
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(0.124), 0.12);
    }

    #[test]
    fn test_round2_whole_amounts_unchanged() {
        assert_eq!(round2(2500.0), 2500.0);
        assert_eq!(round2(4000.0), 4000.0);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn test_round2_absorbs_float_noise() {
        // 4000 * 1.1 = 4400.000000000001
        assert_eq!(round2(4000.0 * 1.1), 4400.0);
        // 0.1 + 0.2 = 0.30000000000000004
        assert_eq!(round2(0.1 + 0.2), 0.3);
    }

    #[test]
    fn test_round2_or_zero() {
        assert_eq!(round2_or_zero(f64::NAN), 0.0);
        assert_eq!(round2_or_zero(f64::NEG_INFINITY), 0.0);
        assert_eq!(round2_or_zero(18.0), 18.0);
    }

    #[test]
    fn test_percent_helpers() {
        assert_eq!(percent_of(1000.0, 8.25), 82.5);
        assert_eq!(percent_of(1000.0, 0.0), 0.0);
        assert_eq!(apply_markup(4000.0, 10.0), 4400.0);
    }

    /// Documents why the order of rounding matters: summing raw values and
    /// rounding once can differ from summing rounded parts.
    #[test]
    fn test_cumulative_rounding_differs_from_single_rounding() {
        let labor_raw = 0.004;
        let material_raw = 0.004;

        let cumulative = round2(round2(labor_raw) + round2(material_raw));
        let single = round2(labor_raw + material_raw);

        assert_eq!(cumulative, 0.0);
        assert_eq!(single, 0.01);
    }
}
