//! # Currency Formatting
//!
//! Locale-aware money formatting with a deterministic USD fallback.
//!
//! ## Construction Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  make_formatter("U$D")                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  factory.build("U$D") ──── Err(MalformedCode) ─────────┐                │
//! │                                                        │ warn!          │
//! │                                                        ▼                │
//! │                                   factory.build("USD") ──► formatter    │
//! │                                                        │                │
//! │                                   (still failing?) ────┴──► built-in    │
//! │                                                             en-US USD   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Construction never fails outward, and `format` never panics: non-finite
//! amounts print as zero.
//!
//! Codes in [`CURRENCIES`] print with their symbol and minor digits. Any
//! other well-formed code prints as a prefix with 2 minor digits
//! (`BRL 1,000.00`). Only malformed codes fall back to USD.
//!
//! The [`FormatterFactory`] trait is the seam tests use to observe the
//! two construction attempts.
//!
//! ## Usage
//! ```rust
//! use quickquote_core::currency::make_formatter;
//!
//! let fmt = make_formatter("USD");
//! assert_eq!(fmt.format(1234.56), "$1,234.56");
//!
//! let fallback = make_formatter("U$D");
//! assert_eq!(fallback.currency_code(), "USD");
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::warn;

use crate::money::round2;
use crate::DEFAULT_CURRENCY;

/// No-break space, as placed between an amount and a currency code.
const NBSP: char = '\u{a0}';

/// Narrow no-break space, the French digit group separator.
const NNBSP: char = '\u{202f}';

// =============================================================================
// Errors
// =============================================================================

/// Why a formatter could not be built.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CurrencyError {
    /// Not a 3-letter alphabetic code.
    #[error("Malformed currency code: '{0}'")]
    MalformedCode(String),

    /// Well-formed, but not in the currency registry.
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),

    /// Locale tag not recognised.
    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),
}

// =============================================================================
// Currency Registry
// =============================================================================

/// Display facts about one ISO 4217 currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyInfo {
    pub code: &'static str,
    /// Symbol, when one is commonly used; otherwise the code is printed.
    pub symbol: Option<&'static str>,
    /// Digits after the decimal separator.
    pub minor_digits: u8,
}

const fn info(code: &'static str, symbol: Option<&'static str>, minor_digits: u8) -> CurrencyInfo {
    CurrencyInfo {
        code,
        symbol,
        minor_digits,
    }
}

/// Currencies the formatter knows how to print.
pub const CURRENCIES: &[CurrencyInfo] = &[
    info("USD", Some("$"), 2),
    info("EUR", Some("€"), 2),
    info("GBP", Some("£"), 2),
    info("CAD", Some("CA$"), 2),
    info("AUD", Some("A$"), 2),
    info("MXN", Some("MX$"), 2),
    info("JPY", Some("¥"), 0),
    info("CNY", Some("CN¥"), 2),
    info("INR", Some("₹"), 2),
    info("GHS", Some("GH₵"), 2),
    info("NGN", Some("₦"), 2),
    info("KES", None, 2),
    info("ZAR", None, 2),
    info("CHF", None, 2),
    info("SEK", None, 2),
    info("KRW", Some("₩"), 0),
];

/// Looks up a currency by code (case-insensitive).
///
/// ## Errors
/// - [`CurrencyError::MalformedCode`] unless the code is 3 ASCII letters
/// - [`CurrencyError::UnsupportedCurrency`] if it is not in [`CURRENCIES`]
pub fn lookup_currency(code: &str) -> Result<&'static CurrencyInfo, CurrencyError> {
    let trimmed = code.trim();
    if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(CurrencyError::MalformedCode(code.to_string()));
    }
    let upper = trimmed.to_ascii_uppercase();
    CURRENCIES
        .iter()
        .find(|c| c.code == upper)
        .ok_or(CurrencyError::UnsupportedCurrency(upper))
}

// =============================================================================
// Locale
// =============================================================================

/// Number formatting conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    /// `$1,234.56`
    #[default]
    EnUs,
    /// `£1,234.56`
    EnGb,
    /// `1.234,56 €`
    DeDe,
    /// `1 234,56 €`
    FrFr,
}

impl Locale {
    fn group_separator(self) -> char {
        match self {
            Locale::EnUs | Locale::EnGb => ',',
            Locale::DeDe => '.',
            Locale::FrFr => NNBSP,
        }
    }

    fn decimal_separator(self) -> char {
        match self {
            Locale::EnUs | Locale::EnGb => '.',
            Locale::DeDe | Locale::FrFr => ',',
        }
    }

    fn symbol_first(self) -> bool {
        matches!(self, Locale::EnUs | Locale::EnGb)
    }

    pub fn tag(self) -> &'static str {
        match self {
            Locale::EnUs => "en-US",
            Locale::EnGb => "en-GB",
            Locale::DeDe => "de-DE",
            Locale::FrFr => "fr-FR",
        }
    }
}

impl FromStr for Locale {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().replace('_', "-").to_ascii_lowercase().as_str() {
            "en-us" | "en" => Ok(Locale::EnUs),
            "en-gb" => Ok(Locale::EnGb),
            "de-de" | "de" => Ok(Locale::DeDe),
            "fr-fr" | "fr" => Ok(Locale::FrFr),
            _ => Err(CurrencyError::UnsupportedLocale(s.to_string())),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

// =============================================================================
// Formatter
// =============================================================================

/// Formats amounts in one currency for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormatter {
    code: String,
    symbol: Option<&'static str>,
    minor_digits: u8,
    locale: Locale,
}

impl CurrencyFormatter {
    /// Builds a formatter. Registered codes use their symbol; other
    /// well-formed codes print as a prefix with 2 minor digits.
    ///
    /// ## Errors
    /// - [`CurrencyError::MalformedCode`] unless the code is 3 ASCII letters
    pub fn new(currency_code: &str, locale: Locale) -> Result<Self, CurrencyError> {
        match lookup_currency(currency_code) {
            Ok(info) => Ok(CurrencyFormatter {
                code: info.code.to_string(),
                symbol: info.symbol,
                minor_digits: info.minor_digits,
                locale,
            }),
            Err(CurrencyError::UnsupportedCurrency(code)) => Ok(CurrencyFormatter {
                code,
                symbol: None,
                minor_digits: 2,
                locale,
            }),
            Err(err) => Err(err),
        }
    }

    /// The last-resort formatter: USD, en-US.
    pub fn usd() -> Self {
        CurrencyFormatter {
            code: DEFAULT_CURRENCY.to_string(),
            symbol: Some("$"),
            minor_digits: 2,
            locale: Locale::EnUs,
        }
    }

    pub fn currency_code(&self) -> &str {
        &self.code
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Formats `amount`, rounding half away from zero to the currency's
    /// minor digits. Cent amounts go through [`round2`] first, so `1.005`
    /// prints as `1.01`. Non-finite amounts format as zero.
    ///
    /// ## Example
    /// ```rust
    /// use quickquote_core::currency::{CurrencyFormatter, Locale};
    ///
    /// let de = CurrencyFormatter::new("EUR", Locale::DeDe).unwrap();
    /// assert_eq!(de.format(1234.5), "1.234,50\u{a0}€");
    ///
    /// let us = CurrencyFormatter::usd();
    /// assert_eq!(us.format(-5.5), "-$5.50");
    /// assert_eq!(us.format(f64::NAN), "$0.00");
    /// ```
    pub fn format(&self, amount: f64) -> String {
        let amount = if amount.is_finite() { amount } else { 0.0 };
        let digits = u32::from(self.minor_digits);
        let scale = 10_f64.powi(digits as i32);
        let magnitude = if digits == 2 {
            round2(amount.abs())
        } else {
            amount.abs()
        };

        // Saturating cast; amounts beyond u128 are not meaningful here
        let scaled = (magnitude * scale).round() as u128;
        let divisor = 10_u128.pow(digits);
        let whole = scaled / divisor;
        let fraction = scaled % divisor;
        let negative = amount < 0.0 && scaled != 0;

        let mut number = group_digits(whole, self.locale.group_separator());
        if digits > 0 {
            number.push(self.locale.decimal_separator());
            number.push_str(&format!("{:0width$}", fraction, width = digits as usize));
        }

        let sign = if negative { "-" } else { "" };
        match (self.symbol, self.locale.symbol_first()) {
            (Some(symbol), true) => format!("{sign}{symbol}{number}"),
            (None, true) => format!("{sign}{}{NBSP}{number}", self.code),
            (Some(symbol), false) => format!("{sign}{number}{NBSP}{symbol}"),
            (None, false) => format!("{sign}{number}{NBSP}{}", self.code),
        }
    }
}

fn group_digits(whole: u128, separator: char) -> String {
    let digits = whole.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

// =============================================================================
// Factory Seam
// =============================================================================

/// Builds formatters. Implemented by the registry-backed factory and by
/// test doubles that record which codes were requested.
pub trait FormatterFactory {
    fn build(&self, currency_code: &str) -> Result<CurrencyFormatter, CurrencyError>;
}

/// Factory for a fixed locale, backed by [`CurrencyFormatter::new`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistryFormatterFactory {
    pub locale: Locale,
}

impl RegistryFormatterFactory {
    pub fn new(locale: Locale) -> Self {
        RegistryFormatterFactory { locale }
    }
}

impl FormatterFactory for RegistryFormatterFactory {
    fn build(&self, currency_code: &str) -> Result<CurrencyFormatter, CurrencyError> {
        CurrencyFormatter::new(currency_code, self.locale)
    }
}

/// Formatter for `currency_code` in the default locale, falling back to USD.
pub fn make_formatter(currency_code: &str) -> CurrencyFormatter {
    make_formatter_with(&RegistryFormatterFactory::default(), currency_code)
}

/// Formatter for `currency_code` from `factory`, falling back to USD.
///
/// Attempts `currency_code` first, then `USD`; if the factory refuses both,
/// returns [`CurrencyFormatter::usd`].
pub fn make_formatter_with<F>(factory: &F, currency_code: &str) -> CurrencyFormatter
where
    F: FormatterFactory + ?Sized,
{
    match factory.build(currency_code) {
        Ok(formatter) => formatter,
        Err(err) => {
            warn!(currency_code, error = %err, "Falling back to USD formatter");
            factory
                .build(DEFAULT_CURRENCY)
                .unwrap_or_else(|_| CurrencyFormatter::usd())
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
