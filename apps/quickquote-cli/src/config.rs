//! # Configuration
//!
//! Settings read once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--db`, `--rates`, quote flags)
//! 2. The saved draft (`estimate --from-draft`)
//! 3. Environment variables (`QQ_*`)
//! 4. Defaults (this file and `quickquote_core`)
//!
//! ## Environment Variables
//! | Variable | Meaning |
//! |---|---|
//! | `QQ_DB_PATH` | SQLite file |
//! | `QQ_RATES_PATH` | rate table JSON (built-in table if unset) |
//! | `QQ_LOCALE` | `en-US`, `en-GB`, `de-DE` or `fr-FR` |
//! | `QQ_DEFAULT_ROLE` | `Homeowner` or `Contractor` |
//! | `QQ_DEFAULT_PROJECT` / `QQ_DEFAULT_QUALITY` / `QQ_DEFAULT_LOCATION` | form defaults |
//! | `QQ_DEFAULT_LABOR_MARKUP_PCT` and friends | default percentages |

use std::path::PathBuf;

use directories::ProjectDirs;
use thiserror::Error;
use tracing::warn;

use quickquote_core::currency::Locale;
use quickquote_core::normalize::PERCENT_BOUNDS;
use quickquote_core::{
    QuoteInputs, RateTable, Role, DEFAULT_DISCOUNT_PCT, DEFAULT_LABOR_MARKUP_PCT,
    DEFAULT_MATERIAL_MARKUP_PCT, DEFAULT_OVERHEAD_PCT, DEFAULT_TAX_PCT,
};

const DB_FILE_NAME: &str = "quickquote.db";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable is set to something unusable.
    #[error("{var} has invalid value '{value}': {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },

    /// No database path was given and the platform has no data directory.
    #[error("Could not determine app data directory; set QQ_DB_PATH")]
    NoDataDirectory,
}

/// Defaults for a new quote form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormDefaults {
    pub role: Role,
    pub project_type: Option<String>,
    pub quality: Option<String>,
    pub location: Option<String>,
    pub labor_markup_pct: f64,
    pub material_markup_pct: f64,
    pub overhead_pct: f64,
    pub tax_pct: f64,
    pub discount_pct: f64,
}

impl Default for FormDefaults {
    fn default() -> Self {
        FormDefaults {
            role: Role::default(),
            project_type: None,
            quality: None,
            location: None,
            labor_markup_pct: DEFAULT_LABOR_MARKUP_PCT,
            material_markup_pct: DEFAULT_MATERIAL_MARKUP_PCT,
            overhead_pct: DEFAULT_OVERHEAD_PCT,
            tax_pct: DEFAULT_TAX_PCT,
            discount_pct: DEFAULT_DISCOUNT_PCT,
        }
    }
}

impl FormDefaults {
    /// A blank form for `rates` with these defaults applied.
    ///
    /// Names missing from the rate table are ignored with a warning.
    pub fn new_inputs(&self, rates: &RateTable) -> QuoteInputs {
        let mut inputs = QuoteInputs::with_defaults(rates);
        inputs.role = self.role;

        if let Some(project) = &self.project_type {
            if rates.project(project).is_some() {
                inputs.project_type = project.clone();
            } else {
                warn!(project = %project, "QQ_DEFAULT_PROJECT is not in the rate table");
            }
        }
        if let Some(quality) = &self.quality {
            if rates.has_quality_tier(quality) {
                inputs.quality = quality.clone();
            } else {
                warn!(quality = %quality, "QQ_DEFAULT_QUALITY is not in the rate table");
            }
        }
        if let Some(location) = &self.location {
            if rates.location(location).is_some() {
                inputs.location = location.clone();
            } else {
                warn!(location = %location, "QQ_DEFAULT_LOCATION is not in the rate table");
            }
        }

        inputs.labor_markup_pct = self.labor_markup_pct;
        inputs.material_markup_pct = self.material_markup_pct;
        inputs.overhead_pct = self.overhead_pct;
        inputs.tax_pct = self.tax_pct;
        inputs.discount_pct = self.discount_pct;
        inputs
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// SQLite file holding history, draft and favorites.
    pub db_path: PathBuf,

    /// Rate table document; `None` means the built-in table.
    pub rates_path: Option<PathBuf>,

    /// Number formatting locale.
    pub locale: Locale,

    pub defaults: FormDefaults,
}

impl AppConfig {
    /// Reads the configuration from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Reads the configuration through `lookup`, which returns the value of
    /// an environment variable if it is set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let db_path = match var("QQ_DB_PATH") {
            Some(path) => PathBuf::from(path),
            None => default_db_path()?,
        };

        let locale = match var("QQ_LOCALE") {
            Some(value) => value.parse().map_err(|e: quickquote_core::currency::CurrencyError| {
                ConfigError::InvalidValue {
                    var: "QQ_LOCALE",
                    value: value.clone(),
                    reason: e.to_string(),
                }
            })?,
            None => Locale::default(),
        };

        let role = match var("QQ_DEFAULT_ROLE") {
            Some(value) => value.parse().map_err(|e: quickquote_core::ValidationError| {
                ConfigError::InvalidValue {
                    var: "QQ_DEFAULT_ROLE",
                    value: value.clone(),
                    reason: e.to_string(),
                }
            })?,
            None => Role::default(),
        };

        let percent = |name: &'static str, default: f64| -> Result<f64, ConfigError> {
            match var(name) {
                Some(value) => parse_percent(name, &value),
                None => Ok(default),
            }
        };

        let defaults = FormDefaults {
            role,
            project_type: var("QQ_DEFAULT_PROJECT"),
            quality: var("QQ_DEFAULT_QUALITY"),
            location: var("QQ_DEFAULT_LOCATION"),
            labor_markup_pct: percent("QQ_DEFAULT_LABOR_MARKUP_PCT", DEFAULT_LABOR_MARKUP_PCT)?,
            material_markup_pct: percent(
                "QQ_DEFAULT_MATERIAL_MARKUP_PCT",
                DEFAULT_MATERIAL_MARKUP_PCT,
            )?,
            overhead_pct: percent("QQ_DEFAULT_OVERHEAD_PCT", DEFAULT_OVERHEAD_PCT)?,
            tax_pct: percent("QQ_DEFAULT_TAX_PCT", DEFAULT_TAX_PCT)?,
            discount_pct: percent("QQ_DEFAULT_DISCOUNT_PCT", DEFAULT_DISCOUNT_PCT)?,
        };

        Ok(AppConfig {
            db_path,
            rates_path: var("QQ_RATES_PATH").map(PathBuf::from),
            locale,
            defaults,
        })
    }
}

/// Parses a percentage setting. Must be a finite number; negatives clamp
/// to zero.
fn parse_percent(var: &'static str, value: &str) -> Result<f64, ConfigError> {
    match value.trim().parse::<f64>() {
        Ok(pct) if pct.is_finite() => Ok(pct.max(PERCENT_BOUNDS.min)),
        _ => Err(ConfigError::InvalidValue {
            var,
            value: value.to_string(),
            reason: "expected a number".to_string(),
        }),
    }
}

/// Platform-specific database location.
///
/// - **macOS**: `~/Library/Application Support/app.quickquote.QuickQuote/quickquote.db`
/// - **Windows**: `%APPDATA%\quickquote\QuickQuote\data\quickquote.db`
/// - **Linux**: `~/.local/share/quickquote/quickquote.db`
fn default_db_path() -> Result<PathBuf, ConfigError> {
    let dirs =
        ProjectDirs::from("app", "quickquote", "QuickQuote").ok_or(ConfigError::NoDataDirectory)?;
    Ok(dirs.data_dir().join(DB_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[("QQ_DB_PATH", "/tmp/qq.db")]).unwrap();

        assert_eq!(config.db_path, PathBuf::from("/tmp/qq.db"));
        assert_eq!(config.rates_path, None);
        assert_eq!(config.locale, Locale::EnUs);
        assert_eq!(config.defaults, FormDefaults::default());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("QQ_DB_PATH", "/tmp/qq.db"),
            ("QQ_RATES_PATH", "/etc/qq/rates.json"),
            ("QQ_LOCALE", "de-DE"),
            ("QQ_DEFAULT_ROLE", "Contractor"),
            ("QQ_DEFAULT_PROJECT", "Flooring"),
            ("QQ_DEFAULT_TAX_PCT", "8.25"),
            ("QQ_DEFAULT_DISCOUNT_PCT", "-3"),
        ])
        .unwrap();

        assert_eq!(config.rates_path, Some(PathBuf::from("/etc/qq/rates.json")));
        assert_eq!(config.locale, Locale::DeDe);
        assert_eq!(config.defaults.role, Role::Contractor);
        assert_eq!(config.defaults.project_type.as_deref(), Some("Flooring"));
        assert_eq!(config.defaults.tax_pct, 8.25);
        assert_eq!(config.defaults.discount_pct, 0.0);
        assert_eq!(config.defaults.labor_markup_pct, DEFAULT_LABOR_MARKUP_PCT);
    }

    #[test]
    fn test_invalid_values() {
        let err = config_from(&[("QQ_DB_PATH", "x"), ("QQ_DEFAULT_TAX_PCT", "lots")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { var: "QQ_DEFAULT_TAX_PCT", .. }
        ));

        let err = config_from(&[("QQ_DB_PATH", "x"), ("QQ_LOCALE", "xx-YY")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { var: "QQ_LOCALE", .. }));

        let err = config_from(&[("QQ_DB_PATH", "x"), ("QQ_DEFAULT_ROLE", "Landlord")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { var: "QQ_DEFAULT_ROLE", .. }));
    }

    #[test]
    fn test_blank_values_are_unset() {
        let config = config_from(&[("QQ_DB_PATH", "x"), ("QQ_LOCALE", "  ")]).unwrap();
        assert_eq!(config.locale, Locale::EnUs);
    }

    #[test]
    fn test_new_inputs_applies_known_names_only() {
        let rates = RateTable::builtin().unwrap();
        let defaults = FormDefaults {
            project_type: Some("Painting".to_string()),
            quality: Some("Luxury".to_string()),
            location: Some("Ghana".to_string()),
            overhead_pct: 12.0,
            ..FormDefaults::default()
        };

        let inputs = defaults.new_inputs(&rates);
        assert_eq!(inputs.project_type, "Painting");
        assert_eq!(inputs.quality, "Medium");
        assert_eq!(inputs.location, "Ghana");
        assert_eq!(inputs.overhead_pct, 12.0);
    }
}
