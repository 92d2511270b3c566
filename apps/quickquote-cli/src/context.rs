//! # Run Context
//!
//! State shared by the command handlers for one invocation.
//!
//! ```text
//! ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────────────┐
//! │   AppConfig      │ │   RateTable      │ │   Database               │
//! │                  │ │                  │ │                          │
//! │  • db path       │ │  • projects      │ │  • opened on first use   │
//! │  • locale        │ │  • quality tiers │ │  • history, draft,       │
//! │  • form defaults │ │  • locations     │ │    favorites             │
//! └──────────────────┘ └──────────────────┘ └──────────────────────────┘
//! ```
//!
//! `quickquote rates` never touches the database, so it works even when the
//! data directory is not writable.

use std::path::Path;

use tokio::sync::OnceCell;
use tracing::info;

use quickquote_core::currency::{Locale, RegistryFormatterFactory};
use quickquote_core::{make_formatter_with, CurrencyFormatter, QuoteInputs, RateTable};
use quickquote_store::{Database, DbConfig};

use crate::cli::Cli;
use crate::config::AppConfig;
use crate::error::CliResult;

pub struct Context {
    pub json: bool,
    pub config: AppConfig,
    pub rates: RateTable,
    db: OnceCell<Database>,
}

impl Context {
    /// Loads configuration and the rate table. Path flags override the
    /// environment.
    pub fn from_cli(cli: &Cli) -> CliResult<Self> {
        let mut config = AppConfig::load()?;
        if let Some(db) = &cli.db {
            config.db_path = db.clone();
        }
        if let Some(rates) = &cli.rates {
            config.rates_path = Some(rates.clone());
        }
        Self::new(config, cli.json)
    }

    pub fn new(config: AppConfig, json: bool) -> CliResult<Self> {
        let rates = match &config.rates_path {
            Some(path) => {
                info!(path = %path.display(), "Loading rate table");
                RateTable::from_json(&std::fs::read_to_string(path)?)?
            }
            None => RateTable::builtin()?,
        };

        Ok(Context {
            json,
            config,
            rates,
            db: OnceCell::new(),
        })
    }

    pub fn db_path(&self) -> &Path {
        &self.config.db_path
    }

    pub fn locale(&self) -> Locale {
        self.config.locale
    }

    /// The database, opened (and migrated) on first call.
    pub async fn db(&self) -> CliResult<&Database> {
        let db = self
            .db
            .get_or_try_init(|| Database::new(DbConfig::new(self.config.db_path.clone())))
            .await?;
        Ok(db)
    }

    /// A blank quote form with the configured defaults.
    pub fn new_inputs(&self) -> QuoteInputs {
        self.config.defaults.new_inputs(&self.rates)
    }

    /// Money formatter for `currency_code` in the configured locale.
    pub fn formatter(&self, currency_code: &str) -> CurrencyFormatter {
        make_formatter_with(&RegistryFormatterFactory::new(self.locale()), currency_code)
    }

    /// Closes the database if it was opened.
    pub async fn close(&self) {
        if let Some(db) = self.db.get() {
            db.close().await;
        }
    }
}
