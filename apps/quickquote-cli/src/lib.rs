//! # QuickQuote CLI Library
//!
//! Everything behind the `quickquote` binary; `main.rs` only parses the
//! arguments and reports the outcome.
//!
//! ## Module Organization
//! ```text
//! quickquote_cli/
//! ├── lib.rs          ◄─── You are here (logging setup & dispatch)
//! ├── cli.rs          ◄─── clap argument definitions
//! ├── config.rs       ◄─── QQ_* environment configuration
//! ├── context.rs      ◄─── Per-run state (config, rates, database)
//! ├── output.rs       ◄─── Text / JSON printing helpers
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command dispatch
//! │   ├── rates.rs    ◄─── Rate table listing
//! │   ├── estimate.rs ◄─── Quote calculation, save, export
//! │   ├── history.rs  ◄─── Saved quotes
//! │   ├── draft.rs    ◄─── Saved draft
//! │   └── favorites.rs◄─── Material favorites
//! └── error.rs        ◄─── CliError (code + message)
//! ```
//!
//! ## Output Streams
//! Results go to stdout. Logs and errors go to stderr, so `--json` output
//! can be piped straight into other tools.

pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod output;

use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use context::Context;
use error::CliResult;

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn,quickquote_cli=info,sqlx=warn";

/// Runs one command.
///
/// ## Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Load configuration ──── QQ_* environment, flags override paths      │
/// │  2. Load rate table ─────── --rates / QQ_RATES_PATH / built-in          │
/// │  3. Dispatch command ────── the database is opened only if needed       │
/// │  4. Close database ──────── if it was opened                            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> CliResult<()> {
    let ctx = Context::from_cli(&cli)?;
    debug!(db = %ctx.db_path().display(), locale = %ctx.locale(), "Context ready");

    let result = commands::dispatch(&ctx, cli.command).await;
    ctx.close().await;
    result
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - Default: `warn`, with the CLI itself at `info`
/// - Override with `RUST_LOG`, e.g. `RUST_LOG=quickquote=debug`
///
/// Logs are written to stderr.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
