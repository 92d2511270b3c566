//! Command handler layer.
//!
//! ## Files
//! - `rates.rs`: rate table listing.
//! - `estimate.rs`: building the form, pricing it, saving and exporting.
//! - `history.rs`, `draft.rs`, `favorites.rs`: stored data.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate pricing to `quickquote_core` and persistence to
//!   `quickquote_store`.

pub mod draft;
pub mod estimate;
pub mod favorites;
pub mod history;
pub mod rates;

use crate::cli::Command;
use crate::context::Context;
use crate::error::CliResult;

pub async fn dispatch(ctx: &Context, command: Command) -> CliResult<()> {
    match command {
        Command::Rates => rates::run(ctx),
        Command::Estimate(args) => estimate::run(ctx, args).await,
        Command::History { command } => history::run(ctx, command).await,
        Command::Draft { command } => draft::run(ctx, command).await,
        Command::Favorites { command } => favorites::run(ctx, command).await,
    }
}
