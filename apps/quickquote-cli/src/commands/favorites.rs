//! `quickquote favorites list | add <name> <cost> | remove <id> | reset`

use tracing::info;

use quickquote_core::materials::default_favorites;
use quickquote_core::MaterialFavorite;

use crate::cli::FavoritesCommand;
use crate::context::Context;
use crate::error::CliResult;
use crate::output::{print_list, print_one};

pub async fn run(ctx: &Context, command: FavoritesCommand) -> CliResult<()> {
    let repo = ctx.db().await?.favorites();
    let fmt = ctx.formatter(quickquote_core::DEFAULT_CURRENCY);
    let row = |f: &MaterialFavorite| format!("{}  {}  {}", f.id, f.name, fmt.format(f.cost));

    match command {
        FavoritesCommand::List => {
            let favorites = repo.list().await?;
            if favorites.is_empty() && !ctx.json {
                println!("No material favorites");
                return Ok(());
            }
            print_list(ctx.json, &favorites, row)
        }
        FavoritesCommand::Add { name, cost } => {
            // unparsable text becomes NaN so validation reports the cost
            let cost = cost.trim().parse::<f64>().unwrap_or(f64::NAN);
            let favorite = MaterialFavorite::new(&name, cost)?;
            repo.add(favorite.clone()).await?;
            print_one(ctx.json, &favorite, |f| format!("Added {}", row(f)))
        }
        FavoritesCommand::Remove { id } => {
            let remaining = repo.remove(&id).await?;
            print_list(ctx.json, &remaining, row)
        }
        FavoritesCommand::Reset => {
            let favorites = default_favorites();
            repo.replace_all(&favorites).await?;
            info!(count = favorites.len(), "Restored default favorites");
            print_list(ctx.json, &favorites, row)
        }
    }
}
