use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "quickquote", version, about = "Renovation cost estimator")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(long, global = true, value_name = "PATH", help = "SQLite file for history, draft and favorites")]
    pub db: Option<PathBuf>,
    #[arg(long, global = true, value_name = "PATH", help = "Rate table JSON (default: built-in table)")]
    pub rates: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List projects, quality tiers and locations
    Rates,
    /// Price a room and print the summary
    #[command(allow_negative_numbers = true)]
    Estimate(EstimateArgs),
    /// Saved quotes
    History {
        #[command(subcommand)]
        command: HistoryCommand,
    },
    /// The saved draft
    Draft {
        #[command(subcommand)]
        command: DraftCommand,
    },
    /// Material favorites
    Favorites {
        #[command(subcommand)]
        command: FavoritesCommand,
    },
}

#[derive(Args, Debug, Default)]
pub struct EstimateArgs {
    #[command(flatten)]
    pub quote: QuoteArgs,
    #[arg(long, help = "Start from the saved draft")]
    pub from_draft: bool,
    #[arg(
        long,
        value_name = "ID",
        conflicts_with = "from_draft",
        help = "Start from a saved quote"
    )]
    pub from_history: Option<String>,
    #[arg(long, help = "Record the quote in history")]
    pub save: bool,
    #[arg(long, help = "Save the form as the draft")]
    pub save_draft: bool,
    #[arg(long, value_name = "FILE", help = "Write the text summary to FILE")]
    pub export: Option<PathBuf>,
}

/// Quote form flags. Numbers are taken as text and sanitized, so
/// `--size 12ft` reads as 12.
#[derive(Args, Debug, Default, Clone)]
pub struct QuoteArgs {
    #[arg(long, help = "Homeowner or Contractor")]
    pub role: Option<String>,
    #[arg(long)]
    pub project: Option<String>,
    #[arg(long)]
    pub quality: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long, help = "Room size (1 to 100000)")]
    pub size: Option<String>,
    #[arg(long, help = "sqft or sqm")]
    pub unit: Option<String>,
    #[arg(long, help = "Display currency: Auto or a 3-letter code")]
    pub currency: Option<String>,
    #[arg(long, value_name = "PCT")]
    pub labor_markup: Option<String>,
    #[arg(long, value_name = "PCT")]
    pub material_markup: Option<String>,
    #[arg(long, value_name = "PCT")]
    pub overhead: Option<String>,
    #[arg(long, value_name = "PCT")]
    pub discount: Option<String>,
    #[arg(long, value_name = "PCT")]
    pub tax: Option<String>,
    #[arg(long = "extra", value_name = "NAME=COST", help = "Add a one-off material line")]
    pub extras: Vec<String>,
    #[arg(long = "favorite", value_name = "ID", help = "Add a material favorite")]
    pub favorites: Vec<String>,
    #[arg(long)]
    pub client_name: Option<String>,
    #[arg(long)]
    pub client_company: Option<String>,
    #[arg(long)]
    pub client_email: Option<String>,
    #[arg(long)]
    pub client_phone: Option<String>,
    #[arg(long)]
    pub client_notes: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum HistoryCommand {
    /// Saved quotes, newest first
    List,
    /// One saved quote
    Show { id: String },
    /// Delete every saved quote
    Clear,
}

#[derive(Subcommand, Debug)]
pub enum DraftCommand {
    /// Print the saved draft
    Show,
    /// Delete the saved draft
    Clear,
}

#[derive(Subcommand, Debug)]
pub enum FavoritesCommand {
    /// The catalogue
    List,
    /// Add a favorite
    Add { name: String, cost: String },
    /// Remove a favorite by id
    Remove { id: String },
    /// Restore the built-in catalogue
    Reset,
}
