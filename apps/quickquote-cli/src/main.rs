//! # QuickQuote Entry Point
//!
//! Parses arguments, sets up logging and hands off to
//! [`quickquote_cli::run`]. See `lib.rs` for the actual setup logic.

use std::process::ExitCode;

use clap::Parser;

use quickquote_cli::cli::Cli;
use quickquote_cli::output::print_error;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    quickquote_cli::init_tracing();

    let json = cli.json;
    match quickquote_cli::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print_error(json, &err);
            ExitCode::from(err.code.exit_status())
        }
    }
}
