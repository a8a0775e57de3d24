//! Entry point for querent, a natural-language-to-SQL agent for the terminal.
//!
//! This binary loads environment variables, parses CLI arguments via [`cli`],
//! sets up logging, and dispatches to the appropriate subcommand handler.

mod agent;
mod chat;
mod cli;
mod config;
mod constants;
mod database;
mod format;
mod generator;
mod logging;
mod message;
mod provider;

use anyhow::Result;

/// Runs the querent CLI.
///
/// Loads `.env` files (silently ignored if absent), parses command-line
/// arguments into a [`cli::Cli`] struct, installs the log subscriber, and
/// dispatches the chosen subcommand via [`cli::run`].
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = cli::parse();
    logging::init(cli.verbose);
    cli::run(cli).await
}
