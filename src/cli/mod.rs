//! Command-line interface definition and dispatch for querent.
//!
//! Uses [`clap`] for argument parsing with derive macros. `ask` and `chat`
//! both build an [`Agent`] from the loaded config and the target flags;
//! `config` inspects the configuration.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use crate::agent::executor::QueryExecutor;
use crate::agent::{Agent, AgentReply, StopReason};
use crate::config::Config;
use crate::constants::USER_QUESTION_PREFIX;
use crate::database::SqlDatabase;
use crate::generator::Conversation;
use crate::provider::{self, Provider};
use crate::{chat, format};

/// Top-level CLI structure for querent.
#[derive(Parser)]
#[command(name = "querent", about = "Ask a SQL database questions in plain language")]
pub struct Cli {
    /// Log more to stderr (-v info, -vv debug). RUST_LOG overrides this.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for the querent CLI.
///
/// The `///` doc comments on variants double as `--help` text rendered by clap.
#[derive(Subcommand)]
pub enum Commands {
    /// Ask a one-shot question
    Ask {
        /// The question to ask
        prompt: Vec<String>,
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Start an interactive chat session
    Chat {
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Which model answers and which database it queries.
#[derive(Args)]
pub struct TargetArgs {
    /// Provider to use (openai, anthropic, gemini, deepseek, openrouter, ollama)
    #[arg(short, long)]
    pub provider: Option<String>,
    /// Model to use (overrides config); accepts provider/model
    #[arg(short, long)]
    pub model: Option<String>,
    /// Database URL (overrides DATABASE_URL and config)
    #[arg(short, long)]
    pub database: Option<String>,
}

/// Subcommands for the `config` command.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the config path and effective settings
    Show,
}

/// Parses command-line arguments into a [`Cli`] struct.
///
/// Delegates to [`clap::Parser::parse`], which exits the process on invalid input.
pub fn parse() -> Cli {
    Cli::parse()
}

/// Dispatches the parsed CLI command to its handler.
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Ask { prompt, target } => {
            let prompt = prompt.join(" ");
            if prompt.trim().is_empty() {
                anyhow::bail!("No prompt provided. Usage: querent ask \"your question here\"");
            }

            let config = Config::load()?;
            let mut agent = build_agent(&config, &target)?;

            println!("{} {}", ">".green().bold(), prompt);
            println!();

            let reply = agent
                .handle_prompt(&format!("{USER_QUESTION_PREFIX}{prompt}"))
                .await?;
            print_reply(&reply);
            Ok(())
        }
        Commands::Chat { target } => {
            let config = Config::load()?;
            let agent = build_agent(&config, &target)?;
            chat::run_chat(agent).await
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let config = Config::load()?;
                let path = Config::config_path()?;
                println!("{} {}", "Config path:".bold(), path.display());
                println!();
                println!("{}", toml::to_string_pretty(&config.redacted())?);
                Ok(())
            }
        },
    }
}

/// Builds the agent for `target`, printing a banner describing it.
///
/// # Errors
///
/// Fails when the provider or model cannot be resolved, no API key is
/// available, or no database URL is configured.
pub(crate) fn build_agent(config: &Config, target: &TargetArgs) -> Result<Agent<Conversation>> {
    let selection = provider::resolve_model(
        target.provider.as_deref(),
        target.model.as_deref(),
        config,
    )?;
    let url = config.database_url(target.database.as_deref()).context(
        "No database configured. Pass --database, set DATABASE_URL, or set [database] url in config.toml",
    )?;

    let provider = Provider::from_config(config, &selection)?;
    let database = SqlDatabase::new(url, config.query_timeout())?;

    println!(
        "{} [provider: {}] [model: {}] [db: {}]",
        "querent".bold().cyan(),
        provider.kind().name().yellow(),
        provider.model().yellow(),
        database.redacted_url().yellow(),
    );
    tracing::info!(
        backend = database.backend().name(),
        max_iterations = config.max_iterations(),
        "agent ready"
    );
    println!();

    let conversation = Conversation::new(
        provider,
        config.system_prompt.clone(),
        config.max_messages(),
    );
    Ok(Agent::new(
        conversation,
        QueryExecutor::new(database),
        config.max_iterations(),
    ))
}

/// Prints an agent reply, noting when the loop was cut off.
pub(crate) fn print_reply(reply: &AgentReply) {
    println!("{}", format::render_markdown_lite(&reply.text));
    if reply.stop == StopReason::IterationLimit {
        println!();
        println!(
            "{}",
            format!(
                "(stopped after {} tool-call passes; the answer may be incomplete)",
                reply.iterations
            )
            .yellow()
            .dimmed()
        );
    }
}
