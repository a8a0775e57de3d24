//! Interactive chat REPL for querent.
//!
//! Provides a multi-turn conversation loop using [`rustyline`] for readline
//! support (history, line editing). Each line goes through the agent's
//! tool-call loop; the generator keeps the conversation between turns.

mod commands;

use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::agent::Agent;
use crate::cli::print_reply;
use crate::config::Config;
use crate::constants::USER_QUESTION_PREFIX;
use crate::generator::Conversation;

/// Runs the interactive chat REPL.
///
/// # Readline behavior
///
/// - **Ctrl+C**: cancels current input, stays in REPL
/// - **Ctrl+D** or `exit`: exits cleanly with "goodbye."
/// - Readline history is persisted to `~/.cache/querent/chat_history.txt`
///
/// A failed turn (provider error) is reported and the REPL keeps going.
pub async fn run_chat(mut agent: Agent<Conversation>) -> Result<()> {
    println!(
        "{} (type {} for commands, Ctrl+D to exit)",
        "SQL database agent ready.".bold(),
        "/help".cyan(),
    );
    println!();

    let mut rl = DefaultEditor::new()?;
    let history_path = Config::cache_dir()?.join(crate::constants::HISTORY_FILENAME);
    if history_path.exists() {
        let _ = rl.load_history(&history_path);
    }

    loop {
        let readline = rl.readline(&format!("{} ", ">".green().bold()));

        match readline {
            Ok(line) => {
                let line = line.trim().to_string();
                if line.is_empty() {
                    continue;
                }

                if let Some(command) = commands::parse_command(&line) {
                    match commands::handle_command(command, agent.generator_mut()) {
                        commands::CommandAction::Continue => continue,
                        commands::CommandAction::Exit => {
                            println!("{}", "goodbye.".dimmed());
                            break;
                        }
                        commands::CommandAction::Unknown(cmd) => {
                            println!("{} Unknown command: {}", "?".yellow(), cmd);
                            continue;
                        }
                    }
                }

                let _ = rl.add_history_entry(&line);
                println!();

                match agent
                    .handle_prompt(&format!("{USER_QUESTION_PREFIX}{line}"))
                    .await
                {
                    Ok(reply) => print_reply(&reply),
                    Err(e) => eprintln!("{} {:#}", "error:".red().bold(), e),
                }
                println!();
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "^C".dimmed());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "goodbye.".dimmed());
                break;
            }
            Err(e) => {
                eprintln!("{} {}", "error:".red().bold(), e);
                break;
            }
        }
    }

    if let Some(parent) = history_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let _ = rl.save_history(&history_path);

    Ok(())
}
