//! Command handlers for the chat REPL.
//!
//! Recognizes `/history`, `/clear`, `/help` and `exit`/`quit`. The bare
//! words `history` and `clear` work too. Returns a [`CommandAction`] so the
//! REPL loop can decide how to proceed.

use colored::Colorize;

use crate::format;
use crate::generator::Conversation;

/// Action returned by command handling.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum CommandAction {
    /// Command was handled; continue the REPL loop.
    Continue,
    /// Leave the REPL.
    Exit,
    /// Unknown slash command was entered.
    Unknown(String),
}

/// Returns the command name if `line` is a command rather than a question.
pub(crate) fn parse_command(line: &str) -> Option<&str> {
    if let Some(command) = line.strip_prefix('/') {
        return Some(command);
    }
    match line {
        "exit" | "quit" | "history" | "clear" => Some(line),
        _ => None,
    }
}

/// Dispatch and handle a command parsed by [`parse_command`].
pub(crate) fn handle_command(command: &str, conversation: &mut Conversation) -> CommandAction {
    match command {
        "history" => {
            if conversation.history().is_empty() {
                println!("{}", "No messages yet.".dimmed());
            }
            for msg in conversation.history() {
                println!("{}", format::format_message(msg));
                println!();
            }
            CommandAction::Continue
        }
        "clear" => {
            conversation.clear();
            println!("{}", "History cleared.".dimmed());
            CommandAction::Continue
        }
        "help" => {
            println!("{}", "Commands:".bold());
            println!("  {} - show conversation history", "/history".cyan());
            println!("  {} - clear conversation", "/clear".cyan());
            println!("  {} - show this help", "/help".cyan());
            println!("  {} - exit", "exit, Ctrl+D".cyan());
            CommandAction::Continue
        }
        "exit" | "quit" => CommandAction::Exit,
        other => CommandAction::Unknown(format!("/{other}")),
    }
}
