//! Terminal formatting for agent answers and conversation history.

use colored::Colorize;

use crate::constants::{SQL_ERROR_PREFIX, SQL_RESULT_LABEL};
use crate::message::{Message, Role};

/// Format a message for terminal display with role label and colors.
pub fn format_message(msg: &Message) -> String {
    let label = match msg.role {
        Role::User => format!("{}", "you:".green().bold()),
        Role::Assistant => format!("{}", "querent:".cyan().bold()),
    };
    let body = match msg.role {
        Role::User => msg.text().to_string(),
        Role::Assistant => render_markdown_lite(msg.text()),
    };
    format!("{}\n{}", label, body)
}

/// Minimal markdown renderer for terminal output.
///
/// Handles bold, inline code and fenced code blocks, and highlights the
/// result blocks the agent splices into answers.
pub fn render_markdown_lite(text: &str) -> String {
    let mut output = String::new();
    let mut in_code_block = false;

    for line in text.lines() {
        if line.starts_with("```") {
            if in_code_block {
                in_code_block = false;
                output.push('\n');
            } else {
                in_code_block = true;
                let lang = line.trim_start_matches('`');
                if !lang.is_empty() {
                    output.push_str(&format!("  {}\n", lang.dimmed()));
                }
            }
            continue;
        }

        if in_code_block {
            output.push_str(&format!("  {}\n", line.dimmed()));
        } else if line == SQL_RESULT_LABEL {
            output.push_str(&format!("{}\n", line.cyan()));
        } else if line.starts_with(SQL_ERROR_PREFIX) {
            output.push_str(&format!("{}\n", line.red()));
        } else {
            output.push_str(&render_inline(line));
            output.push('\n');
        }
    }

    if output.ends_with('\n') {
        output.pop();
    }
    output
}

/// Handle **bold** and `inline code` within a single line.
fn render_inline(line: &str) -> String {
    let mut result = String::new();
    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        if chars[i..].starts_with(&['*', '*']) {
            if let Some(end) = find_closing(&chars, i + 2, &['*', '*']) {
                let bold_text: String = chars[i + 2..end].iter().collect();
                result.push_str(&bold_text.bold().to_string());
                i = end + 2;
                continue;
            }
        }

        if chars[i] == '`' {
            if let Some(end) = find_closing(&chars, i + 1, &['`']) {
                let code_text: String = chars[i + 1..end].iter().collect();
                result.push_str(&code_text.dimmed().to_string());
                i = end + 1;
                continue;
            }
        }

        result.push(chars[i]);
        i += 1;
    }

    result
}

fn find_closing(chars: &[char], start: usize, pattern: &[char]) -> Option<usize> {
    (start..chars.len()).find(|&i| chars[i..].starts_with(pattern))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_plain_text_passes_through() {
        plain();
        assert_eq!(render_markdown_lite("one\ntwo"), "one\ntwo");
    }

    #[test]
    fn test_inline_markers_are_stripped() {
        plain();
        assert_eq!(render_markdown_lite("a **b** `c` d"), "a b c d");
        assert_eq!(render_markdown_lite("unclosed **bold"), "unclosed **bold");
    }

    #[test]
    fn test_code_block_is_indented() {
        plain();
        assert_eq!(
            render_markdown_lite("```sql\nSELECT 1\n```\nafter"),
            "  sql\n  SELECT 1\n\nafter"
        );
    }

    #[test]
    fn test_result_block_keeps_tabs() {
        plain();
        let text = "SQL Query Result:\nid\tname\n1\tAda";
        assert_eq!(render_markdown_lite(text), text);
    }

    #[test]
    fn test_format_message_labels() {
        plain();
        assert_eq!(format_message(&Message::user("hi")), "you:\nhi");
        assert_eq!(
            format_message(&Message::assistant("**ok**")),
            "querent:\nok"
        );
    }
}
