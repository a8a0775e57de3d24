//! Cleans a directive payload into an executable statement.

use std::sync::LazyLock;

use regex::Regex;

/// A complete fenced span, possibly across lines.
static FENCED_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```.*?```").expect("fence pattern is valid"));

/// Strips formatting the model sometimes leaves around SQL: whole fenced
/// spans are removed, then any remaining backticks, then surrounding
/// whitespace. An empty result means there is nothing to run.
pub fn sanitize(raw: &str) -> String {
    let without_fences = FENCED_SPAN.replace_all(raw.trim(), "");
    without_fences.replace('`', "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_statement_unchanged() {
        assert_eq!(sanitize("SELECT * FROM users"), "SELECT * FROM users");
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(sanitize("  \n SELECT 1 \n\t"), "SELECT 1");
    }

    #[test]
    fn test_removes_stray_backticks() {
        assert_eq!(sanitize("`SELECT 1`"), "SELECT 1");
        assert_eq!(sanitize("SELECT `name` FROM `users`"), "SELECT name FROM users");
        assert_eq!(sanitize("SELECT *\nFROM t\n```\nDone."), "SELECT *\nFROM t\n\nDone.");
    }

    #[test]
    fn test_removes_whole_fenced_span() {
        assert_eq!(sanitize("```sql\nSELECT 1\n```"), "");
        assert_eq!(sanitize("SELECT 2 ```note``` "), "SELECT 2");
    }

    #[test]
    fn test_empty_payloads() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("   "), "");
        assert_eq!(sanitize("``````"), "");
    }

    #[test]
    fn test_idempotent() {
        for raw in [
            "SELECT 1",
            "  `SELECT` 2  ",
            "```sql\nSELECT 1\n``` tail `x`",
            "a ``` b",
            "\n\nSELECT *\nFROM t\n```\n",
            "````",
        ] {
            let once = sanitize(raw);
            assert_eq!(sanitize(&once), once, "payload {raw:?}");
        }
    }
}
