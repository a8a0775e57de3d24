//! Tool-call directive extraction.
//!
//! The model asks for a query by writing a directive into its reply:
//!
//! ```text
//! Tool: SQLQuery
//! Args: SELECT name FROM customers
//! ```
//!
//! either bare ([`Encoding::Plain`]) or wrapped in a ```` ```tool_code ````
//! fence ([`Encoding::Fenced`]). [`extract`] runs one pass per encoding over
//! the whole text and concatenates the results, plain matches first. The two
//! passes are independent, so a fenced directive is reported by both.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// `Tool: SQLQuery` / `Args:` header of a plain directive, up to the payload.
static PLAIN_HEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Tool:\s*SQLQuery\s*\nArgs:\s*").expect("plain directive pattern is valid")
});

static FENCED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```tool_code\s*\nTool:\s*SQLQuery\s*\nArgs:\s*(.*?)\s*\n```")
        .expect("fenced directive pattern is valid")
});

/// The tools a directive can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    SqlQuery,
}

impl ToolKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SqlQuery => "SQLQuery",
        }
    }
}

/// Textual form a directive was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Bare `Tool:`/`Args:` lines, payload ends at a blank line, the next
    /// `Tool:` line, or end of text.
    Plain,
    /// The same lines inside a ```` ```tool_code ```` fence.
    Fenced,
}

/// One tool call found in generated text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub tool: ToolKind,
    pub encoding: Encoding,
    /// Payload as the model wrote it, before sanitizing.
    pub raw_args: String,
    /// Byte range of the whole directive in the scanned text.
    pub span: Range<usize>,
    /// The text covered by `span`.
    pub matched: String,
}

/// Finds every directive in `text`: plain ones in textual order, then
/// fenced ones in textual order.
pub fn extract(text: &str) -> Vec<Directive> {
    let mut directives = scan_plain(text);
    directives.extend(scan_fenced(text));
    directives
}

/// Whether `text` holds at least one directive.
pub fn has_directives(text: &str) -> bool {
    // Every fenced directive contains a plain one.
    PLAIN_HEAD.is_match(text)
}

fn scan_plain(text: &str) -> Vec<Directive> {
    let mut found = Vec::new();
    let mut pos = 0;
    while let Some(head) = PLAIN_HEAD.find_at(text, pos) {
        let args_start = head.end();
        let end = plain_payload_end(text, args_start);
        found.push(Directive {
            tool: ToolKind::SqlQuery,
            encoding: Encoding::Plain,
            raw_args: text[args_start..end].to_string(),
            span: head.start()..end,
            matched: text[head.start()..end].to_string(),
        });
        pos = end;
    }
    found
}

/// Where a plain payload starting at `start` stops: the first blank line,
/// the first newline followed by `Tool:`, or end of text (ignoring a single
/// trailing newline).
fn plain_payload_end(text: &str, start: usize) -> usize {
    let rest = &text[start..];
    let mut stop = rest.len();
    if rest.ends_with('\n') {
        stop -= 1;
    }
    for terminator in ["\n\n", "\nTool:"] {
        if let Some(i) = rest.find(terminator) {
            stop = stop.min(i);
        }
    }
    start + stop
}

fn scan_fenced(text: &str) -> Vec<Directive> {
    FENCED
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let args = caps.get(1)?;
            Some(Directive {
                tool: ToolKind::SqlQuery,
                encoding: Encoding::Fenced,
                raw_args: args.as_str().to_string(),
                span: whole.range(),
                matched: whole.as_str().to_string(),
            })
        })
        .collect()
}
