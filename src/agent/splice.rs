//! Replaces directives with their execution results.

use super::directive::Directive;
use super::executor::ExecutionResult;
use crate::constants::SQL_RESULT_LABEL;

/// Rewrites `text`, replacing each directive's matched text with a
/// `SQL Query Result:` block.
///
/// Replacement is by matched text, not by position: every occurrence of a
/// directive's text is replaced, so byte-identical directives all receive
/// the first result computed for that text.
pub fn splice(text: &str, results: &[(Directive, ExecutionResult)]) -> String {
    results
        .iter()
        .fold(text.to_string(), |current, (directive, result)| {
            current.replace(&directive.matched, &result_block(result))
        })
}

fn result_block(result: &ExecutionResult) -> String {
    format!("{SQL_RESULT_LABEL}\n{result}")
}
