//! Runs sanitized statements and renders their results as text.
//!
//! This is the only place database failures are absorbed: whatever goes
//! wrong comes back as [`ExecutionResult::Error`], and the loop splices it
//! into the conversation so the model can react to it.

use std::fmt;

use crate::constants::SQL_ERROR_PREFIX;
use crate::database::{Database, QueryTable};

const DELIMITER: char = '\t';

/// Outcome of running one statement.
///
/// Both variants render to plain text; only the `SQL Error:` prefix tells
/// them apart once rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionResult {
    /// Tab-separated header line plus one line per row.
    Table(String),
    /// Underlying error message, flattened to one line.
    Error(String),
}

impl ExecutionResult {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

impl fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table(body) => f.write_str(body),
            Self::Error(message) => write!(f, "{SQL_ERROR_PREFIX} {message}"),
        }
    }
}

/// Executes statements against a [`Database`].
pub struct QueryExecutor {
    database: Box<dyn Database>,
}

impl QueryExecutor {
    pub fn new(database: impl Database + 'static) -> Self {
        Self {
            database: Box::new(database),
        }
    }

    /// Runs `sql` and renders the outcome. Never fails.
    pub async fn execute(&self, sql: &str) -> ExecutionResult {
        tracing::debug!(sql, "executing statement");
        match self.database.query(sql).await {
            Ok(table) => {
                tracing::debug!(
                    columns = table.columns.len(),
                    rows = table.rows.len(),
                    "statement succeeded"
                );
                ExecutionResult::Table(render_table(&table))
            }
            Err(err) => {
                tracing::warn!(error = %err, "statement failed");
                let message = err.to_string().lines().collect::<Vec<_>>().join(" ");
                ExecutionResult::Error(message)
            }
        }
    }
}

/// Header line of column names, then one line per row; values joined by
/// tabs and every line newline-terminated. No columns means no output.
pub fn render_table(table: &QueryTable) -> String {
    if table.columns.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    for line in std::iter::once(&table.columns).chain(&table.rows) {
        for (i, value) in line.iter().enumerate() {
            if i > 0 {
                out.push(DELIMITER);
            }
            out.push_str(value);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::DatabaseError;
    use async_trait::async_trait;
    use std::time::Duration;

    struct Fixed(Result<QueryTable, fn() -> DatabaseError>);

    #[async_trait]
    impl Database for Fixed {
        async fn query(&self, _sql: &str) -> Result<QueryTable, DatabaseError> {
            match &self.0 {
                Ok(table) => Ok(table.clone()),
                Err(make) => Err(make()),
            }
        }
    }

    fn table(columns: &[&str], rows: &[&[&str]]) -> QueryTable {
        QueryTable {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|v| v.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn test_render_n_plus_one_lines() {
        let t = table(&["id", "name", "city"], &[&["1", "Ada", "London"], &["2", "Alan", "NULL"]]);
        let text = render_table(&t);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].split('\t').collect::<Vec<_>>(), vec!["id", "name", "city"]);
        assert_eq!(lines[2], "2\tAlan\tNULL");
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_render_single_cell() {
        assert_eq!(render_table(&table(&["col"], &[&["1"]])), "col\n1\n");
    }

    #[test]
    fn test_render_header_only() {
        assert_eq!(render_table(&table(&["a", "b"], &[])), "a\tb\n");
    }

    #[test]
    fn test_render_no_result_set() {
        assert_eq!(render_table(&QueryTable::default()), "");
    }

    #[tokio::test]
    async fn test_execute_success() {
        let executor = QueryExecutor::new(Fixed(Ok(table(&["n"], &[&["7"]]))));
        let result = executor.execute("SELECT 7 AS n").await;
        assert_eq!(result, ExecutionResult::Table("n\n7\n".into()));
        assert!(!result.is_error());
        assert_eq!(result.to_string(), "n\n7\n");
    }

    #[tokio::test]
    async fn test_execute_failure_is_single_line() {
        let executor = QueryExecutor::new(Fixed(Err(|| {
            DatabaseError::Query(sqlx::Error::Protocol("bad\nthings happened".into()))
        })));
        let result = executor.execute("SELEC 1").await;
        assert!(result.is_error());
        let text = result.to_string();
        assert!(text.starts_with("SQL Error: "));
        assert_eq!(text.lines().count(), 1);
    }

    #[tokio::test]
    async fn test_execute_timeout() {
        let executor = QueryExecutor::new(Fixed(Err(|| {
            DatabaseError::Timeout(Duration::from_secs(3))
        })));
        let result = executor.execute("SELECT pg_sleep(10)").await;
        assert_eq!(
            result,
            ExecutionResult::Error("query timed out after 3s".into())
        );
        assert_eq!(result.to_string(), "SQL Error: query timed out after 3s");
    }
}
