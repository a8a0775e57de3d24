//! The tool-call loop.
//!
//! [`Agent`] sends the user's prompt to a [`Generator`], runs every SQL
//! directive found in the reply through the [`QueryExecutor`], splices the
//! results back into the text, and asks the generator to continue until it
//! answers without directives or the iteration cap is hit.
//!
//! Database failures never stop the loop; they are spliced in as
//! `SQL Error:` results for the model to read. Generator failures are
//! returned to the caller as-is. There is no cancellation hook other than
//! the iteration cap.

pub mod directive;
pub mod executor;
pub mod sanitize;
pub mod splice;

use anyhow::Result;

use crate::generator::Generator;
use directive::{extract, has_directives, Directive};
use executor::{ExecutionResult, QueryExecutor};
use sanitize::sanitize;
use splice::splice;

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The generator answered without further directives.
    Answered,
    /// The iteration cap was reached; the text is whatever was current.
    IterationLimit,
}

/// Final text of one prompt, tagged with how the loop ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentReply {
    pub text: String,
    pub stop: StopReason,
    /// Tool-call passes counted against the cap.
    pub iterations: usize,
}

enum State {
    Extracting(String),
    Executing(String, Vec<Directive>),
    AwaitingContinuation(String),
    Done(String),
    Aborted(String),
}

/// Drives one generator and one executor through the tool-call loop.
///
/// Not re-entrant: the generator's conversation state is mutated on every
/// call, so prompts must be handled one at a time.
pub struct Agent<G: Generator> {
    generator: G,
    executor: QueryExecutor,
    max_iterations: usize,
}

impl<G: Generator> Agent<G> {
    pub fn new(generator: G, executor: QueryExecutor, max_iterations: usize) -> Self {
        Self {
            generator,
            executor,
            max_iterations,
        }
    }

    #[cfg(test)]
    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn generator_mut(&mut self) -> &mut G {
        &mut self.generator
    }

    /// Answers `user_prompt` using the configured iteration cap.
    pub async fn handle_prompt(&mut self, user_prompt: &str) -> Result<AgentReply> {
        self.run(user_prompt, self.max_iterations).await
    }

    /// Answers `user_prompt`, allowing at most `max_iterations` passes.
    ///
    /// A pass is counted each time spliced text still holds directives and
    /// each time a continuation brings new ones. Reaching the cap returns the
    /// current text unchanged, which may still contain unexecuted directives.
    pub async fn run(&mut self, user_prompt: &str, max_iterations: usize) -> Result<AgentReply> {
        let first = self.generator.generate(user_prompt).await?;
        let mut iterations = 0;
        let mut state = State::Extracting(first);

        loop {
            state = match state {
                State::Extracting(text) if iterations >= max_iterations => State::Aborted(text),
                State::Extracting(text) => {
                    let directives = extract(&text);
                    tracing::debug!(count = directives.len(), "extracted directives");
                    if directives.is_empty() {
                        State::AwaitingContinuation(text)
                    } else {
                        State::Executing(text, directives)
                    }
                }
                State::Executing(text, directives) => {
                    let spliced = self.execute_all(&text, directives).await;
                    if has_directives(&spliced) {
                        iterations += 1;
                        State::Extracting(spliced)
                    } else {
                        State::AwaitingContinuation(spliced)
                    }
                }
                State::AwaitingContinuation(spliced) => {
                    let prompt = continuation_prompt(&spliced, user_prompt);
                    let continuation = self.generator.generate(&prompt).await?;
                    if has_directives(&continuation) {
                        iterations += 1;
                        State::Extracting(continuation)
                    } else {
                        State::Done(format!("{spliced}\n\n{continuation}"))
                    }
                }
                State::Done(text) => {
                    return Ok(AgentReply {
                        text,
                        stop: StopReason::Answered,
                        iterations,
                    });
                }
                State::Aborted(text) => {
                    tracing::warn!(iterations, "tool-call iteration cap reached");
                    return Ok(AgentReply {
                        text,
                        stop: StopReason::IterationLimit,
                        iterations,
                    });
                }
            };
        }
    }

    /// Runs the directives in match order and splices their results into
    /// `text`. Directives with an empty statement are left as they are.
    async fn execute_all(&self, text: &str, directives: Vec<Directive>) -> String {
        let mut results: Vec<(Directive, ExecutionResult)> = Vec::with_capacity(directives.len());
        for directive in directives {
            let sql = sanitize(&directive.raw_args);
            if sql.is_empty() {
                tracing::debug!(span = ?directive.span, "skipping empty directive");
                continue;
            }
            let result = self.executor.execute(&sql).await;
            tracing::debug!(
                tool = directive.tool.name(),
                encoding = ?directive.encoding,
                failed = result.is_error(),
                "directive executed"
            );
            results.push((directive, result));
        }
        splice(text, &results)
    }
}

/// Prompt asking the generator to carry on from the spliced results.
pub fn continuation_prompt(results: &str, user_prompt: &str) -> String {
    format!(
        "Here are the SQL query results:\n{results}\n\n\
Based on these results, please continue to answer the user's question: '{user_prompt}'.\n\n\
If you need more information (like table columns), write additional SQL queries.\n\n\
If you have enough information, provide the final answer."
    )
}
