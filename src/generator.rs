//! Text-generation seam used by the agent loop.
//!
//! [`Generator`] is the only thing the tool-call loop knows about the LLM:
//! send a prompt, get text back. [`Conversation`] is the production
//! implementation; it owns the conversation history and replays it to the
//! [`Provider`] on every call.

use anyhow::Result;
use async_trait::async_trait;

use crate::message::{Message, Role};
use crate::provider::Provider;

/// Something that turns a prompt into generated text.
///
/// Implementations may keep conversation state between calls, which is why
/// `generate` takes `&mut self`. Errors (network, auth, quota) are returned
/// to the caller untouched.
#[async_trait]
pub trait Generator: Send {
    async fn generate(&mut self, prompt: &str) -> Result<String>;
}

/// A provider-backed conversation with a bounded history window.
pub struct Conversation {
    provider: Provider,
    system_prompt: Option<String>,
    history: Vec<Message>,
    max_messages: usize,
}

impl Conversation {
    pub fn new(provider: Provider, system_prompt: Option<String>, max_messages: usize) -> Self {
        Self {
            provider,
            system_prompt,
            history: Vec::new(),
            max_messages,
        }
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// Forget every exchanged message. The system prompt is kept.
    pub fn clear(&mut self) {
        self.history.clear();
    }
}

#[async_trait]
impl Generator for Conversation {
    async fn generate(&mut self, prompt: &str) -> Result<String> {
        tracing::info!(
            provider = self.provider.kind().name(),
            history = self.history.len(),
            "sending prompt to generator"
        );
        let reply = self
            .provider
            .chat(self.system_prompt.as_deref(), &self.history, prompt)
            .await?;

        self.history.push(Message::user(prompt));
        self.history.push(Message::assistant(reply.clone()));
        trim_history(&mut self.history, self.max_messages);
        Ok(reply)
    }
}

/// Drops the oldest messages until at most `max` remain, then keeps
/// dropping until the window starts on a user turn.
fn trim_history(history: &mut Vec<Message>, max: usize) {
    if history.len() > max {
        let excess = history.len() - max;
        history.drain(..excess);
    }
    let leading_replies = history
        .iter()
        .take_while(|m| m.role == Role::Assistant)
        .count();
    history.drain(..leading_replies);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turns(n: usize) -> Vec<Message> {
        (0..n)
            .flat_map(|i| {
                [
                    Message::user(format!("q{i}")),
                    Message::assistant(format!("a{i}")),
                ]
            })
            .collect()
    }

    #[test]
    fn test_trim_under_limit_keeps_everything() {
        let mut history = turns(2);
        trim_history(&mut history, 10);
        assert_eq!(history.len(), 4);
    }

    #[test]
    fn test_trim_drops_oldest() {
        let mut history = turns(3);
        trim_history(&mut history, 4);
        assert_eq!(history.len(), 4);
        assert_eq!(history[0].text(), "q1");
        assert_eq!(history[3].text(), "a2");
    }

    #[test]
    fn test_trim_never_starts_on_reply() {
        let mut history = turns(3);
        trim_history(&mut history, 3);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, Role::User);
        assert_eq!(history[0].text(), "q2");
    }

    #[test]
    fn test_trim_zero_limit_empties() {
        let mut history = turns(1);
        trim_history(&mut history, 0);
        assert!(history.is_empty());
    }
}
