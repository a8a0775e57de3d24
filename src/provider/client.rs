//! LLM provider client.
//!
//! Contains the [`Provider`] struct which wraps rig-core provider clients
//! behind enum dispatch, keeping provider-specific details out of the
//! generator and CLI layers.

use anyhow::{Context, Result};
use rig::client::CompletionClient;
use rig::completion::Chat;
use rig::message::Message as RigMessage;
use rig::providers::{anthropic, deepseek, gemini, openai, openrouter};

use super::kind::ProviderKind;
use super::resolve::ModelSelection;
use crate::config::Config;
use crate::message::{Message, Role};

/// Internal enum wrapping provider-specific clients.
enum ClientKind {
    Anthropic(anthropic::Client),
    OpenAI(openai::Client),
    OpenRouter(openrouter::Client),
    Ollama(openai::Client),
    Gemini(gemini::Client),
    DeepSeek(deepseek::Client),
}

/// Sampling settings applied to every agent built by a [`Provider`].
#[derive(Debug, Clone, Copy)]
pub struct Sampling {
    pub max_tokens: u64,
    pub temperature: f64,
}

/// A configured LLM provider ready to handle completion requests.
///
/// Agents are constructed on each call since they are cheap to create and
/// the preamble may change between conversations.
pub struct Provider {
    client: ClientKind,
    kind: ProviderKind,
    model: String,
    sampling: Sampling,
}

/// Builds an agent from the given client, model, sampling settings and
/// optional system prompt, then executes the block with the agent bound
/// to `$agent`.
macro_rules! with_agent {
    ($client:expr, $model:expr, $sampling:expr, $sys:expr, |$agent:ident| $body:expr) => {{
        let $agent = if let Some(sys) = $sys {
            $client
                .agent($model)
                .preamble(sys)
                .max_tokens($sampling.max_tokens)
                .temperature($sampling.temperature)
                .build()
        } else {
            $client
                .agent($model)
                .max_tokens($sampling.max_tokens)
                .temperature($sampling.temperature)
                .build()
        };
        $body
    }};
}

/// Dispatches an operation across provider-specific clients.
///
/// Matches on [`ClientKind`] and executes the same block for each variant,
/// letting the compiler monomorphize per provider.
macro_rules! dispatch {
    ($self:expr, |$client:ident| $body:expr) => {
        match &$self.client {
            ClientKind::Anthropic($client) => $body,
            ClientKind::OpenAI($client) => $body,
            ClientKind::OpenRouter($client) => $body,
            ClientKind::Ollama($client) => $body,
            ClientKind::Gemini($client) => $body,
            ClientKind::DeepSeek($client) => $body,
        }
    };
}

impl Provider {
    /// Creates a new [`Provider`] from the loaded application config.
    ///
    /// Resolves the API key through the config precedence chain
    /// (env var → config file → substitution) and builds the appropriate
    /// provider client.
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is found for the selected provider
    /// or if client construction fails.
    pub fn from_config(config: &Config, selection: &ModelSelection) -> Result<Self> {
        let api_key = |name: &str, env: &str| {
            config.resolve_api_key(name).with_context(|| {
                format!("No API key found for {name}. Set {env} or configure it in config.toml")
            })
        };

        let client = match selection.provider {
            ProviderKind::Anthropic => {
                let key = api_key("anthropic", "ANTHROPIC_API_KEY")?;
                ClientKind::Anthropic(
                    anthropic::Client::new(&key).context("Failed to create Anthropic client")?,
                )
            }
            ProviderKind::OpenAI => {
                let key = api_key("openai", "OPENAI_API_KEY")?;
                ClientKind::OpenAI(
                    openai::Client::new(&key).context("Failed to create OpenAI client")?,
                )
            }
            ProviderKind::OpenRouter => {
                let key = api_key("openrouter", "OPENROUTER_API_KEY")?;
                ClientKind::OpenRouter(
                    openrouter::Client::new(&key).context("Failed to create OpenRouter client")?,
                )
            }
            ProviderKind::Gemini => {
                let key = api_key("gemini", "GEMINI_API_KEY")?;
                ClientKind::Gemini(
                    gemini::Client::new(&key).context("Failed to create Gemini client")?,
                )
            }
            ProviderKind::DeepSeek => {
                let key = api_key("deepseek", "DEEPSEEK_API_KEY")?;
                ClientKind::DeepSeek(
                    deepseek::Client::new(&key).context("Failed to create DeepSeek client")?,
                )
            }
            ProviderKind::Ollama => {
                let base_url = config
                    .provider
                    .ollama
                    .as_ref()
                    .and_then(|o| o.base_url.as_deref())
                    .filter(|u| !u.is_empty())
                    .unwrap_or(crate::constants::OLLAMA_DEFAULT_BASE_URL);
                let client = openai::Client::builder()
                    .api_key("ollama")
                    .base_url(format!("{}/v1", base_url))
                    .build()
                    .context("Failed to create Ollama client")?;
                ClientKind::Ollama(client)
            }
        };

        Ok(Self {
            client,
            kind: selection.provider,
            model: selection.model.clone(),
            sampling: Sampling {
                max_tokens: config.max_tokens(),
                temperature: config.temperature(),
            },
        })
    }

    pub fn kind(&self) -> ProviderKind {
        self.kind
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends `prompt` on top of `history` and returns the full reply.
    ///
    /// `system` becomes the agent preamble. `history` holds prior turns
    /// only; the prompt itself must not already be in it.
    pub async fn chat(
        &self,
        system: Option<&str>,
        history: &[Message],
        prompt: &str,
    ) -> Result<String> {
        let chat_history: Vec<RigMessage> = history.iter().map(to_rig_message).collect();

        dispatch!(self, |client| {
            let response = with_agent!(client, &self.model, self.sampling, system, |agent| {
                agent.chat(prompt.to_string(), chat_history.clone()).await
            });
            response.with_context(|| format!("{} request failed", self.kind.name()))
        })
    }
}

/// Converts a querent [`Message`] to a rig-core [`RigMessage`].
fn to_rig_message(msg: &Message) -> RigMessage {
    match msg.role {
        Role::User => RigMessage::user(msg.text()),
        Role::Assistant => RigMessage::assistant(msg.text()),
    }
}
