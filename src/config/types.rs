//! Struct definitions and serde defaults for querent configuration.

use serde::{Deserialize, Serialize};

/// Root configuration for querent, deserialized from `config.toml`.
///
/// Fields use serde defaults so querent can run with sensible defaults
/// when no config file exists.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Default model identifier (e.g. `"gpt-4.1"`).
    #[serde(default = "default_model")]
    pub model: String,
    /// Per-provider settings.
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Default provider name (e.g., "openai", "gemini").
    #[serde(default)]
    pub default_provider: Option<String>,
    /// System prompt that teaches the model the directive format.
    #[serde(default = "default_system_prompt")]
    pub system_prompt: Option<String>,
    /// Target database.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Sampling and history settings for the generator.
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Tool-call loop settings.
    #[serde(default)]
    pub agent: AgentConfig,
}

/// Returns the default model identifier.
///
/// Used by serde's `#[serde(default)]` attribute during deserialization.
pub(super) fn default_model() -> String {
    crate::constants::DEFAULT_MODEL.to_string()
}

/// Returns the default system prompt for new conversations.
fn default_system_prompt() -> Option<String> {
    Some(crate::constants::DEFAULT_SYSTEM_PROMPT.to_string())
}

/// Provider-specific configuration map.
///
/// Each field corresponds to a supported LLM provider. Only providers
/// the user has configured will be `Some`.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ProviderConfig {
    pub openai: Option<ProviderEntry>,
    pub anthropic: Option<ProviderEntry>,
    pub ollama: Option<ProviderEntry>,
    pub openrouter: Option<ProviderEntry>,
    pub gemini: Option<ProviderEntry>,
    pub deepseek: Option<ProviderEntry>,
}

/// Connection details for a single LLM provider.
///
/// Allows overriding the API key, endpoint URL, and model on a
/// per-provider basis.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderEntry {
    /// API key for authentication. Can also be set via environment variables.
    pub api_key: Option<String>,
    /// Custom base URL for the provider's API (useful for proxies or self-hosted instances).
    pub base_url: Option<String>,
    /// Model identifier to use with this provider, overriding the global default.
    pub model: Option<String>,
}

/// Database connection settings.
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// Connection URL (`sqlite:…`, `postgres://…`, `mysql://…`).
    pub url: Option<String>,
    /// Per-statement timeout in seconds. No timeout when unset.
    pub timeout_secs: Option<u64>,
}

/// Settings passed to every completion request.
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
pub struct GenerationConfig {
    pub max_tokens: Option<u64>,
    pub temperature: Option<f64>,
    /// Size of the conversation window kept by the generator.
    pub max_messages: Option<usize>,
}

/// Tool-call loop settings.
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
pub struct AgentConfig {
    /// Upper bound on tool-call passes per prompt.
    pub max_iterations: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: default_model(),
            provider: ProviderConfig::default(),
            system_prompt: default_system_prompt(),
            default_provider: None,
            database: DatabaseConfig::default(),
            generation: GenerationConfig::default(),
            agent: AgentConfig::default(),
        }
    }
}
