//! Environment variable substitution and effective-value resolution.

use super::types::{Config, ProviderEntry};

use crate::constants::{
    DATABASE_URL_ENV, DEFAULT_MAX_MESSAGES, DEFAULT_TEMPERATURE, MAX_TOKENS, MAX_TOOL_ITERATIONS,
};
use crate::database::redact_password;

impl Config {
    /// Resolve {env:VAR_NAME} patterns in string fields.
    pub(super) fn resolve_substitutions(&mut self) {
        self.model = resolve_str(&self.model);
        if let Some(ref mut sp) = self.system_prompt {
            *sp = resolve_str(sp);
        }
        if let Some(ref mut dp) = self.default_provider {
            *dp = resolve_str(dp);
        }
        if let Some(ref mut url) = self.database.url {
            *url = resolve_str(url);
        }
        for entry in [
            &mut self.provider.openai,
            &mut self.provider.anthropic,
            &mut self.provider.ollama,
            &mut self.provider.openrouter,
            &mut self.provider.gemini,
            &mut self.provider.deepseek,
        ] {
            resolve_provider_entry(entry);
        }
    }

    /// Resolve API key for a provider: env var first, then config value.
    pub fn resolve_api_key(&self, provider: &str) -> Option<String> {
        let env_key = format!("{}_API_KEY", provider.to_uppercase());
        if let Ok(val) = std::env::var(&env_key) {
            if !val.is_empty() {
                return Some(val);
            }
        }

        self.provider_entry(provider)
            .and_then(|e| e.api_key.clone())
            .filter(|k| !k.is_empty())
    }

    /// Looks up the config entry for a provider by name.
    pub fn provider_entry(&self, provider: &str) -> Option<&ProviderEntry> {
        match provider {
            "openai" => self.provider.openai.as_ref(),
            "anthropic" => self.provider.anthropic.as_ref(),
            "ollama" => self.provider.ollama.as_ref(),
            "openrouter" => self.provider.openrouter.as_ref(),
            "gemini" => self.provider.gemini.as_ref(),
            "deepseek" => self.provider.deepseek.as_ref(),
            _ => None,
        }
    }

    /// Resolve the database URL: CLI flag, then `DATABASE_URL`, then config.
    /// Empty values (e.g. an unset `{env:…}` placeholder) count as missing.
    pub fn database_url(&self, cli_url: Option<&str>) -> Option<String> {
        cli_url
            .map(String::from)
            .or_else(|| std::env::var(DATABASE_URL_ENV).ok())
            .or_else(|| self.database.url.clone())
            .filter(|u| !u.trim().is_empty())
    }

    /// Get the configured default provider name, if any.
    pub fn provider_name(&self) -> Option<&str> {
        self.default_provider.as_deref()
    }

    /// Get the model name from config, stripping provider prefix if present.
    /// Returns None if the model is the compile-time default (meaning user hasn't configured it).
    pub fn model_name(&self) -> Option<String> {
        let m = &self.model;
        if m == crate::constants::DEFAULT_MODEL {
            return None;
        }
        if let Some((_prov, model)) = m.split_once('/') {
            Some(model.to_string())
        } else {
            Some(m.to_string())
        }
    }

    pub fn max_tokens(&self) -> u64 {
        self.generation.max_tokens.unwrap_or(MAX_TOKENS)
    }

    pub fn temperature(&self) -> f64 {
        self.generation.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    }

    /// Number of messages the generator keeps in its history window.
    pub fn max_messages(&self) -> usize {
        self.generation.max_messages.unwrap_or(DEFAULT_MAX_MESSAGES)
    }

    /// Upper bound on tool-call passes per prompt.
    pub fn max_iterations(&self) -> usize {
        self.agent.max_iterations.unwrap_or(MAX_TOOL_ITERATIONS)
    }

    /// Per-statement database timeout, if configured.
    pub fn query_timeout(&self) -> Option<std::time::Duration> {
        self.database
            .timeout_secs
            .filter(|s| *s > 0)
            .map(std::time::Duration::from_secs)
    }

    /// A copy safe to print: API keys masked, database password hidden.
    pub fn redacted(&self) -> Config {
        let mut config = self.clone();
        if let Some(ref mut url) = config.database.url {
            *url = redact_password(url);
        }
        for entry in [
            &mut config.provider.openai,
            &mut config.provider.anthropic,
            &mut config.provider.ollama,
            &mut config.provider.openrouter,
            &mut config.provider.gemini,
            &mut config.provider.deepseek,
        ] {
            if let Some(key) = entry.as_mut().and_then(|e| e.api_key.as_mut()) {
                if !key.is_empty() {
                    *key = "***".to_string();
                }
            }
        }
        config
    }
}

/// Resolves `{env:VAR}` patterns in a single provider entry's `api_key` and `base_url`.
fn resolve_provider_entry(entry: &mut Option<ProviderEntry>) {
    if let Some(ref mut e) = entry {
        if let Some(ref mut key) = e.api_key {
            *key = resolve_str(key);
        }
        if let Some(ref mut url) = e.base_url {
            *url = resolve_str(url);
        }
    }
}

/// Replace {env:VAR} with the environment variable value.
/// Unset variables resolve to the empty string.
pub(super) fn resolve_str(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("{env:") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 5..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}
