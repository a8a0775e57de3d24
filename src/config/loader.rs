//! File loading and merging for querent configuration.

use anyhow::{Context, Result};
use std::fs;

use super::types::{
    default_model, AgentConfig, Config, DatabaseConfig, GenerationConfig, ProviderConfig,
    ProviderEntry,
};

impl Config {
    /// Loads the global config from `~/.config/querent/config.toml`.
    ///
    /// If no config file exists, creates one with sensible defaults
    /// (including `{env:VAR}` placeholders for secrets) and returns it.
    pub(super) fn load_global() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            let default_toml = Self::default_toml();
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, &default_toml)
                .with_context(|| format!("Failed to write default config to {:?}", path))?;
            return Self::parse(&default_toml).context("Failed to parse default config");
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        Self::parse(&contents).with_context(|| format!("Failed to parse config at {:?}", path))
    }

    /// Look for querent.toml in current dir, then walk up to git root.
    pub(super) fn load_project() -> Result<Option<Config>> {
        let mut dir = std::env::current_dir()?;
        loop {
            let candidate = dir.join(crate::constants::PROJECT_CONFIG_FILENAME);
            if candidate.exists() {
                let contents = fs::read_to_string(&candidate)?;
                let config = Self::parse(&contents)
                    .with_context(|| format!("Failed to parse project config at {:?}", candidate))?;
                return Ok(Some(config));
            }
            // Stop at git root or filesystem root
            if dir.join(".git").exists() || !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    pub(super) fn parse(contents: &str) -> Result<Config> {
        Ok(toml::from_str(contents)?)
    }

    /// Contents written to a fresh global config file.
    pub(super) fn default_toml() -> String {
        format!(
            r#"model = "{}"

[database]
url = "{{env:DATABASE_URL}}"

[provider]

[provider.openai]
api_key = "{{env:OPENAI_API_KEY}}"

[provider.anthropic]
api_key = "{{env:ANTHROPIC_API_KEY}}"

[provider.gemini]
api_key = "{{env:GEMINI_API_KEY}}"

[provider.deepseek]
api_key = "{{env:DEEPSEEK_API_KEY}}"

[provider.openrouter]
api_key = "{{env:OPENROUTER_API_KEY}}"

[provider.ollama]
base_url = "{}"
"#,
            default_model(),
            crate::constants::OLLAMA_DEFAULT_BASE_URL,
        )
    }

    /// Merge project config over global config.
    /// Project values win when present.
    pub(super) fn merge(global: Config, project: Config) -> Config {
        Config {
            model: if project.model != default_model() {
                project.model
            } else {
                global.model
            },
            provider: ProviderConfig {
                openai: merge_entry(global.provider.openai, project.provider.openai),
                anthropic: merge_entry(global.provider.anthropic, project.provider.anthropic),
                ollama: merge_entry(global.provider.ollama, project.provider.ollama),
                openrouter: merge_entry(global.provider.openrouter, project.provider.openrouter),
                gemini: merge_entry(global.provider.gemini, project.provider.gemini),
                deepseek: merge_entry(global.provider.deepseek, project.provider.deepseek),
            },
            system_prompt: project.system_prompt.or(global.system_prompt),
            default_provider: project.default_provider.or(global.default_provider),
            database: DatabaseConfig {
                url: project.database.url.or(global.database.url),
                timeout_secs: project
                    .database
                    .timeout_secs
                    .or(global.database.timeout_secs),
            },
            generation: GenerationConfig {
                max_tokens: project
                    .generation
                    .max_tokens
                    .or(global.generation.max_tokens),
                temperature: project
                    .generation
                    .temperature
                    .or(global.generation.temperature),
                max_messages: project
                    .generation
                    .max_messages
                    .or(global.generation.max_messages),
            },
            agent: AgentConfig {
                max_iterations: project
                    .agent
                    .max_iterations
                    .or(global.agent.max_iterations),
            },
        }
    }
}

/// Field-wise merge of a provider entry, project values first.
fn merge_entry(
    global: Option<ProviderEntry>,
    project: Option<ProviderEntry>,
) -> Option<ProviderEntry> {
    match (global, project) {
        (Some(g), Some(p)) => Some(ProviderEntry {
            api_key: p.api_key.or(g.api_key),
            base_url: p.base_url.or(g.base_url),
            model: p.model.or(g.model),
        }),
        (g, p) => p.or(g),
    }
}
