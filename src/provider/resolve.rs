//! Model resolution logic for querent.
//!
//! Resolves which provider and model to use based on CLI flags, config file,
//! and hardcoded defaults. Supports `provider/model` shorthand syntax.

use anyhow::Result;

use super::kind::{default_model_for, ProviderKind};
use crate::config::Config;

use crate::constants::DEFAULT_PROVIDER;

/// Resolved provider + model pair.
#[derive(Debug)]
pub struct ModelSelection {
    pub provider: ProviderKind,
    pub model: String,
}

/// Resolve which provider and model to use.
/// Priority: CLI flags > config.toml > defaults.
///
/// Accepts these formats:
///   --model gemini/gemini-2.5-flash  (provider/model shorthand, only when --provider is omitted)
///   --provider openrouter --model "org/model-name"  (slash preserved as model name)
///   --provider deepseek --model deepseek-chat
///   --provider anthropic  (uses `[provider.anthropic] model`, then the provider's default)
///   (nothing)  (uses config.toml, then hardcoded default)
pub fn resolve_model(
    cli_provider: Option<&str>,
    cli_model: Option<&str>,
    config: &Config,
) -> Result<ModelSelection> {
    if cli_provider.is_none() {
        if let Some(model_str) = cli_model {
            if let Some((prov, model)) = model_str.split_once('/') {
                return Ok(ModelSelection {
                    provider: ProviderKind::from_str(prov)?,
                    model: model.to_string(),
                });
            }
        }
    }

    let provider_str = cli_provider
        .or(config.provider_name())
        .unwrap_or(DEFAULT_PROVIDER);
    let provider = ProviderKind::from_str(provider_str)?;

    let model = cli_model
        .map(String::from)
        .or_else(|| {
            config
                .provider_entry(provider.name())
                .and_then(|e| e.model.clone())
        })
        .or_else(|| config.model_name())
        .unwrap_or_else(|| default_model_for(&provider).to_string());

    Ok(ModelSelection { provider, model })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorthand_without_provider_flag() {
        let sel = resolve_model(None, Some("gemini/gemini-2.5-pro"), &Config::default()).unwrap();
        assert_eq!(sel.provider, ProviderKind::Gemini);
        assert_eq!(sel.model, "gemini-2.5-pro");
    }

    #[test]
    fn test_slash_kept_with_provider_flag() {
        let sel = resolve_model(
            Some("openrouter"),
            Some("org/model-name"),
            &Config::default(),
        )
        .unwrap();
        assert_eq!(sel.provider, ProviderKind::OpenRouter);
        assert_eq!(sel.model, "org/model-name");
    }

    #[test]
    fn test_provider_default_model() {
        let sel = resolve_model(Some("deepseek"), None, &Config::default()).unwrap();
        assert_eq!(sel.model, crate::constants::DEFAULT_DEEPSEEK_MODEL);
    }

    #[test]
    fn test_provider_entry_model() {
        let config: Config = toml::from_str(
            r#"
[provider.anthropic]
model = "claude-opus-4-1"
"#,
        )
        .unwrap();
        let sel = resolve_model(Some("anthropic"), None, &config).unwrap();
        assert_eq!(sel.model, "claude-opus-4-1");
    }

    #[test]
    fn test_unknown_provider() {
        assert!(resolve_model(Some("mystery"), None, &Config::default()).is_err());
    }
}
