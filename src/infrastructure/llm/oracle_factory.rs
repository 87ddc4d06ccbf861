use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::application::services::OracleRegistry;
use crate::domain::LlmProvider;
use crate::presentation::config::LlmSettings;

use super::{AnthropicOracle, OllamaOracle, OpenAiOracle};

pub struct OracleFactory;

#[derive(Debug, thiserror::Error)]
pub enum OracleFactoryError {
    #[error("http client initialization failed: {0}")]
    ClientInitialization(String),
}

impl OracleFactory {
    /// Builds one oracle per configured provider. Providers without the
    /// settings they need are skipped with a warning rather than failing, so
    /// an operator can run with any subset configured.
    pub fn create_registry(settings: &LlmSettings) -> Result<OracleRegistry, OracleFactoryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .map_err(|e| OracleFactoryError::ClientInitialization(e.to_string()))?;

        let mut registry = OracleRegistry::new(settings.default_provider);

        if let Some(openai) = &settings.openai {
            let has_key = openai.api_key.as_deref().is_some_and(|k| !k.is_empty());
            let has_url = openai.base_url.as_deref().is_some_and(|u| !u.is_empty());
            if has_key || has_url {
                let oracle = OpenAiOracle::new(
                    client.clone(),
                    openai.base_url.clone(),
                    openai.api_key.clone(),
                    openai.model.clone(),
                    openai.temperature,
                );
                tracing::info!(model = %openai.model, base_url = %oracle.base_url(), "OpenAI oracle initialized");
                registry.register(LlmProvider::OpenAi, Arc::new(oracle));
            } else {
                tracing::warn!("OpenAI settings present without api_key or base_url; provider disabled");
            }
        }

        if let Some(anthropic) = &settings.anthropic {
            if anthropic.api_key.is_empty() {
                tracing::warn!("Anthropic settings present without api_key; provider disabled");
            } else {
                tracing::info!(model = %anthropic.model, "Anthropic oracle initialized");
                registry.register(
                    LlmProvider::Anthropic,
                    Arc::new(AnthropicOracle::new(
                        client.clone(),
                        anthropic.api_key.clone(),
                        anthropic.model.clone(),
                        anthropic.temperature,
                    )),
                );
            }
        }

        if let Some(ollama) = &settings.ollama {
            match ollama.base_url.as_deref().filter(|u| !u.is_empty()) {
                Some(base_url) => {
                    tracing::info!(model = %ollama.model, base_url, "Ollama oracle initialized");
                    registry.register(
                        LlmProvider::Ollama,
                        Arc::new(OllamaOracle::new(
                            client.clone(),
                            base_url.to_string(),
                            ollama.model.clone(),
                            ollama.temperature,
                        )),
                    );
                }
                None => tracing::debug!("Ollama base_url not set; provider disabled"),
            }
        }

        let available = registry.available_providers();
        if available.is_empty() {
            tracing::warn!("No LLM providers configured");
        } else {
            tracing::info!(
                available = ?available,
                default_provider = %registry.default_provider(),
                "LLM providers ready"
            );
        }

        Ok(registry)
    }
}
