use std::path::Path;

use config::{Config, ConfigBuilder, ConfigError, File, builder::DefaultState};
use serde::Deserialize;

use crate::application::services::SubmissionMode;
use crate::domain::LlmProvider;

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub chunking: ChunkingSettings,
    pub llm: LlmSettings,
    pub logging: LoggingSettings,
    pub pipeline: PipelineSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChunkingSettings {
    /// Target window length in characters.
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    pub default_provider: LlmProvider,
    pub request_timeout_secs: u64,
    pub openai: Option<OpenAiSettings>,
    pub anthropic: Option<AnthropicSettings>,
    pub ollama: Option<OllamaSettings>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiSettings {
    pub api_key: Option<String>,
    /// Any OpenAI-compatible endpoint, e.g. a local LM Studio server.
    pub base_url: Option<String>,
    #[serde(default = "default_openai_model")]
    pub model: String,
    #[serde(default)]
    pub temperature: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnthropicSettings {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_anthropic_model")]
    pub model: String,
    #[serde(default)]
    pub temperature: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OllamaSettings {
    /// Unset leaves the provider disabled.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_ollama_model")]
    pub model: String,
    #[serde(default)]
    pub temperature: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineSettings {
    pub submission_mode: SubmissionMode,
}

fn default_openai_model() -> String {
    "gpt-4".to_string()
}

fn default_anthropic_model() -> String {
    "claude-3-sonnet-20240229".to_string()
}

fn default_ollama_model() -> String {
    "mistral".to_string()
}

impl Settings {
    /// Loads settings from the working directory.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Self::load_from(environment, Path::new("."))
    }

    /// Layers built-in defaults, then `appsettings.{environment}` from `dir`
    /// when present, then `APP__`-prefixed environment variables
    /// (`APP__LLM__OPENAI__API_KEY` sets `llm.openai.api_key`).
    pub fn load_from(environment: Environment, dir: &Path) -> Result<Self, ConfigError> {
        let file = dir.join(environment.settings_file());

        Self::defaults()?
            .add_source(File::from(file).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("chunking.chunk_size", 1500)?
            .set_default("chunking.chunk_overlap", 200)?
            .set_default("llm.default_provider", "openai")?
            .set_default("llm.request_timeout_secs", 120)?
            .set_default("llm.openai.model", default_openai_model())?
            .set_default("llm.openai.temperature", 0.0)?
            .set_default("llm.ollama.model", default_ollama_model())?
            .set_default("llm.ollama.temperature", 0.0)?
            .set_default("logging.level", "info")?
            .set_default("logging.enable_json", false)?
            .set_default("pipeline.submission_mode", "sequential")
    }
}
