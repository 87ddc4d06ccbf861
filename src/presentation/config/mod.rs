mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    AnthropicSettings, ChunkingSettings, LlmSettings, LoggingSettings, OllamaSettings,
    OpenAiSettings, PipelineSettings, Settings,
};
