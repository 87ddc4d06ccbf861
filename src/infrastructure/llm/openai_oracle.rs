use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{AnonymizationOracle, OracleError, OracleResponse};

use super::oracle_prompt::{SYSTEM_PROMPT, ensure_success, parse_oracle_reply, transport_error, user_message};

pub const OPENAI_DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Oracle backed by the OpenAI chat completions API or any server that
/// speaks it (LocalAI, LM Studio, vLLM).
pub struct OpenAiOracle {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

impl OpenAiOracle {
    pub fn new(
        client: Client,
        base_url: Option<String>,
        api_key: Option<String>,
        model: String,
        temperature: f32,
    ) -> Self {
        let base_url = base_url
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| OPENAI_DEFAULT_BASE_URL.to_string());
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.is_empty()),
            model,
            temperature,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl AnonymizationOracle for OpenAiOracle {
    #[tracing::instrument(skip(self, chunk), fields(model = %self.model, chunk_len = chunk.len()))]
    async fn anonymize(&self, chunk: &str) -> Result<OracleResponse, OracleError> {
        let request_body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user_message(chunk),
                },
            ],
            temperature: self.temperature,
        };

        let mut request = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&request_body);
        // Local OpenAI-compatible servers usually run without a key.
        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {}", key));
        }

        let response = request.send().await.map_err(|e| {
            transport_error(
                "openai",
                &self.base_url,
                "Check your network connection and API key configuration.",
                e,
            )
        })?;
        let response = ensure_success(response).await?;

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| OracleError::InvalidResponse(e.to_string()))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| OracleError::InvalidResponse("empty choices".to_string()))?;

        parse_oracle_reply(&content)
    }
}
