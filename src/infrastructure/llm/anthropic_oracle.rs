use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{AnonymizationOracle, OracleError, OracleResponse};

use super::oracle_prompt::{SYSTEM_PROMPT, ensure_success, parse_oracle_reply, transport_error, user_message};

pub const ANTHROPIC_DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 4096;

pub struct AnthropicOracle {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl AnthropicOracle {
    pub fn new(client: Client, api_key: String, model: String, temperature: f32) -> Self {
        Self::with_base_url(client, ANTHROPIC_DEFAULT_BASE_URL.to_string(), api_key, model, temperature)
    }

    pub fn with_base_url(
        client: Client,
        base_url: String,
        api_key: String,
        model: String,
        temperature: f32,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
            temperature,
        }
    }
}

#[async_trait]
impl AnonymizationOracle for AnthropicOracle {
    #[tracing::instrument(skip(self, chunk), fields(model = %self.model, chunk_len = chunk.len()))]
    async fn anonymize(&self, chunk: &str) -> Result<OracleResponse, OracleError> {
        let request_body = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            temperature: self.temperature,
            system: SYSTEM_PROMPT,
            messages: vec![Message {
                role: "user",
                content: user_message(chunk),
            }],
        };

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                transport_error(
                    "anthropic",
                    &self.base_url,
                    "Check your network connection and API key configuration.",
                    e,
                )
            })?;
        let response = ensure_success(response).await?;

        let body: MessagesResponse = response
            .json()
            .await
            .map_err(|e| OracleError::InvalidResponse(e.to_string()))?;

        let content: String = body
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text)
            .collect();

        if content.is_empty() {
            return Err(OracleError::InvalidResponse(
                "no text content in response".to_string(),
            ));
        }

        parse_oracle_reply(&content)
    }
}
