//! OpenAI-compatible chat completions backend.
//!
//! Works against api.openai.com and the many servers that mirror its
//! `/chat/completions` endpoint. When the request carries a response schema it
//! is sent as a `json_schema` response format.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use super::{CompletionRequest, LlmBackend, LlmError};
use crate::config::OracleConfig;

/// HTTP backend for OpenAI-compatible providers.
#[derive(Debug, Clone)]
pub struct OpenAiBackend {
    base_url: String,
    model: String,
    api_key: Option<String>,
    client: Client,
}

impl OpenAiBackend {
    pub fn new(config: &OracleConfig) -> Result<Self, LlmError> {
        let base_url = config.base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(LlmError::Misconfigured("base URL is empty".to_string()));
        }
        if config.model.trim().is_empty() {
            return Err(LlmError::Misconfigured("model name is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            base_url: base_url.to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            client,
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn to_wire(&self, request: &CompletionRequest) -> ChatRequest {
        let mut messages = Vec::new();
        if let Some(ref system) = request.system_prompt {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: Some(system.clone()),
            });
        }
        messages.push(ChatMessage {
            role: "user".to_string(),
            content: Some(request.prompt.clone()),
        });

        ChatRequest {
            model: self.model.clone(),
            messages,
            response_format: request.response_schema.as_ref().map(|s| ResponseFormat {
                kind: "json_schema".to_string(),
                json_schema: JsonSchemaFormat {
                    name: s.name.clone(),
                    schema: s.schema.clone(),
                },
            }),
        }
    }
}

#[async_trait]
impl LlmBackend for OpenAiBackend {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        let mut req = self
            .client
            .post(self.completions_url())
            .json(&self.to_wire(&request));
        if let Some(ref key) = self.api_key {
            req = req.bearer_auth(key);
        }

        tracing::debug!(model = %self.model, "Sending chat completion request");
        let response = req.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::Unauthorized,
                StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimited,
                _ => LlmError::Status {
                    status: status.as_u16(),
                    body,
                },
            });
        }

        let chat: ChatResponse = response.json().await?;
        chat.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(LlmError::EmptyCompletion)
    }

    fn name(&self) -> &str {
        "openai"
    }
}

// ----- Wire types -----

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: String,
    json_schema: JsonSchemaFormat,
}

#[derive(Debug, Serialize)]
struct JsonSchemaFormat {
    name: String,
    schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}
