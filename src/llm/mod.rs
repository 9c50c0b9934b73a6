//! Language model backends.
//!
//! The scoring oracle talks to a model through [`LlmBackend`], which turns a
//! prompt into raw completion text. Parsing that text is the caller's job.
//!
//! - [`OpenAiBackend`]: any OpenAI-compatible chat completions endpoint.
//! - [`ScriptedBackend`]: canned replies for tests and offline demos.

mod openai;
mod scripted;

pub use openai::*;
pub use scripted::*;

use async_trait::async_trait;
use thiserror::Error;

/// A backend that produces a single completion for a prompt.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError>;

    /// Short provider name used in logs.
    fn name(&self) -> &str;
}

/// A JSON Schema the completion is asked to conform to.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseSchema {
    pub name: String,
    pub schema: serde_json::Value,
}

/// Request for one completion.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system_prompt: Option<String>,
    pub prompt: String,
    pub response_schema: Option<ResponseSchema>,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: None,
            prompt: prompt.into(),
            response_schema: None,
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_response_schema(
        mut self,
        name: impl Into<String>,
        schema: serde_json::Value,
    ) -> Self {
        self.response_schema = Some(ResponseSchema {
            name: name.into(),
            schema,
        });
        self
    }
}

/// Backend failures.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unauthorized: API key missing or rejected")]
    Unauthorized,

    #[error("Rate limited by provider")]
    RateLimited,

    #[error("Provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Provider returned no completion text")]
    EmptyCompletion,

    #[error("Backend misconfigured: {0}")]
    Misconfigured(String),

    #[error("{0}")]
    Other(String),
}
