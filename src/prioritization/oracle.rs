//! The scoring oracle adapter.
//!
//! This is the only place that talks to the language model. Every way the
//! call can go wrong (transport, timeout, malformed output) comes back as an
//! [`OracleError`].

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use super::prompt::{self, OUTPUT_SCHEMA_NAME, SYSTEM_PROMPT};
use super::validation::ValidationErrors;
use crate::llm::{CompletionRequest, LlmBackend, LlmError};
use crate::models::{PrioritizationRequest, PrioritizationResult};

/// Message shown to users for any oracle failure.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "The AI model failed to return a valid response. Please try again.";

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("scoring backend failed: {0}")]
    Backend(#[from] LlmError),

    #[error("scoring call timed out after {0:?}")]
    Timeout(Duration),

    #[error("scoring response is malformed: {0}")]
    Malformed(String),
}

/// Failure of the full validate-then-score pipeline.
#[derive(Debug, Error)]
pub enum PrioritizationError {
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

/// JSON Schema of [`PrioritizationResult`], sent as the structured output format.
pub fn result_schema() -> Result<serde_json::Value, OracleError> {
    serde_json::to_value(schemars::schema_for!(PrioritizationResult))
        .map_err(|e| OracleError::Malformed(format!("output schema: {}", e)))
}

/// Parse completion text into a result, enforcing its exact shape.
///
/// A single surrounding Markdown code fence is removed first; anything else
/// that is not a `PrioritizationResult` object is rejected.
pub fn parse_result(raw: &str) -> Result<PrioritizationResult, OracleError> {
    let body = strip_code_fence(raw.trim());
    if body.is_empty() {
        return Err(OracleError::Malformed("empty response".to_string()));
    }
    serde_json::from_str(body).map_err(|e| OracleError::Malformed(e.to_string()))
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let Some(inner) = rest.strip_suffix("```") else {
        return text;
    };
    // Drop an info string such as `json` on the opening line.
    match inner.split_once('\n') {
        Some((info, body)) if !info.trim_start().starts_with('{') => body.trim(),
        _ => inner.trim(),
    }
}

/// Scores prioritization requests with a language model.
#[derive(Clone)]
pub struct ScoringOracle {
    backend: Arc<dyn LlmBackend>,
    timeout: Duration,
}

impl ScoringOracle {
    pub fn new(backend: Arc<dyn LlmBackend>, timeout: Duration) -> Self {
        Self { backend, timeout }
    }

    /// Validate `request`, then score it.
    pub async fn prioritize(
        &self,
        request: &PrioritizationRequest,
    ) -> Result<PrioritizationResult, PrioritizationError> {
        request.validate()?;
        Ok(self.score(request).await?)
    }

    /// Make exactly one scoring call for an already validated request.
    ///
    /// The result keeps the oracle's row order. A result that is not in
    /// descending score order is logged but returned unchanged.
    pub async fn score(
        &self,
        request: &PrioritizationRequest,
    ) -> Result<PrioritizationResult, OracleError> {
        let completion = CompletionRequest::new(prompt::render(request))
            .with_system_prompt(SYSTEM_PROMPT)
            .with_response_schema(OUTPUT_SCHEMA_NAME, result_schema()?);

        tracing::info!(
            backend = self.backend.name(),
            features = request.features.len(),
            "Requesting feature scores"
        );

        let raw = tokio::time::timeout(self.timeout, self.backend.complete(completion))
            .await
            .map_err(|_| OracleError::Timeout(self.timeout))??;

        let result = parse_result(&raw)?;

        if !result.is_ranked() {
            tracing::warn!("Oracle returned features out of descending score order");
        }
        let unmatched = result.unmatched_names(request);
        if !unmatched.is_empty() {
            tracing::warn!(?unmatched, "Oracle returned features that were not requested");
        }

        tracing::info!(
            scored = result.prioritized_features.len(),
            "Received feature scores"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_exact_shape() {
        let result = parse_result(
            r#"{"prioritizedFeatures":[{"name":"A","priorityScore":80,"rationale":"ok"}]}"#,
        )
        .unwrap();
        assert_eq!(result.prioritized_features[0].priority_score, 80.0);
    }

    #[test]
    fn strips_fenced_json() {
        let raw = "```json\n{\"prioritizedFeatures\":[]}\n```";
        assert!(parse_result(raw).unwrap().prioritized_features.is_empty());

        let bare = "```{\"prioritizedFeatures\":[]}```";
        assert!(parse_result(bare).is_ok());
    }

    #[test]
    fn rejects_missing_list() {
        assert!(matches!(
            parse_result(r#"{"features":[]}"#),
            Err(OracleError::Malformed(_))
        ));
    }

    #[test]
    fn rejects_wrong_types_and_extra_fields() {
        assert!(parse_result(
            r#"{"prioritizedFeatures":[{"name":"A","priorityScore":"high","rationale":""}]}"#
        )
        .is_err());
        assert!(parse_result(
            r#"{"prioritizedFeatures":[{"name":"A","priorityScore":1,"rationale":"","rank":1}]}"#
        )
        .is_err());
    }

    #[test]
    fn rejects_empty_and_prose_responses() {
        assert!(parse_result("   ").is_err());
        assert!(parse_result("Here are your features!").is_err());
        assert!(parse_result("null").is_err());
    }

    #[test]
    fn schema_names_wire_fields() {
        let schema = result_schema().unwrap();
        assert!(schema.is_object());
        let schema = schema.to_string();
        assert!(schema.contains("prioritizedFeatures"));
        assert!(schema.contains("priorityScore"));
    }
}
