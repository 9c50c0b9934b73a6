use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A single feature submitted for prioritization.
///
/// `impact`, `confidence` and `effort` are on a 1-10 scale; `reach` is the
/// estimated number of users affected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureInput {
    pub name: String,
    pub description: String,
    pub reach: f64,
    pub impact: f64,
    pub confidence: f64,
    pub effort: f64,
}

/// A batch of features plus the business goals they are scored against.
///
/// Built through [`PrioritizationRequest::build`], which validates every
/// feature before the request exists. Deserialized requests must be checked
/// with [`PrioritizationRequest::validate`] before they reach the oracle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrioritizationRequest {
    pub key_metrics: String,
    pub features: Vec<FeatureInput>,
}

/// One scored feature as returned by the scoring oracle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PrioritizedFeature {
    /// The name of the feature.
    pub name: String,
    /// The calculated priority score for the feature.
    pub priority_score: f64,
    /// The rationale for the assigned priority score.
    pub rationale: String,
}

/// The oracle's answer for one request.
///
/// `prioritized_features` is expected in descending score order, but the
/// order is whatever the oracle returned. Nothing here re-sorts it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PrioritizationResult {
    pub prioritized_features: Vec<PrioritizedFeature>,
}

impl PrioritizationResult {
    /// True when scores never increase from one row to the next.
    pub fn is_ranked(&self) -> bool {
        self.prioritized_features
            .windows(2)
            .all(|pair| pair[0].priority_score >= pair[1].priority_score)
    }

    /// Names in the result that do not match any requested feature.
    pub fn unmatched_names<'a>(&'a self, request: &PrioritizationRequest) -> Vec<&'a str> {
        self.prioritized_features
            .iter()
            .map(|f| f.name.as_str())
            .filter(|name| !request.features.iter().any(|input| input.name == *name))
            .collect()
    }
}
