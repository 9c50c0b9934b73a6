//! Prompt text for the scoring oracle.

use crate::models::PrioritizationRequest;

pub const SYSTEM_PROMPT: &str = "You are an expert product manager AI.";

const INSTRUCTIONS: &str = "\
Your task is to prioritize a list of features based on the provided data and key business metrics using the RICE framework.

You MUST follow these instructions:
1.  Analyze the provided features and key metrics.
2.  For each feature, calculate a priority score. A good heuristic for the score is (Reach * Impact * Confidence) / Effort.
3.  Provide a concise rationale for the score, explaining how it aligns with the key metrics.
4.  Sort the features in descending order based on the 'priorityScore'.
5.  You MUST return ONLY a valid JSON object that strictly adheres to the 'PrioritizeFeaturesOutput' schema. Do not include any introductory text, markdown formatting, or conversational filler in your response.
";

/// Name of the output schema referenced by the instructions.
pub const OUTPUT_SCHEMA_NAME: &str = "PrioritizeFeaturesOutput";

/// Render the user prompt for one request.
pub fn render(request: &PrioritizationRequest) -> String {
    let mut out = String::from(INSTRUCTIONS);
    out.push_str(&format!("\nKey Metrics: {}\n\n", request.key_metrics));
    out.push_str("Features to analyze:\n");
    for feature in &request.features {
        out.push_str(&format!(
            "- Name: {}\n  - Description: {}\n  - Reach: {}\n  - Impact: {}/10\n  - Confidence: {}/10\n  - Effort: {}/10\n",
            feature.name,
            feature.description,
            feature.reach,
            feature.impact,
            feature.confidence,
            feature.effort
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FeatureInput;

    #[test]
    fn lists_every_feature_with_its_scales() {
        let request = PrioritizationRequest {
            key_metrics: "Grow MRR in SEA".to_string(),
            features: vec![FeatureInput {
                name: "Regional payments".to_string(),
                description: "GrabPay".to_string(),
                reach: 50_000.0,
                impact: 9.0,
                confidence: 7.5,
                effort: 5.0,
            }],
        };

        let prompt = render(&request);
        assert!(prompt.contains("Key Metrics: Grow MRR in SEA"));
        assert!(prompt.contains("- Name: Regional payments\n"));
        assert!(prompt.contains("  - Reach: 50000\n"));
        assert!(prompt.contains("  - Confidence: 7.5/10\n"));
        assert!(prompt.contains("(Reach * Impact * Confidence) / Effort"));
    }
}
