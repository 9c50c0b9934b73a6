//! Editable form state for the prioritization view.
//!
//! Form fields hold whatever the user typed. Turning them into a
//! [`PrioritizationRequest`] is two explicit steps: numeric coercion, then
//! bounds validation.

use serde::{Deserialize, Serialize};

use super::validation::{
    feature_field, no_features_error, validate_key_metrics, ValidationError, ValidationErrors,
};
use crate::models::{FeatureInput, PrioritizationRequest};

/// A numeric form value before coercion.
///
/// Clients may send either a JSON number or the raw text of an input box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Number(f64),
    Text(String),
}

impl RawNumber {
    /// Convert to a finite number. Blank or unparsable text is rejected.
    pub fn coerce(&self) -> Option<f64> {
        let value = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for RawNumber {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for RawNumber {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// One feature row of the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureDraft {
    pub name: String,
    pub description: String,
    pub reach: RawNumber,
    pub impact: RawNumber,
    pub confidence: RawNumber,
    pub effort: RawNumber,
}

impl FeatureDraft {
    /// The row added by "Add Feature".
    pub fn blank() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            reach: 0.0.into(),
            impact: 5.0.into(),
            confidence: 5.0.into(),
            effort: 5.0.into(),
        }
    }

    /// Coerce numeric fields and validate the result as the `index`-th feature.
    pub fn to_input(&self, index: usize) -> Result<FeatureInput, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let mut number = |field: &str, label: &str, raw: &RawNumber| {
            raw.coerce().unwrap_or_else(|| {
                errors.push(ValidationError::new(
                    feature_field(index, field),
                    format!("{} must be a number.", label),
                ));
                f64::NAN
            })
        };

        let input = FeatureInput {
            name: self.name.clone(),
            description: self.description.clone(),
            reach: number("reach", "Reach", &self.reach),
            impact: number("impact", "Impact", &self.impact),
            confidence: number("confidence", "Confidence", &self.confidence),
            effort: number("effort", "Effort", &self.effort),
        };

        if let Err(bounds) = input.validate_at(index) {
            // A field that failed coercion already has its error.
            for error in bounds.0 {
                if errors.for_field(&error.field).is_none() {
                    errors.push(error);
                }
            }
        }

        errors.into_result().map(|_| input)
    }
}

impl From<&FeatureInput> for FeatureDraft {
    fn from(input: &FeatureInput) -> Self {
        Self {
            name: input.name.clone(),
            description: input.description.clone(),
            reach: input.reach.into(),
            impact: input.impact.into(),
            confidence: input.confidence.into(),
            effort: input.effort.into(),
        }
    }
}

/// The whole prioritization form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureForm {
    pub key_metrics: String,
    pub features: Vec<FeatureDraft>,
}

impl Default for FeatureForm {
    fn default() -> Self {
        let seeded = [
            FeatureInput {
                name: "Integrate Regional Payment Methods".to_string(),
                description: "Add GrabPay and GoPay to checkout for SEA market.".to_string(),
                reach: 50_000.0,
                impact: 9.0,
                confidence: 8.0,
                effort: 5.0,
            },
            FeatureInput {
                name: "Revamp Search Algorithm".to_string(),
                description: "Improve product search relevance using machine learning."
                    .to_string(),
                reach: 250_000.0,
                impact: 7.0,
                confidence: 6.0,
                effort: 9.0,
            },
        ];

        Self {
            key_metrics: "Increase user conversion rates and monthly recurring revenue (MRR)."
                .to_string(),
            features: seeded.iter().map(FeatureDraft::from).collect(),
        }
    }
}

impl FeatureForm {
    /// Coerce and validate the form into a request, reporting every failure.
    pub fn to_request(&self) -> Result<PrioritizationRequest, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let mut features = Vec::with_capacity(self.features.len());

        if let Some(error) = validate_key_metrics(&self.key_metrics) {
            errors.push(error);
        }
        if self.features.is_empty() {
            errors.push(no_features_error());
        }
        for (index, draft) in self.features.iter().enumerate() {
            match draft.to_input(index) {
                Ok(input) => features.push(input),
                Err(e) => errors.extend(e),
            }
        }

        errors.into_result()?;
        Ok(PrioritizationRequest {
            key_metrics: self.key_metrics.clone(),
            features,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerces_numbers_and_numeric_text() {
        assert_eq!(RawNumber::Number(4.0).coerce(), Some(4.0));
        assert_eq!(RawNumber::from(" 7.5 ").coerce(), Some(7.5));
        assert_eq!(RawNumber::from("250000").coerce(), Some(250_000.0));
    }

    #[test]
    fn coercion_rejects_blank_garbage_and_infinity() {
        assert_eq!(RawNumber::from("").coerce(), None);
        assert_eq!(RawNumber::from("   ").coerce(), None);
        assert_eq!(RawNumber::from("ten").coerce(), None);
        assert_eq!(RawNumber::from("inf").coerce(), None);
    }

    #[test]
    fn raw_numbers_deserialize_from_either_json_type() {
        let n: RawNumber = serde_json::from_str("8").unwrap();
        let s: RawNumber = serde_json::from_str("\"8\"").unwrap();
        assert_eq!(n.coerce(), s.coerce());
    }

    #[test]
    fn default_form_is_valid() {
        let request = FeatureForm::default().to_request().unwrap();
        assert_eq!(request.features.len(), 2);
        assert_eq!(request.features[1].reach, 250_000.0);
    }

    #[test]
    fn blank_row_needs_name_and_description_only() {
        let errors = FeatureDraft::blank().to_input(3).unwrap_err();
        let fields: Vec<_> = errors.0.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["features.3.name", "features.3.description"]);
    }

    #[test]
    fn coercion_error_is_not_duplicated_by_bounds_check() {
        let mut draft = FeatureDraft::from(&FeatureForm::default().to_request().unwrap().features[0]);
        draft.impact = RawNumber::from("high");
        let errors = draft.to_input(0).unwrap_err();
        assert_eq!(errors.0.len(), 1);
        assert_eq!(errors.0[0].message, "Impact must be a number.");
    }

    #[test]
    fn text_values_pass_bounds_after_coercion() {
        let mut form = FeatureForm::default();
        form.features[0].effort = RawNumber::from("3");
        let request = form.to_request().unwrap();
        assert_eq!(request.features[0].effort, 3.0);
    }

    #[test]
    fn empty_form_reports_metrics_and_features() {
        let form = FeatureForm {
            key_metrics: String::new(),
            features: vec![],
        };
        let errors = form.to_request().unwrap_err();
        assert!(errors.for_field("keyMetrics").is_some());
        assert!(errors.for_field("features").is_some());
    }
}
