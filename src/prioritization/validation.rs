//! Field-scoped validation for prioritization input.
//!
//! Every check here is a pure function of its input. Errors are collected so a
//! form can show all of them at once.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{FeatureInput, PrioritizationRequest};

pub const MIN_KEY_METRICS_CHARS: usize = 10;
pub const SCALE_MIN: f64 = 1.0;
pub const SCALE_MAX: f64 = 10.0;
pub const REACH_MIN: f64 = 0.0;

/// A single failed constraint, scoped to a form field path such as
/// `features.0.impact`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// All constraints a request or feature failed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Error, Serialize, Deserialize)]
#[error("{} validation error(s): {}", .0.len(), summary(.0))]
pub struct ValidationErrors(pub Vec<ValidationError>);

fn summary(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    pub fn extend(&mut self, other: ValidationErrors) {
        self.0.extend(other.0);
    }

    /// The error for an exact field path, if any.
    pub fn for_field(&self, field: &str) -> Option<&ValidationError> {
        self.0.iter().find(|e| e.field == field)
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// Field path of a feature attribute inside a request.
pub fn feature_field(index: usize, field: &str) -> String {
    format!("features.{}.{}", index, field)
}

fn check_scale(errors: &mut ValidationErrors, path: String, label: &str, value: f64) {
    if !value.is_finite() || !(SCALE_MIN..=SCALE_MAX).contains(&value) {
        errors.push(ValidationError::new(
            path,
            format!("{} must be between 1 and 10.", label),
        ));
    }
}

impl FeatureInput {
    /// Check this feature as the `index`-th entry of a request.
    pub fn validate_at(&self, index: usize) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if self.name.is_empty() {
            errors.push(ValidationError::new(
                feature_field(index, "name"),
                "Feature name is required.",
            ));
        }
        if self.description.is_empty() {
            errors.push(ValidationError::new(
                feature_field(index, "description"),
                "Description is required.",
            ));
        }
        if !self.reach.is_finite() || self.reach < REACH_MIN {
            errors.push(ValidationError::new(
                feature_field(index, "reach"),
                "Reach must be a positive number.",
            ));
        }
        check_scale(&mut errors, feature_field(index, "impact"), "Impact", self.impact);
        check_scale(
            &mut errors,
            feature_field(index, "confidence"),
            "Confidence",
            self.confidence,
        );
        check_scale(&mut errors, feature_field(index, "effort"), "Effort", self.effort);

        errors.into_result()
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        self.validate_at(0)
    }
}

/// Check the key metrics text on its own.
pub fn validate_key_metrics(key_metrics: &str) -> Option<ValidationError> {
    (key_metrics.chars().count() < MIN_KEY_METRICS_CHARS).then(|| {
        ValidationError::new(
            "keyMetrics",
            "Please describe your key metrics in more detail.",
        )
    })
}

/// Error reported when a request carries no features.
pub fn no_features_error() -> ValidationError {
    ValidationError::new("features", "Please add at least one feature.")
}

impl PrioritizationRequest {
    /// Build a request from borrowed input, validating everything first.
    ///
    /// The features are copied; `features` is never modified.
    pub fn build(
        key_metrics: &str,
        features: &[FeatureInput],
    ) -> Result<PrioritizationRequest, ValidationErrors> {
        let request = PrioritizationRequest {
            key_metrics: key_metrics.to_string(),
            features: features.to_vec(),
        };
        request.validate()?;
        Ok(request)
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if let Some(error) = validate_key_metrics(&self.key_metrics) {
            errors.push(error);
        }
        if self.features.is_empty() {
            errors.push(no_features_error());
        }
        for (index, feature) in self.features.iter().enumerate() {
            if let Err(feature_errors) = feature.validate_at(index) {
                errors.extend(feature_errors);
            }
        }

        errors.into_result()
    }
}
