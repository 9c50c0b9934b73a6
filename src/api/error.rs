//! Mapping from domain errors to HTTP responses.
//!
//! Validation and board errors are safe to show and go back verbatim. Oracle
//! failures are logged in full server-side; clients only get the generic
//! message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::board::BoardError;
use crate::prioritization::{PrioritizationError, ValidationErrors, GENERIC_FAILURE_MESSAGE};
use crate::store::{StateError, SubmitError};

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    Validation(ValidationErrors),
    Upstream(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg).into_response(),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg).into_response(),
            Self::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "errors": errors.0 })),
            )
                .into_response(),
            Self::Upstream(msg) => (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "title": "An error occurred", "message": msg })),
            )
                .into_response(),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        tracing::warn!("Validation error: {}", errors);
        Self::Validation(errors)
    }
}

impl From<BoardError> for ApiError {
    fn from(e: BoardError) -> Self {
        tracing::warn!("Rejected card move: {}", e);
        Self::BadRequest(e.to_string())
    }
}

impl From<StateError> for ApiError {
    fn from(e: StateError) -> Self {
        match e {
            StateError::SubmissionPending => Self::Conflict(e.to_string()),
            StateError::FeatureNotFound(_) => Self::NotFound(e.to_string()),
            StateError::Board(board) => board.into(),
        }
    }
}

impl From<SubmitError> for ApiError {
    fn from(e: SubmitError) -> Self {
        match e {
            SubmitError::Invalid(errors) => errors.into(),
            SubmitError::State(state) => state.into(),
        }
    }
}

impl From<PrioritizationError> for ApiError {
    fn from(e: PrioritizationError) -> Self {
        match e {
            PrioritizationError::Invalid(errors) => errors.into(),
            PrioritizationError::Oracle(oracle) => {
                tracing::error!("AI prioritization error: {}", oracle);
                Self::Upstream(GENERIC_FAILURE_MESSAGE.to_string())
            }
        }
    }
}
