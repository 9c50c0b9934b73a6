use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ApiError;
use crate::models::*;
use crate::prioritization::{present, render_table, FeatureForm, PanelView, ScoringStatus};
use crate::store::{PrioritizationState, Store, View};

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Navigation
// ============================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ViewBody {
    pub view: View,
}

pub async fn get_view(State(store): State<Store>) -> Json<ViewBody> {
    Json(ViewBody {
        view: store.active_view(),
    })
}

pub async fn set_view(
    State(store): State<Store>,
    Json(body): Json<ViewBody>,
) -> Result<Json<ViewBody>, ApiError> {
    let view = store.navigate(body.view)?;
    tracing::debug!("Active view is now {}", view.as_str());
    Ok(Json(ViewBody { view }))
}

// ============================================================
// Dashboard
// ============================================================

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub region: Option<String>,
    pub category: Option<String>,
}

pub async fn get_dashboard(
    State(store): State<Store>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardSnapshot>, ApiError> {
    store
        .dashboard(query.region.as_deref(), query.category.as_deref())
        .map(Json)
        .ok_or_else(|| {
            ApiError::NotFound(format!(
                "No dashboard data for region '{}' and category '{}'",
                query.region.as_deref().unwrap_or("default"),
                query.category.as_deref().unwrap_or("default"),
            ))
        })
}

pub async fn get_dashboard_filters(State(store): State<Store>) -> Json<DashboardFilters> {
    Json(store.dashboard_filters())
}

// ============================================================
// Roadmap
// ============================================================

pub async fn get_roadmap(State(store): State<Store>) -> Json<RoadmapBoard> {
    Json(store.board())
}

pub async fn move_card(
    State(store): State<Store>,
    Json(card_move): Json<CardMove>,
) -> Result<Json<RoadmapBoard>, ApiError> {
    store.move_card(card_move).map(Json).map_err(ApiError::from)
}

// ============================================================
// Prioritization
// ============================================================

/// Stateless scoring: validate, call the oracle and return the result.
pub async fn prioritize(
    State(store): State<Store>,
    Json(request): Json<PrioritizationRequest>,
) -> Result<Json<PrioritizationResult>, ApiError> {
    store.prioritize(&request).await.map(Json).map_err(ApiError::from)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrioritizationView {
    pub form: FeatureForm,
    pub status: ScoringStatus,
    pub panel: PanelView,
}

impl From<PrioritizationState> for PrioritizationView {
    fn from(state: PrioritizationState) -> Self {
        let panel = present(&state.status);
        Self {
            form: state.form,
            status: state.status,
            panel,
        }
    }
}

pub async fn get_prioritization(State(store): State<Store>) -> Json<PrioritizationView> {
    Json(store.prioritization().into())
}

pub async fn replace_form(
    State(store): State<Store>,
    Json(form): Json<FeatureForm>,
) -> Result<Json<FeatureForm>, ApiError> {
    store.replace_form(form).map(Json).map_err(ApiError::from)
}

pub async fn add_feature(
    State(store): State<Store>,
) -> Result<(StatusCode, Json<FeatureForm>), ApiError> {
    store
        .add_feature()
        .map(|form| (StatusCode::CREATED, Json(form)))
        .map_err(ApiError::from)
}

pub async fn remove_feature(
    State(store): State<Store>,
    Path(index): Path<usize>,
) -> Result<Json<FeatureForm>, ApiError> {
    store.remove_feature(index).map(Json).map_err(ApiError::from)
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionAccepted {
    pub submission_id: Uuid,
}

pub async fn submit(
    State(store): State<Store>,
) -> Result<(StatusCode, Json<SubmissionAccepted>), ApiError> {
    let submission = store.submit()?;
    Ok((
        StatusCode::ACCEPTED,
        Json(SubmissionAccepted {
            submission_id: submission.id,
        }),
    ))
}

pub async fn get_result_table(State(store): State<Store>) -> Result<String, ApiError> {
    store
        .prioritization()
        .status
        .result()
        .map(render_table)
        .ok_or_else(|| ApiError::NotFound("No prioritization result".to_string()))
}

pub async fn dismiss_notification(
    State(store): State<Store>,
) -> Result<Json<PrioritizationView>, ApiError> {
    store
        .dismiss_notification()
        .map(|state| Json(state.into()))
        .map_err(ApiError::from)
}
