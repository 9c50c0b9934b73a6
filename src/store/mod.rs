//! In-memory application store.
//!
//! The store owns the single [`AppState`] and is the only writer to it. Every
//! change goes through [`Store::dispatch`], which reduces an [`Event`] into a
//! new state and swaps it in under one lock. Nothing is persisted; a restart
//! starts from the built-in fixtures.

mod fixtures;
mod state;

pub use fixtures::{initial_roadmap, DashboardTable, ALL_CATEGORIES};
pub use state::*;

use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::Utc;
use thiserror::Error;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::models::*;
use crate::prioritization::{
    FeatureForm, PrioritizationError, ScoringOracle, ValidationErrors, GENERIC_FAILURE_MESSAGE,
};

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),

    #[error(transparent)]
    State(#[from] StateError),
}

/// A scoring submission that has been accepted and is running.
#[derive(Debug)]
pub struct Submission {
    pub id: Uuid,
    handle: JoinHandle<()>,
}

impl Submission {
    /// Wait until the outcome has been written back to the store.
    pub async fn finished(self) {
        if let Err(e) = self.handle.await {
            tracing::error!(submission = %self.id, "Scoring task panicked: {}", e);
        }
    }
}

#[derive(Clone)]
pub struct Store {
    state: Arc<Mutex<AppState>>,
    dashboard: Arc<DashboardTable>,
    oracle: ScoringOracle,
}

impl Store {
    /// Create a store seeded with the built-in roadmap and dashboard data.
    pub fn new(oracle: ScoringOracle) -> Result<Self> {
        let board = initial_roadmap()?;
        let dashboard = DashboardTable::builtin()?;
        Ok(Self {
            state: Arc::new(Mutex::new(AppState::new(board))),
            dashboard: Arc::new(dashboard),
            oracle,
        })
    }

    pub fn snapshot(&self) -> AppState {
        self.state.lock().expect("state lock poisoned").clone()
    }

    /// Apply one event. On error the current state is kept as it was.
    pub fn dispatch(&self, event: Event) -> Result<AppState, StateError> {
        let mut state = self.state.lock().expect("state lock poisoned");
        tracing::debug!(event = event.name(), "Dispatching event");
        let next = state.reduce(event)?;
        *state = next.clone();
        Ok(next)
    }

    // ============================================================
    // Navigation
    // ============================================================

    pub fn active_view(&self) -> View {
        self.snapshot().active_view
    }

    pub fn navigate(&self, view: View) -> Result<View, StateError> {
        self.dispatch(Event::Navigate(view)).map(|s| s.active_view)
    }

    // ============================================================
    // Dashboard
    // ============================================================

    pub fn dashboard(&self, region: Option<&str>, category: Option<&str>) -> Option<DashboardSnapshot> {
        self.dashboard.lookup(region, category)
    }

    pub fn dashboard_filters(&self) -> DashboardFilters {
        self.dashboard.filters()
    }

    // ============================================================
    // Roadmap
    // ============================================================

    pub fn board(&self) -> RoadmapBoard {
        self.snapshot().board
    }

    pub fn move_card(&self, card_move: CardMove) -> Result<RoadmapBoard, StateError> {
        self.dispatch(Event::CardMoved(card_move)).map(|s| s.board)
    }

    // ============================================================
    // Prioritization form
    // ============================================================

    pub fn prioritization(&self) -> PrioritizationState {
        self.snapshot().prioritization
    }

    pub fn replace_form(&self, form: FeatureForm) -> Result<FeatureForm, StateError> {
        self.dispatch(Event::FormReplaced(form))
            .map(|s| s.prioritization.form)
    }

    pub fn add_feature(&self) -> Result<FeatureForm, StateError> {
        self.dispatch(Event::FeatureAdded)
            .map(|s| s.prioritization.form)
    }

    pub fn remove_feature(&self, index: usize) -> Result<FeatureForm, StateError> {
        self.dispatch(Event::FeatureRemoved(index))
            .map(|s| s.prioritization.form)
    }

    pub fn dismiss_notification(&self) -> Result<PrioritizationState, StateError> {
        self.dispatch(Event::NotificationDismissed)
            .map(|s| s.prioritization)
    }

    // ============================================================
    // Scoring
    // ============================================================

    /// Validate the current form and start one scoring call in the background.
    ///
    /// Rejected while another submission is pending. Any previous result is
    /// cleared before the call starts. The outcome is dispatched back as a
    /// `SubmissionSucceeded` or `SubmissionFailed` event.
    pub fn submit(&self) -> Result<Submission, SubmitError> {
        let submission_id = Uuid::new_v4();

        let request = {
            let mut state = self.state.lock().expect("state lock poisoned");
            if state.prioritization.status.is_pending() {
                return Err(StateError::SubmissionPending.into());
            }
            let request = state.prioritization.form.to_request()?;
            *state = state.reduce(Event::SubmissionStarted {
                submission_id,
                at: Utc::now(),
            })?;
            request
        };

        tracing::info!(
            submission = %submission_id,
            features = request.features.len(),
            "Prioritization submitted"
        );

        let store = self.clone();
        let handle = tokio::spawn(async move {
            let event = match store.oracle.score(&request).await {
                Ok(result) => Event::SubmissionSucceeded {
                    submission_id,
                    result,
                    at: Utc::now(),
                },
                Err(e) => {
                    tracing::error!(submission = %submission_id, "AI prioritization error: {}", e);
                    Event::SubmissionFailed {
                        submission_id,
                        message: GENERIC_FAILURE_MESSAGE.to_string(),
                    }
                }
            };
            if let Err(e) = store.dispatch(event) {
                tracing::warn!(submission = %submission_id, "Dropped scoring outcome: {}", e);
            }
        });

        Ok(Submission {
            id: submission_id,
            handle,
        })
    }

    /// Score a request directly, without touching the stored form or status.
    pub async fn prioritize(
        &self,
        request: &PrioritizationRequest,
    ) -> Result<PrioritizationResult, PrioritizationError> {
        self.oracle.prioritize(request).await
    }
}
