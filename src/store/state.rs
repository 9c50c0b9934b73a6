//! Application state and the events that change it.
//!
//! State is never edited in place: [`AppState::reduce`] takes an event and
//! returns the next state, which the store swaps in whole.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::board::BoardError;
use crate::models::{CardMove, PrioritizationResult, RoadmapBoard};
use crate::prioritization::{FeatureDraft, FeatureForm, Notification, ScoringStatus};

/// The sidebar destinations.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum View {
    #[default]
    Dashboard,
    Roadmap,
    Prioritization,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Roadmap => "roadmap",
            Self::Prioritization => "prioritization",
        }
    }
}

/// Everything the prioritization view holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PrioritizationState {
    pub form: FeatureForm,
    pub status: ScoringStatus,
}

/// The whole in-memory application state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub active_view: View,
    pub prioritization: PrioritizationState,
    pub board: RoadmapBoard,
}

impl AppState {
    pub fn new(board: RoadmapBoard) -> Self {
        Self {
            active_view: View::default(),
            prioritization: PrioritizationState::default(),
            board,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Navigate(View),
    FormReplaced(FeatureForm),
    FeatureAdded,
    FeatureRemoved(usize),
    SubmissionStarted {
        submission_id: Uuid,
        at: DateTime<Utc>,
    },
    SubmissionSucceeded {
        submission_id: Uuid,
        result: PrioritizationResult,
        at: DateTime<Utc>,
    },
    SubmissionFailed {
        submission_id: Uuid,
        message: String,
    },
    NotificationDismissed,
    CardMoved(CardMove),
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Navigate(_) => "navigate",
            Self::FormReplaced(_) => "form_replaced",
            Self::FeatureAdded => "feature_added",
            Self::FeatureRemoved(_) => "feature_removed",
            Self::SubmissionStarted { .. } => "submission_started",
            Self::SubmissionSucceeded { .. } => "submission_succeeded",
            Self::SubmissionFailed { .. } => "submission_failed",
            Self::NotificationDismissed => "notification_dismissed",
            Self::CardMoved(_) => "card_moved",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("a prioritization request is already pending")]
    SubmissionPending,

    #[error("no feature at index {0}")]
    FeatureNotFound(usize),

    #[error(transparent)]
    Board(#[from] BoardError),
}

impl AppState {
    /// Compute the state that follows `event`.
    ///
    /// Any change of view discards the scoring status, wherever the
    /// submission was started. Completion events for a submission that is no
    /// longer pending leave the state unchanged.
    pub fn reduce(&self, event: Event) -> Result<AppState, StateError> {
        let mut next = self.clone();

        match event {
            Event::Navigate(view) => {
                if view != self.active_view {
                    next.prioritization.status = ScoringStatus::Idle;
                }
                next.active_view = view;
            }
            Event::FormReplaced(form) => {
                next.prioritization.form = form;
            }
            Event::FeatureAdded => {
                next.prioritization.form.features.push(FeatureDraft::blank());
            }
            Event::FeatureRemoved(index) => {
                let features = &mut next.prioritization.form.features;
                if index >= features.len() {
                    return Err(StateError::FeatureNotFound(index));
                }
                features.remove(index);
            }
            Event::SubmissionStarted { submission_id, at } => {
                if self.prioritization.status.is_pending() {
                    return Err(StateError::SubmissionPending);
                }
                next.prioritization.status = ScoringStatus::Pending {
                    submission_id,
                    started_at: at,
                };
            }
            Event::SubmissionSucceeded {
                submission_id,
                result,
                at,
            } => {
                if self.is_pending_submission(submission_id) {
                    next.prioritization.status = ScoringStatus::Ready {
                        submission_id,
                        result,
                        completed_at: at,
                    };
                }
            }
            Event::SubmissionFailed {
                submission_id,
                message,
            } => {
                if self.is_pending_submission(submission_id) {
                    next.prioritization.status = ScoringStatus::Failed {
                        submission_id,
                        notification: Notification::error(message),
                    };
                }
            }
            Event::NotificationDismissed => {
                if let ScoringStatus::Failed { .. } = self.prioritization.status {
                    next.prioritization.status = ScoringStatus::Idle;
                }
            }
            Event::CardMoved(card_move) => {
                next.board = self.board.apply_move(&card_move)?;
            }
        }

        Ok(next)
    }

    fn is_pending_submission(&self, submission_id: Uuid) -> bool {
        matches!(
            self.prioritization.status,
            ScoringStatus::Pending { submission_id: id, .. } if id == submission_id
        )
    }
}
