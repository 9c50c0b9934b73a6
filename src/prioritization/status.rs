use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::PrioritizationResult;

/// Where the latest scoring submission stands.
///
/// - `Idle`: nothing submitted, or the last result was discarded
/// - `Pending`: one scoring call is in flight
/// - `Ready`: the oracle answered; `result` is shown as-is
/// - `Failed`: the call failed; the form is left intact for a retry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ScoringStatus {
    #[default]
    Idle,
    #[serde(rename_all = "camelCase")]
    Pending {
        submission_id: Uuid,
        started_at: DateTime<Utc>,
    },
    #[serde(rename_all = "camelCase")]
    Ready {
        submission_id: Uuid,
        result: PrioritizationResult,
        completed_at: DateTime<Utc>,
    },
    #[serde(rename_all = "camelCase")]
    Failed {
        submission_id: Uuid,
        notification: Notification,
    },
}

impl ScoringStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending { .. } => "pending",
            Self::Ready { .. } => "ready",
            Self::Failed { .. } => "failed",
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }

    /// The submission this status belongs to, if any.
    pub fn submission_id(&self) -> Option<Uuid> {
        match self {
            Self::Idle => None,
            Self::Pending { submission_id, .. }
            | Self::Ready { submission_id, .. }
            | Self::Failed { submission_id, .. } => Some(*submission_id),
        }
    }

    pub fn result(&self) -> Option<&PrioritizationResult> {
        match self {
            Self::Ready { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn notification(&self) -> Option<&Notification> {
        match self {
            Self::Failed { notification, .. } => Some(notification),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationVariant {
    Default,
    Destructive,
}

/// A dismissible toast shown next to, not instead of, the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub variant: NotificationVariant,
}

impl Notification {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            title: "An error occurred".to_string(),
            message: message.into(),
            variant: NotificationVariant::Destructive,
        }
    }
}
