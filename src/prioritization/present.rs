//! What the prioritization panel shows for a given scoring status.
//!
//! Rows always come out in the order the oracle returned them.

use serde::{Deserialize, Serialize};

use super::status::{Notification, ScoringStatus};
use crate::models::{PrioritizationResult, PrioritizedFeature};

/// The result panel's content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Presentation {
    /// Nothing to show yet; invite the user to submit.
    Placeholder { title: String, message: String },
    /// A scoring call is in flight.
    Loading { rows: usize },
    /// Scored features, in the order received.
    Table { rows: Vec<PrioritizedFeature> },
}

/// Presentation plus any notification to overlay on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelView {
    pub presentation: Presentation,
    pub notification: Option<Notification>,
    /// Whether the submit button accepts a click.
    pub can_submit: bool,
}

const LOADING_ROWS: usize = 4;

pub fn present(status: &ScoringStatus) -> PanelView {
    let presentation = match status {
        ScoringStatus::Pending { .. } => Presentation::Loading { rows: LOADING_ROWS },
        ScoringStatus::Ready { result, .. } => Presentation::Table {
            rows: result.prioritized_features.clone(),
        },
        ScoringStatus::Idle | ScoringStatus::Failed { .. } => Presentation::Placeholder {
            title: "Ready for Insights".to_string(),
            message: "Fill in your features and metrics, then click \"Prioritize with AI\" \
                      to see the results here."
                .to_string(),
        },
    };

    PanelView {
        presentation,
        notification: status.notification().cloned(),
        can_submit: !status.is_pending(),
    }
}

const NAME_HEADER: &str = "Feature";
const SCORE_HEADER: &str = "Score";
const RATIONALE_HEADER: &str = "Rationale";

fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{:.0}", score)
    } else {
        format!("{:.2}", score)
    }
}

/// Render a result as a plain-text table.
///
/// Example output:
/// ```text
/// Feature | Score | Rationale
/// --------+-------+--------------------
/// B       |    95 | Strong MRR impact
/// A       |    80 | Broad reach
/// ```
pub fn render_table(result: &PrioritizationResult) -> String {
    let rows: Vec<(&str, String, &str)> = result
        .prioritized_features
        .iter()
        .map(|f| (f.name.as_str(), format_score(f.priority_score), f.rationale.as_str()))
        .collect();

    let name_width = rows
        .iter()
        .map(|(name, _, _)| name.chars().count())
        .chain(std::iter::once(NAME_HEADER.len()))
        .max()
        .unwrap_or(0);
    let score_width = rows
        .iter()
        .map(|(_, score, _)| score.len())
        .chain(std::iter::once(SCORE_HEADER.len()))
        .max()
        .unwrap_or(0);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<nw$} | {:>sw$} | {}\n",
        NAME_HEADER,
        SCORE_HEADER,
        RATIONALE_HEADER,
        nw = name_width,
        sw = score_width
    ));
    output.push_str(&format!(
        "{}-+-{}-+-{}\n",
        "-".repeat(name_width),
        "-".repeat(score_width),
        "-".repeat(RATIONALE_HEADER.len())
    ));

    for (name, score, rationale) in rows {
        output.push_str(&format!(
            "{:<nw$} | {:>sw$} | {}\n",
            name,
            score,
            rationale,
            nw = name_width,
            sw = score_width
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn scored(name: &str, score: f64, rationale: &str) -> PrioritizedFeature {
        PrioritizedFeature {
            name: name.to_string(),
            priority_score: score,
            rationale: rationale.to_string(),
        }
    }

    #[test]
    fn test_table_keeps_received_order() {
        let result = PrioritizationResult {
            prioritized_features: vec![scored("A", 80.0, "broad"), scored("B", 95.0, "deep")],
        };
        let output = render_table(&result);
        assert_eq!(
            output,
            "Feature | Score | Rationale\n--------+-------+----------\nA       |    80 | broad\nB       |    95 | deep\n"
        );
    }

    #[test]
    fn test_empty_table_has_header_only() {
        let result = PrioritizationResult {
            prioritized_features: vec![],
        };
        assert_eq!(render_table(&result).lines().count(), 2);
    }

    #[test]
    fn test_fractional_scores() {
        let result = PrioritizationResult {
            prioritized_features: vec![scored("Search", 1234.5678, "x")],
        };
        assert!(render_table(&result).contains("1234.57"));
    }

    #[test]
    fn test_present_pending_blocks_submit() {
        let view = present(&ScoringStatus::Pending {
            submission_id: Uuid::new_v4(),
            started_at: Utc::now(),
        });
        assert_eq!(view.presentation, Presentation::Loading { rows: 4 });
        assert!(!view.can_submit);
    }

    #[test]
    fn test_present_failure_shows_placeholder_and_notification() {
        let view = present(&ScoringStatus::Failed {
            submission_id: Uuid::new_v4(),
            notification: Notification::error("nope"),
        });
        assert!(matches!(view.presentation, Presentation::Placeholder { .. }));
        assert_eq!(view.notification.unwrap().message, "nope");
        assert!(view.can_submit);
    }

    #[test]
    fn test_present_ready_preserves_order() {
        let view = present(&ScoringStatus::Ready {
            submission_id: Uuid::new_v4(),
            result: PrioritizationResult {
                prioritized_features: vec![scored("A", 80.0, ""), scored("B", 95.0, "")],
            },
            completed_at: Utc::now(),
        });
        match view.presentation {
            Presentation::Table { rows } => {
                let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
                assert_eq!(names, vec!["A", "B"]);
            }
            other => panic!("expected table, got {:?}", other),
        }
    }
}
