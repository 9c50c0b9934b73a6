use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use insightstream::board::BoardError;
use insightstream::llm::ScriptedBackend;
use insightstream::models::*;
use insightstream::prioritization::{FeatureDraft, FeatureForm, ScoringOracle, ScoringStatus};
use insightstream::store::{initial_roadmap, AppState, Event, StateError, Store, View};
use speculate2::speculate;
use uuid::Uuid;

fn test_store() -> Store {
    let oracle = ScoringOracle::new(Arc::new(ScriptedBackend::new()), Duration::from_secs(1));
    Store::new(oracle).expect("Failed to create store")
}

fn position(column: Column, index: usize) -> CardPosition {
    CardPosition { column, index }
}

fn ids(cards: &[RoadmapFeature]) -> Vec<&str> {
    cards.iter().map(|c| c.id.as_str()).collect()
}

fn result(names: &[(&str, f64)]) -> PrioritizationResult {
    PrioritizationResult {
        prioritized_features: names
            .iter()
            .map(|(name, score)| PrioritizedFeature {
                name: name.to_string(),
                priority_score: *score,
                rationale: "because".to_string(),
            })
            .collect(),
    }
}

speculate! {
    before {
        let store = test_store();
    }

    describe "roadmap moves" {
        it "moves a card across columns keeping every id once" {
            let board = store.move_card(CardMove {
                source: position(Column::Backlog, 1),
                destination: Some(position(Column::InProgress, 1)),
            }).expect("Move failed");

            assert_eq!(ids(&board.backlog), vec!["feat-1", "feat-7"]);
            assert_eq!(ids(&board.in_progress), vec!["feat-3", "feat-2", "feat-4"]);
            assert_eq!(board.card_count(), 8);
        }

        it "reorders within a column" {
            let board = store.move_card(CardMove {
                source: position(Column::Backlog, 0),
                destination: Some(position(Column::Backlog, 2)),
            }).expect("Move failed");

            assert_eq!(ids(&board.backlog), vec!["feat-2", "feat-7", "feat-1"]);
        }

        it "reorders in progress without touching other columns" {
            let before = store.board();
            let board = store.move_card(CardMove {
                source: position(Column::InProgress, 0),
                destination: Some(position(Column::InProgress, 1)),
            }).expect("Move failed");

            assert_eq!(ids(&board.in_progress), vec!["feat-4", "feat-3"]);
            assert_eq!(board.backlog, before.backlog);
            assert_eq!(board.review, before.review);
            assert_eq!(board.done, before.done);
        }

        it "leaves the board unchanged when dropped in place" {
            let before = store.board();
            let board = store.move_card(CardMove {
                source: position(Column::Review, 1),
                destination: Some(position(Column::Review, 1)),
            }).expect("Move failed");

            assert_eq!(board, before);
        }

        it "rejects a destination past the end and keeps the board" {
            let before = store.board();
            let err = store.move_card(CardMove {
                source: position(Column::Backlog, 0),
                destination: Some(position(Column::Done, 3)),
            }).unwrap_err();

            assert!(matches!(
                err,
                StateError::Board(BoardError::DestinationOutOfRange { .. })
            ));
            assert_eq!(store.board(), before);
        }

        it "can empty a column and fill it again" {
            store.move_card(CardMove {
                source: position(Column::Done, 0),
                destination: Some(position(Column::Review, 0)),
            }).expect("Move failed");
            assert!(store.board().done.is_empty());

            let board = store.move_card(CardMove {
                source: position(Column::Review, 0),
                destination: Some(position(Column::Done, 0)),
            }).expect("Move failed");
            assert_eq!(ids(&board.done), vec!["feat-6"]);
        }
    }

    describe "navigation" {
        it "starts on the dashboard" {
            assert_eq!(store.active_view(), View::Dashboard);
        }

        it "keeps the form when leaving prioritization" {
            store.navigate(View::Prioritization).expect("Navigate failed");
            store.add_feature().expect("Add failed");
            store.navigate(View::Dashboard).expect("Navigate failed");

            assert_eq!(store.prioritization().form.features.len(), 3);
        }
    }

    describe "prioritization form" {
        it "starts with the seeded features" {
            let form = store.prioritization().form;
            assert_eq!(form, FeatureForm::default());
            assert_eq!(form.features.len(), 2);
        }

        it "appends blank rows" {
            let form = store.add_feature().expect("Add failed");
            assert_eq!(form.features.last(), Some(&FeatureDraft::blank()));
        }

        it "removes a row by index" {
            let form = store.remove_feature(0).expect("Remove failed");
            assert_eq!(form.features.len(), 1);
            assert_eq!(form.features[0].name, "Revamp Search Algorithm");
        }

        it "reports a missing row" {
            assert_eq!(store.remove_feature(7), Err(StateError::FeatureNotFound(7)));
        }

        it "replaces the whole form" {
            let mut form = FeatureForm::default();
            form.key_metrics = "Reduce churn among premium subscribers.".to_string();
            store.replace_form(form.clone()).expect("Replace failed");

            assert_eq!(store.prioritization().form, form);
        }
    }

    describe "scoring status" {
        before {
            let board = initial_roadmap().expect("Failed to load roadmap");
            let state = AppState::new(board);
            let submission_id = Uuid::new_v4();
            let pending = state.reduce(Event::SubmissionStarted {
                submission_id,
                at: Utc::now(),
            }).expect("Start failed");
        }

        it "refuses a second start while pending" {
            let err = pending.reduce(Event::SubmissionStarted {
                submission_id: Uuid::new_v4(),
                at: Utc::now(),
            }).unwrap_err();
            assert_eq!(err, StateError::SubmissionPending);
        }

        it "stores the result of the pending submission" {
            let ready = pending.reduce(Event::SubmissionSucceeded {
                submission_id,
                result: result(&[("B", 95.0), ("A", 80.0)]),
                at: Utc::now(),
            }).expect("Reduce failed");

            let shown = ready.prioritization.status.result().expect("No result");
            assert_eq!(shown.prioritized_features[0].name, "B");
        }

        it "ignores a completion for another submission" {
            let next = pending.reduce(Event::SubmissionSucceeded {
                submission_id: Uuid::new_v4(),
                result: result(&[("A", 1.0)]),
                at: Utc::now(),
            }).expect("Reduce failed");

            assert_eq!(next, pending);
        }

        it "clears the previous result when a new submission starts" {
            let ready = pending.reduce(Event::SubmissionSucceeded {
                submission_id,
                result: result(&[("A", 50.0)]),
                at: Utc::now(),
            }).expect("Reduce failed");

            let again = ready.reduce(Event::SubmissionStarted {
                submission_id: Uuid::new_v4(),
                at: Utc::now(),
            }).expect("Restart failed");

            assert!(again.prioritization.status.is_pending());
            assert!(again.prioritization.status.result().is_none());
        }

        it "drops a late completion after navigating away" {
            let on_panel = state
                .reduce(Event::Navigate(View::Prioritization))
                .and_then(|s| s.reduce(Event::SubmissionStarted { submission_id, at: Utc::now() }))
                .expect("Setup failed");
            let away = on_panel.reduce(Event::Navigate(View::Roadmap)).expect("Navigate failed");
            assert_eq!(away.prioritization.status, ScoringStatus::Idle);

            let late = away.reduce(Event::SubmissionFailed {
                submission_id,
                message: "boom".to_string(),
            }).expect("Reduce failed");
            assert_eq!(late, away);
        }

        it "drops a ready result on any change of view" {
            let ready = pending.reduce(Event::SubmissionSucceeded {
                submission_id,
                result: result(&[("A", 10.0)]),
                at: Utc::now(),
            }).expect("Reduce failed");
            assert_eq!(ready.active_view, View::Dashboard);

            let away = ready.reduce(Event::Navigate(View::Roadmap)).expect("Navigate failed");
            assert_eq!(away.prioritization.status, ScoringStatus::Idle);
            assert_eq!(away.prioritization.form, ready.prioritization.form);
        }

        it "keeps the status when navigating to the current view" {
            let same = pending.reduce(Event::Navigate(View::Dashboard)).expect("Navigate failed");
            assert!(same.prioritization.status.is_pending());
        }

        it "keeps the form on failure and clears the notice on dismiss" {
            let failed = pending.reduce(Event::SubmissionFailed {
                submission_id,
                message: "boom".to_string(),
            }).expect("Reduce failed");

            assert_eq!(failed.prioritization.form, pending.prioritization.form);
            assert_eq!(
                failed.prioritization.status.notification().map(|n| n.message.as_str()),
                Some("boom")
            );

            let dismissed = failed.reduce(Event::NotificationDismissed).expect("Dismiss failed");
            assert_eq!(dismissed.prioritization.status, ScoringStatus::Idle);
        }
    }
}
