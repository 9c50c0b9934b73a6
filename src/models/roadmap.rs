use serde::{Deserialize, Serialize};

/// A card on the roadmap board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapFeature {
    pub id: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    /// Avatar URL of the person working on the feature.
    pub assignee: String,
    /// Initials shown when the avatar cannot be loaded.
    pub assignee_fallback: String,
}

/// The development status columns of the roadmap board.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Column {
    Backlog,
    InProgress,
    Review,
    Done,
}

impl Column {
    pub const ALL: [Column; 4] = [
        Column::Backlog,
        Column::InProgress,
        Column::Review,
        Column::Done,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Backlog => "backlog",
            Self::InProgress => "inProgress",
            Self::Review => "review",
            Self::Done => "done",
        }
    }

}

/// The four ordered columns of the roadmap.
///
/// Every card id appears in exactly one column. The board is only changed by
/// `RoadmapBoard::apply_move`, which returns a new board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapBoard {
    pub backlog: Vec<RoadmapFeature>,
    pub in_progress: Vec<RoadmapFeature>,
    pub review: Vec<RoadmapFeature>,
    pub done: Vec<RoadmapFeature>,
}

/// A position on the board.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CardPosition {
    pub column: Column,
    pub index: usize,
}

/// The outcome of one drag gesture.
///
/// `destination` is `None` when the card was dropped outside every column.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CardMove {
    pub source: CardPosition,
    pub destination: Option<CardPosition>,
}
