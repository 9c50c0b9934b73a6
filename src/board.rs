//! Roadmap board mutations.
//!
//! A move is computed on a copy of the board and returned as a new value, so
//! callers swap the whole board in one step and never expose a state where a
//! card is missing or duplicated.

use thiserror::Error;

use crate::models::{CardMove, Column, RoadmapBoard, RoadmapFeature};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("no card at index {index} in {col}", col = .column.as_str())]
    SourceOutOfRange { column: Column, index: usize },

    #[error("index {index} is past the end of {col}", col = .column.as_str())]
    DestinationOutOfRange { column: Column, index: usize },
}

impl RoadmapBoard {
    pub fn column(&self, column: Column) -> &[RoadmapFeature] {
        match column {
            Column::Backlog => &self.backlog,
            Column::InProgress => &self.in_progress,
            Column::Review => &self.review,
            Column::Done => &self.done,
        }
    }

    fn column_mut(&mut self, column: Column) -> &mut Vec<RoadmapFeature> {
        match column {
            Column::Backlog => &mut self.backlog,
            Column::InProgress => &mut self.in_progress,
            Column::Review => &mut self.review,
            Column::Done => &mut self.done,
        }
    }

    /// Total number of cards across all columns.
    pub fn card_count(&self) -> usize {
        Column::ALL.iter().map(|c| self.column(*c).len()).sum()
    }

    /// Column currently holding the card with `id`.
    pub fn find(&self, id: &str) -> Option<(Column, usize)> {
        Column::ALL.iter().find_map(|column| {
            self.column(*column)
                .iter()
                .position(|card| card.id == id)
                .map(|index| (*column, index))
        })
    }

    /// Apply one drag gesture and return the resulting board.
    ///
    /// A drop with no destination, or onto the card's own position, returns an
    /// unchanged copy. Invalid indices leave `self` untouched.
    pub fn apply_move(&self, card_move: &CardMove) -> Result<RoadmapBoard, BoardError> {
        let source = card_move.source;
        if source.index >= self.column(source.column).len() {
            return Err(BoardError::SourceOutOfRange {
                column: source.column,
                index: source.index,
            });
        }

        let Some(destination) = card_move.destination else {
            return Ok(self.clone());
        };

        // After removal the destination column is one shorter when it is the
        // source column, so the valid insert range shrinks with it.
        let destination_len = self.column(destination.column).len();
        let max_index = if destination.column == source.column {
            destination_len - 1
        } else {
            destination_len
        };
        if destination.index > max_index {
            return Err(BoardError::DestinationOutOfRange {
                column: destination.column,
                index: destination.index,
            });
        }

        if destination == source {
            return Ok(self.clone());
        }

        let mut next = self.clone();
        let card = next.column_mut(source.column).remove(source.index);
        next.column_mut(destination.column)
            .insert(destination.index, card);
        Ok(next)
    }
}
