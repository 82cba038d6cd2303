use kanban_core::{KanbanError, KanbanResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::card::{Card, CardId};
use crate::column::Column;

pub type BoardId = String;

/// Lightweight handle used for board selection. Carries no columns or cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSummary {
    pub id: BoardId,
    pub title: String,
    pub owner_username: String,
}

impl BoardSummary {
    pub fn is_owned_by(&self, username: &str) -> bool {
        self.owner_username == username
    }
}

/// Full contents of one board, fetched and persisted as a whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardData {
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub cards: BTreeMap<CardId, Card>,
}

impl BoardData {
    pub fn new(columns: Vec<Column>, cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            columns,
            cards: cards.into_iter().map(|card| (card.id.clone(), card)).collect(),
        }
    }

    pub fn column(&self, column_id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    pub fn card(&self, card_id: &str) -> Option<&Card> {
        self.cards.get(card_id)
    }

    /// Column currently holding `card_id`.
    pub fn column_of(&self, card_id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.contains(card_id))
    }

    /// Cards of a column in display order. Dangling ids are skipped.
    pub fn cards_in(&self, column_id: &str) -> Vec<&Card> {
        self.column(column_id)
            .map(|column| {
                column
                    .card_ids
                    .iter()
                    .filter_map(|id| self.cards.get(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Checks that column card lists and the card map describe the same set of
    /// ids, with every id listed exactly once.
    pub fn validate(&self) -> KanbanResult<()> {
        let mut column_ids = HashSet::new();
        let mut seen = HashSet::new();

        for column in &self.columns {
            if !column_ids.insert(column.id.as_str()) {
                return Err(KanbanError::Validation(format!(
                    "duplicate column id {}",
                    column.id
                )));
            }
            for card_id in &column.card_ids {
                if !seen.insert(card_id.as_str()) {
                    return Err(KanbanError::Validation(format!(
                        "card {} is listed more than once",
                        card_id
                    )));
                }
                if !self.cards.contains_key(card_id) {
                    return Err(KanbanError::Validation(format!(
                        "column {} lists unknown card {}",
                        column.id, card_id
                    )));
                }
            }
        }

        if let Some(orphan) = self.cards.keys().find(|id| !seen.contains(id.as_str())) {
            return Err(KanbanError::Validation(format!(
                "card {} is not in any column",
                orphan
            )));
        }

        Ok(())
    }
}
