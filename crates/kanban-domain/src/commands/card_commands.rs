use super::Command;
use crate::{create_id, operations, BoardData, CardId, ColumnId};
use kanban_core::{KanbanError, KanbanResult};

/// Drag-and-drop reorder of a card onto another card or onto a column
pub struct MoveCard {
    pub card_id: CardId,
    /// Card or column the card was dropped on
    pub target_id: String,
}

impl Command for MoveCard {
    fn execute(&self, board: &BoardData) -> KanbanResult<BoardData> {
        if board.column_of(&self.card_id).is_none() {
            return Err(KanbanError::NotFound(format!("card {}", self.card_id)));
        }
        if board.column_of(&self.target_id).is_none() && board.column(&self.target_id).is_none() {
            return Err(KanbanError::NotFound(format!("drop target {}", self.target_id)));
        }
        Ok(BoardData {
            columns: operations::move_card(&board.columns, &self.card_id, &self.target_id),
            cards: board.cards.clone(),
        })
    }

    fn description(&self) -> String {
        format!("Move card {} onto {}", self.card_id, self.target_id)
    }
}

/// Create a new card at the end of a column.
/// The id is allocated when the command is built so that executing it is deterministic.
pub struct AddCard {
    pub column_id: ColumnId,
    pub card_id: CardId,
    pub title: String,
    pub details: String,
}

impl AddCard {
    pub fn new(
        column_id: impl Into<ColumnId>,
        title: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            column_id: column_id.into(),
            card_id: create_id("card"),
            title: title.into(),
            details: details.into(),
        }
    }
}

impl Command for AddCard {
    fn execute(&self, board: &BoardData) -> KanbanResult<BoardData> {
        if board.column(&self.column_id).is_none() {
            return Err(KanbanError::NotFound(format!("column {}", self.column_id)));
        }
        Ok(operations::add_card_with_id(
            board,
            &self.column_id,
            self.card_id.clone(),
            &self.title,
            &self.details,
        ))
    }

    fn description(&self) -> String {
        format!("Create card: '{}'", self.title)
    }
}

/// Delete a card from a column and from the card map
pub struct DeleteCard {
    pub column_id: ColumnId,
    pub card_id: CardId,
}

impl Command for DeleteCard {
    fn execute(&self, board: &BoardData) -> KanbanResult<BoardData> {
        let listed = board
            .column(&self.column_id)
            .is_some_and(|column| column.contains(&self.card_id));
        let present =
            board.cards.contains_key(&self.card_id) || board.column_of(&self.card_id).is_some();
        // An already-deleted card stays a no-op
        if present && !listed {
            return Err(KanbanError::NotFound(format!(
                "card {} in column {}",
                self.card_id, self.column_id
            )));
        }
        Ok(operations::delete_card(board, &self.column_id, &self.card_id))
    }

    fn description(&self) -> String {
        format!("Delete card {}", self.card_id)
    }
}
