use super::Command;
use crate::{operations, BoardData, ColumnId};
use kanban_core::{KanbanError, KanbanResult};

/// Rename a column, leaving its cards untouched
pub struct RenameColumn {
    pub column_id: ColumnId,
    pub title: String,
}

impl Command for RenameColumn {
    fn execute(&self, board: &BoardData) -> KanbanResult<BoardData> {
        if board.column(&self.column_id).is_none() {
            return Err(KanbanError::NotFound(format!(
                "column {}",
                self.column_id
            )));
        }
        Ok(operations::rename_column(board, &self.column_id, &self.title))
    }

    fn description(&self) -> String {
        format!("Rename column {} to '{}'", self.column_id, self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Column;

    #[test]
    fn test_rename_unknown_column_fails() {
        let board = BoardData::new(vec![Column::new("col-a", "A")], []);
        let cmd = RenameColumn {
            column_id: "col-z".into(),
            title: "Z".into(),
        };
        assert!(matches!(cmd.execute(&board), Err(KanbanError::NotFound(_))));
    }

    #[test]
    fn test_rename_column() {
        let board = BoardData::new(vec![Column::new("col-a", "A")], []);
        let cmd = RenameColumn {
            column_id: "col-a".into(),
            title: "Review".into(),
        };
        let next = cmd.execute(&board).unwrap();
        assert_eq!(next.columns[0].title, "Review");
        assert_eq!(board.columns[0].title, "A");
    }
}
