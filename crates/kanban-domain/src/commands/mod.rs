use crate::BoardData;
use kanban_core::KanbanResult;

pub mod card_commands;
pub mod column_commands;

pub use card_commands::*;
pub use column_commands::*;

/// Trait for board mutations.
/// A command describes one user intent and produces the next board snapshot
/// without touching the one it was given.
pub trait Command: Send + Sync {
    /// Compute the board that results from this command
    fn execute(&self, board: &BoardData) -> KanbanResult<BoardData>;

    /// Human-readable description of what this command does
    fn description(&self) -> String;
}
