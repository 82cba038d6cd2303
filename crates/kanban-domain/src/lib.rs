pub mod board;
pub mod card;
pub mod chat;
pub mod column;
pub mod commands;
pub mod id;
pub mod member;
pub mod operations;

pub use board::{BoardData, BoardId, BoardSummary};
pub use card::{Card, CardId};
pub use chat::{ChatMessage, ChatRole};
pub use column::{Column, ColumnId};
pub use commands::{AddCard, Command, DeleteCard, MoveCard, RenameColumn};
pub use id::create_id;
pub use member::Member;
pub use operations::{
    add_card, delete_card, move_card, rename_column, set_assignee, DEFAULT_CARD_DETAILS,
};
