use serde::{Deserialize, Serialize};

use crate::board::BoardSummary;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub user_id: String,
    pub username: String,
}

impl Member {
    /// The owner is always a member and is recognised by username.
    pub fn is_owner_of(&self, board: &BoardSummary) -> bool {
        board.is_owned_by(&self.username)
    }
}
