use serde::{Deserialize, Serialize};

pub type CardId = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub title: String,
    #[serde(default)]
    pub details: String,
    /// Username of the creator, resolved by the backend.
    #[serde(default)]
    pub created_by: Option<String>,
    /// Only changed through the assignee endpoint, never by a board PATCH.
    #[serde(default)]
    pub assigned_to: Option<String>,
}

impl Card {
    pub fn new(id: CardId, title: String, details: String) -> Self {
        Self {
            id,
            title,
            details,
            created_by: None,
            assigned_to: None,
        }
    }

    pub fn is_assigned(&self) -> bool {
        self.assigned_to.is_some()
    }
}
