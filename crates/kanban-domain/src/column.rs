use serde::{Deserialize, Serialize};

use crate::card::CardId;

pub type ColumnId = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    /// Authoritative card order for this column.
    #[serde(rename = "cardIds", default)]
    pub card_ids: Vec<CardId>,
}

impl Column {
    pub fn new(id: impl Into<ColumnId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            card_ids: Vec::new(),
        }
    }

    pub fn with_cards<I, S>(mut self, card_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CardId>,
    {
        self.card_ids = card_ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn position_of(&self, card_id: &str) -> Option<usize> {
        self.card_ids.iter().position(|id| id == card_id)
    }

    pub fn contains(&self, card_id: &str) -> bool {
        self.position_of(card_id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_ids_use_camel_case_on_the_wire() {
        let column = Column::new("col-a", "Backlog").with_cards(["card-1"]);
        let json = serde_json::to_value(&column).unwrap();
        assert_eq!(json["cardIds"][0], "card-1");
        assert!(json.get("card_ids").is_none());
    }

    #[test]
    fn test_position_of() {
        let column = Column::new("col-a", "Backlog").with_cards(["card-1", "card-2"]);
        assert_eq!(column.position_of("card-2"), Some(1));
        assert!(!column.contains("card-3"));
    }
}
