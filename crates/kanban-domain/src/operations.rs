//! Pure board transformations.
//!
//! Every function takes a snapshot by reference and returns a new value. Inputs
//! are never mutated, so callers can keep the old snapshot around for rollback.

use crate::board::BoardData;
use crate::card::{Card, CardId};
use crate::column::Column;
use crate::id::create_id;

pub const DEFAULT_CARD_DETAILS: &str = "No details yet.";

/// Column index and position of `card_id`, if it is listed anywhere.
fn locate_card(columns: &[Column], card_id: &str) -> Option<(usize, usize)> {
    columns
        .iter()
        .enumerate()
        .find_map(|(col_idx, column)| column.position_of(card_id).map(|pos| (col_idx, pos)))
}

/// Reorders `dragged_card_id` relative to `target_id`.
///
/// `target_id` is either a card (drop onto a card) or a column (drop onto the
/// empty space of a column, which appends). Within one column the dragged card
/// takes the target's slot; across columns it lands directly before the target
/// card. Unknown ids and self-drops return the columns unchanged.
pub fn move_card(columns: &[Column], dragged_card_id: &str, target_id: &str) -> Vec<Column> {
    if dragged_card_id == target_id {
        return columns.to_vec();
    }

    let Some((source_col, source_pos)) = locate_card(columns, dragged_card_id) else {
        return columns.to_vec();
    };

    let (dest_col, target_pos) = match locate_card(columns, target_id) {
        Some((col, pos)) => (col, Some(pos)),
        None => match columns.iter().position(|c| c.id == target_id) {
            Some(col) => (col, None),
            None => return columns.to_vec(),
        },
    };

    let mut next = columns.to_vec();
    let dragged = next[source_col].card_ids.remove(source_pos);

    let dest_ids = &mut next[dest_col].card_ids;
    // Same column: the target's original index, applied to the post-removal list
    let insert_at = match target_pos {
        Some(pos) if dest_col == source_col => pos.min(dest_ids.len()),
        Some(_) => dest_ids
            .iter()
            .position(|id| id == target_id)
            .unwrap_or(dest_ids.len()),
        None => dest_ids.len(),
    };
    dest_ids.insert(insert_at, dragged);

    next
}

pub(crate) fn add_card_with_id(
    board: &BoardData,
    column_id: &str,
    card_id: CardId,
    title: &str,
    details: &str,
) -> BoardData {
    if board.column(column_id).is_none() {
        return board.clone();
    }

    let details = if details.trim().is_empty() {
        DEFAULT_CARD_DETAILS.to_string()
    } else {
        details.to_string()
    };

    let mut next = board.clone();
    for column in next.columns.iter_mut().filter(|c| c.id == column_id) {
        column.card_ids.push(card_id.clone());
    }
    next.cards.insert(card_id.clone(), Card::new(card_id, title.to_string(), details));
    next
}

/// Appends a new card to `column_id` under a freshly generated `card-` id.
///
/// When the column does not exist the board comes back unchanged and the id is
/// not used.
pub fn add_card(
    board: &BoardData,
    column_id: &str,
    title: &str,
    details: &str,
) -> (BoardData, CardId) {
    let card_id = create_id("card");
    let next = add_card_with_id(board, column_id, card_id.clone(), title, details);
    (next, card_id)
}

/// Removes a card from its column and from the card map. Absent ids are a no-op.
pub fn delete_card(board: &BoardData, column_id: &str, card_id: &str) -> BoardData {
    let mut next = board.clone();
    for column in next.columns.iter_mut().filter(|c| c.id == column_id) {
        column.card_ids.retain(|id| id != card_id);
    }
    next.cards.remove(card_id);
    next
}

pub fn rename_column(board: &BoardData, column_id: &str, title: &str) -> BoardData {
    let mut next = board.clone();
    for column in next.columns.iter_mut().filter(|c| c.id == column_id) {
        column.title = title.to_string();
    }
    next
}

/// Mirrors the result of the assignee endpoint into a cached board.
pub fn set_assignee(board: &BoardData, card: &Card) -> BoardData {
    let mut next = board.clone();
    if let Some(existing) = next.cards.get_mut(&card.id) {
        existing.assigned_to = card.assigned_to.clone();
    }
    next
}
