//! Optimistic board persistence.
//!
//! A new board value is written to the cache before the network round-trip so
//! readers see it immediately. The remote call is made once. On failure the
//! cache goes back to the exact pre-mutation snapshot, unless a later mutation
//! has written to the same board in the meantime.

use crate::api::KanbanApi;
use crate::cache::{QueryCache, QueryData, QueryKey};
use kanban_core::KanbanResult;
use kanban_domain::BoardData;

/// Per-mutation lifecycle. There is no retry state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationState {
    Idle,
    OptimisticApplied,
    Confirmed,
    RolledBack,
    /// Failure arrived after a newer optimistic write; that write was kept
    RollbackSkipped,
}

/// One optimistic write against the board cache.
#[derive(Debug)]
pub struct OptimisticMutation {
    cache: QueryCache,
    key: QueryKey,
    previous: Option<QueryData>,
    revision: u64,
    state: MutationState,
}

impl OptimisticMutation {
    pub fn new(cache: &QueryCache, board_id: &str) -> Self {
        Self {
            cache: cache.clone(),
            key: QueryKey::Board(board_id.to_string()),
            previous: None,
            revision: 0,
            state: MutationState::Idle,
        }
    }

    pub fn state(&self) -> MutationState {
        self.state
    }

    /// Snapshots the current entry and writes `board` in its place.
    pub fn apply(&mut self, board: BoardData) {
        self.previous = self.cache.get(&self.key);
        self.revision = self.cache.set(self.key.clone(), QueryData::Board(board));
        self.state = MutationState::OptimisticApplied;
    }

    /// Server accepted the board. Marks the entry stale so the next read picks
    /// up server-side normalization.
    pub fn confirm(&mut self) {
        self.cache.invalidate(&self.key);
        self.state = MutationState::Confirmed;
    }

    pub fn roll_back(&mut self) {
        if self
            .cache
            .restore_if(&self.key, self.revision, self.previous.take())
        {
            tracing::warn!("Rolled back optimistic update of {:?}", self.key);
            self.state = MutationState::RolledBack;
        } else {
            tracing::warn!(
                "Skipped stale rollback of {:?}: a newer update was applied",
                self.key
            );
            self.state = MutationState::RollbackSkipped;
        }
    }
}

/// Applies `new_board` to the cache, sends it as a full-document replace, and
/// rolls the cache back if the backend rejects it. The error is returned to
/// the caller after the rollback.
pub async fn persist(
    cache: &QueryCache,
    api: &dyn KanbanApi,
    board_id: &str,
    new_board: BoardData,
) -> KanbanResult<BoardData> {
    let mut mutation = OptimisticMutation::new(cache, board_id);
    mutation.apply(new_board.clone());

    match api.update_board(board_id, &new_board).await {
        Ok(saved) => {
            mutation.confirm();
            tracing::info!("Saved board {}", board_id);
            Ok(saved)
        }
        Err(e) => {
            mutation.roll_back();
            Err(e)
        }
    }
}
