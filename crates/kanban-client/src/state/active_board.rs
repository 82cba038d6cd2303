use super::Observable;
use kanban_domain::{BoardId, BoardSummary};
use tokio::sync::watch;

/// Which board the user is looking at.
#[derive(Debug, Clone)]
pub struct ActiveBoardStore {
    inner: Observable<Option<BoardId>>,
}

impl Default for ActiveBoardStore {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ActiveBoardStore {
    pub fn new(initial: Option<BoardId>) -> Self {
        Self {
            inner: Observable::new(initial),
        }
    }

    pub fn get(&self) -> Option<BoardId> {
        self.inner.get()
    }

    pub fn set(&self, board_id: impl Into<BoardId>) {
        self.inner.replace(Some(board_id.into()));
    }

    pub fn clear(&self) {
        self.inner.replace(None);
    }

    /// Falls back to the first listed board when nothing is selected or the
    /// selection has disappeared. Returns the resulting selection.
    pub fn reconcile(&self, boards: &[BoardSummary]) -> Option<BoardId> {
        let Some(first) = boards.first() else {
            return self.get();
        };
        let current = self.get();
        let still_listed = current
            .as_deref()
            .is_some_and(|id| boards.iter().any(|b| b.id == id));
        if still_listed {
            return current;
        }
        tracing::debug!("Selecting board {} as active", first.id);
        self.set(first.id.clone());
        Some(first.id.clone())
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<BoardId>> {
        self.inner.subscribe()
    }
}
