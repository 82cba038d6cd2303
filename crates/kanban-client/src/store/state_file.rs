use crate::state::{ActiveBoardStore, Session, SessionStore};
use crate::store::atomic_writer::AtomicWriter;
use chrono::{DateTime, Utc};
use kanban_core::{KanbanError, KanbanResult};
use kanban_domain::BoardId;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const STATE_FILE_NAME: &str = "state.json";

/// What survives between runs: the session and the selected board.
/// The chat transcript is not persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub session: Session,
    #[serde(default)]
    pub active_board_id: Option<BoardId>,
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
}

impl PersistedState {
    pub fn capture(session: &SessionStore, active_board: &ActiveBoardStore) -> Self {
        Self {
            session: session.get(),
            active_board_id: active_board.get(),
            saved_at: None,
        }
    }

    pub fn into_stores(self) -> (SessionStore, ActiveBoardStore) {
        (
            SessionStore::new(self.session),
            ActiveBoardStore::new(self.active_board_id),
        )
    }
}

#[derive(Debug, Clone)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(STATE_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing file means a fresh, signed-out client.
    pub async fn load(&self) -> KanbanResult<PersistedState> {
        match AtomicWriter::read_optional(&self.path).await? {
            Some(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| KanbanError::Serialization(e.to_string())),
            None => Ok(PersistedState::default()),
        }
    }

    pub async fn save(&self, state: &PersistedState) -> KanbanResult<()> {
        let mut state = state.clone();
        state.saved_at = Some(Utc::now());
        let bytes = serde_json::to_vec_pretty(&state)
            .map_err(|e| KanbanError::Serialization(e.to_string()))?;
        AtomicWriter::write_atomic(&self.path, &bytes).await
    }
}
