//! Client-side query cache.
//!
//! Entries carry a revision that increases on every write. The optimistic
//! pipeline uses it to tell whether the value it wrote is still the current one.

use kanban_domain::{BoardData, BoardId, BoardSummary, Member};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;

const EVENT_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Boards,
    Board(BoardId),
    Members(BoardId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryData {
    Boards(Vec<BoardSummary>),
    Board(BoardData),
    Members(Vec<Member>),
}

/// Notifications for anything rendering from the cache
#[derive(Debug, Clone, PartialEq)]
pub enum CacheEvent {
    Updated(QueryKey),
    Invalidated(QueryKey),
    Removed(QueryKey),
    Cleared,
}

#[derive(Debug, Clone)]
struct Entry {
    data: QueryData,
    stale: bool,
    revision: u64,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<QueryKey, Entry>,
    last_revision: u64,
}

impl CacheState {
    fn next_revision(&mut self) -> u64 {
        self.last_revision += 1;
        self.last_revision
    }
}

#[derive(Debug, Clone)]
pub struct QueryCache {
    state: Arc<RwLock<CacheState>>,
    events: broadcast::Sender<CacheEvent>,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryCache {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            state: Arc::new(RwLock::new(CacheState::default())),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CacheEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: CacheEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    pub fn get(&self, key: &QueryKey) -> Option<QueryData> {
        self.state.read().entries.get(key).map(|e| e.data.clone())
    }

    /// Cached value that has not been invalidated since it was written.
    pub fn get_fresh(&self, key: &QueryKey) -> Option<QueryData> {
        self.state
            .read()
            .entries
            .get(key)
            .filter(|e| !e.stale)
            .map(|e| e.data.clone())
    }

    pub fn get_board(&self, board_id: &str) -> Option<BoardData> {
        match self.get(&QueryKey::Board(board_id.to_string())) {
            Some(QueryData::Board(board)) => Some(board),
            _ => None,
        }
    }

    pub fn get_boards(&self) -> Option<Vec<BoardSummary>> {
        match self.get(&QueryKey::Boards) {
            Some(QueryData::Boards(boards)) => Some(boards),
            _ => None,
        }
    }

    pub fn is_stale(&self, key: &QueryKey) -> bool {
        self.state
            .read()
            .entries
            .get(key)
            .map(|e| e.stale)
            .unwrap_or(true)
    }

    pub fn revision(&self, key: &QueryKey) -> Option<u64> {
        self.state.read().entries.get(key).map(|e| e.revision)
    }

    /// Stores a fresh value and returns the revision it was written at.
    pub fn set(&self, key: QueryKey, data: QueryData) -> u64 {
        let revision = {
            let mut state = self.state.write();
            let revision = state.next_revision();
            state.entries.insert(
                key.clone(),
                Entry {
                    data,
                    stale: false,
                    revision,
                },
            );
            revision
        };
        tracing::debug!("Cache write {:?} at revision {}", key, revision);
        self.emit(CacheEvent::Updated(key));
        revision
    }

    /// Puts `previous` back, but only if nobody wrote to `key` after
    /// `expected_revision`. `None` removes the entry. Returns whether the
    /// restore happened.
    pub fn restore_if(
        &self,
        key: &QueryKey,
        expected_revision: u64,
        previous: Option<QueryData>,
    ) -> bool {
        let event = {
            let mut state = self.state.write();
            let current = state.entries.get(key).map(|e| e.revision);
            if current != Some(expected_revision) {
                return false;
            }
            match previous {
                Some(data) => {
                    let revision = state.next_revision();
                    state.entries.insert(
                        key.clone(),
                        Entry {
                            data,
                            stale: false,
                            revision,
                        },
                    );
                    CacheEvent::Updated(key.clone())
                }
                None => {
                    state.entries.remove(key);
                    CacheEvent::Removed(key.clone())
                }
            }
        };
        self.emit(event);
        true
    }

    /// Marks an entry stale so the next read refetches it.
    pub fn invalidate(&self, key: &QueryKey) {
        let found = {
            let mut state = self.state.write();
            match state.entries.get_mut(key) {
                Some(entry) => {
                    entry.stale = true;
                    true
                }
                None => false,
            }
        };
        if found {
            self.emit(CacheEvent::Invalidated(key.clone()));
        }
    }

    pub fn invalidate_all(&self) {
        let keys: Vec<QueryKey> = {
            let mut state = self.state.write();
            state
                .entries
                .iter_mut()
                .map(|(key, entry)| {
                    entry.stale = true;
                    key.clone()
                })
                .collect()
        };
        tracing::debug!("Invalidated {} cached queries", keys.len());
        for key in keys {
            self.emit(CacheEvent::Invalidated(key));
        }
    }

    pub fn remove(&self, key: &QueryKey) {
        if self.state.write().entries.remove(key).is_some() {
            self.emit(CacheEvent::Removed(key.clone()));
        }
    }

    pub fn clear(&self) {
        self.state.write().entries.clear();
        self.emit(CacheEvent::Cleared);
    }

    pub fn len(&self) -> usize {
        self.state.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
