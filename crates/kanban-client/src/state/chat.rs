use super::Observable;
use kanban_domain::ChatMessage;
use tokio::sync::watch;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatState {
    pub messages: Vec<ChatMessage>,
    pub loading: bool,
    /// Inline error shown under the transcript
    pub error: Option<String>,
}

/// In-memory chat transcript. Not persisted across runs.
#[derive(Debug, Clone)]
pub struct ChatStore {
    inner: Observable<ChatState>,
}

impl Default for ChatStore {
    fn default() -> Self {
        Self {
            inner: Observable::new(ChatState::default()),
        }
    }
}

impl ChatStore {
    pub fn get(&self) -> ChatState {
        self.inner.get()
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.inner.read(|s| s.messages.clone())
    }

    pub fn is_loading(&self) -> bool {
        self.inner.read(|s| s.loading)
    }

    pub fn error(&self) -> Option<String> {
        self.inner.read(|s| s.error.clone())
    }

    pub fn add_message(&self, message: ChatMessage) {
        self.inner.modify(|s| s.messages.push(message));
    }

    pub fn set_loading(&self, loading: bool) {
        self.inner.modify(|s| s.loading = loading);
    }

    pub fn set_error(&self, error: Option<String>) {
        self.inner.modify(|s| s.error = error);
    }

    pub fn clear(&self) {
        self.inner.replace(ChatState::default());
    }

    pub fn subscribe(&self) -> watch::Receiver<ChatState> {
        self.inner.subscribe()
    }
}
