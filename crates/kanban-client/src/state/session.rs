use super::Observable;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

/// Holds the bearer token and the identity of the signed-in user.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Observable<Session>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(Session::default())
    }
}

impl SessionStore {
    pub fn new(initial: Session) -> Self {
        Self {
            inner: Observable::new(initial),
        }
    }

    pub fn get(&self) -> Session {
        self.inner.get()
    }

    pub fn token(&self) -> Option<String> {
        self.inner.read(|s| s.token.clone())
    }

    pub fn username(&self) -> Option<String> {
        self.inner.read(|s| s.username.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.read(|s| s.token.is_some())
    }

    pub fn set_session(&self, token: String, user_id: Option<String>, username: Option<String>) {
        self.inner.replace(Session {
            token: Some(token),
            user_id,
            username,
        });
    }

    pub fn clear(&self) {
        tracing::debug!("Clearing session");
        self.inner.replace(Session::default());
    }

    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.inner.subscribe()
    }
}
