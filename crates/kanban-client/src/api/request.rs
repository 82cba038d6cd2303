use kanban_core::{KanbanError, KanbanResult};
use reqwest::Method;
use serde::Serialize;

/// Everything that varies between backend calls.
///
/// Headers are derived from these fields in `HttpKanbanApi::send`.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOptions {
    /// Attach `Authorization: Bearer <token>` from the session store
    pub auth: bool,
    pub method: Method,
    /// JSON body; sets `Content-Type: application/json` when present
    pub body: Option<serde_json::Value>,
}

impl RequestOptions {
    fn new(method: Method, body: Option<serde_json::Value>) -> Self {
        Self {
            auth: true,
            method,
            body,
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET, None)
    }

    pub fn delete() -> Self {
        Self::new(Method::DELETE, None)
    }

    pub fn post<T: Serialize>(body: &T) -> KanbanResult<Self> {
        Ok(Self::new(Method::POST, Some(to_json(body)?)))
    }

    pub fn post_empty() -> Self {
        Self::new(Method::POST, None)
    }

    pub fn patch<T: Serialize>(body: &T) -> KanbanResult<Self> {
        Ok(Self::new(Method::PATCH, Some(to_json(body)?)))
    }

    /// Send without credentials (login).
    pub fn public(mut self) -> Self {
        self.auth = false;
        self
    }
}

fn to_json<T: Serialize>(body: &T) -> KanbanResult<serde_json::Value> {
    serde_json::to_value(body).map_err(|e| KanbanError::Serialization(e.to_string()))
}
