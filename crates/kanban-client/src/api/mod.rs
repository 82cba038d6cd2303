//! Backend REST surface.
//!
//! `KanbanApi` is the seam between the client and the remote store. The HTTP
//! implementation lives in [`http`]; tests substitute their own.

pub mod http;
pub mod request;

use async_trait::async_trait;
use kanban_core::KanbanResult;
use kanban_domain::{BoardData, BoardId, BoardSummary, Card, ChatMessage, Member};
use serde::{Deserialize, Serialize};

pub use http::HttpKanbanApi;
pub use request::RequestOptions;

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateBoardRequest {
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InviteMemberRequest {
    pub username: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssignCardRequest {
    pub username: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub board: BoardData,
    pub board_id: BoardId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub message: String,
    #[serde(default)]
    pub board_update: Option<BoardData>,
}

/// Operations offered by the kanban backend.
///
/// Every method except `login` is authenticated. Implementations must clear the
/// session and invalidate cached queries before returning `Unauthorized`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KanbanApi: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> KanbanResult<LoginResponse>;
    async fn logout(&self) -> KanbanResult<()>;

    async fn list_boards(&self) -> KanbanResult<Vec<BoardSummary>>;
    async fn create_board(&self, title: &str) -> KanbanResult<BoardSummary>;
    async fn delete_board(&self, board_id: &str) -> KanbanResult<()>;

    async fn fetch_board(&self, board_id: &str) -> KanbanResult<BoardData>;
    /// Full-document replace. Returns the board as saved by the server.
    async fn update_board(&self, board_id: &str, board: &BoardData) -> KanbanResult<BoardData>;

    async fn list_members(&self, board_id: &str) -> KanbanResult<Vec<Member>>;
    async fn invite_member(&self, board_id: &str, username: &str) -> KanbanResult<Member>;
    async fn remove_member(&self, board_id: &str, username: &str) -> KanbanResult<()>;

    async fn assign_card(
        &self,
        board_id: &str,
        card_id: &str,
        username: Option<String>,
    ) -> KanbanResult<Card>;

    async fn send_chat(&self, request: &ChatRequest) -> KanbanResult<ChatResponse>;
}
