//! Application-level operations over one signed-in client.
//!
//! `BoardWorkspace` wires the API, the query cache and the state stores
//! together. Each method corresponds to one user action (a drop, a form
//! submit, a button press).

use crate::api::{ChatRequest, HttpKanbanApi, KanbanApi};
use crate::cache::{QueryCache, QueryData, QueryKey};
use crate::optimistic::persist;
use crate::query::{with_retry, RetryPolicy};
use crate::state::{ActiveBoardStore, ChatStore, SessionStore};
use kanban_core::{ClientConfig, KanbanError, KanbanResult};
use kanban_domain::{
    set_assignee, AddCard, BoardData, BoardId, BoardSummary, Card, CardId, ChatMessage, Command,
    DeleteCard, Member, MoveCard, RenameColumn,
};
use std::sync::Arc;

pub const CHAT_ERROR_MESSAGE: &str = "Failed to get a response. Please try again.";

pub struct BoardWorkspace {
    api: Arc<dyn KanbanApi>,
    cache: QueryCache,
    session: SessionStore,
    active_board: ActiveBoardStore,
    chat: ChatStore,
    retry: RetryPolicy,
}

impl BoardWorkspace {
    pub fn new(
        api: Arc<dyn KanbanApi>,
        cache: QueryCache,
        session: SessionStore,
        active_board: ActiveBoardStore,
        chat: ChatStore,
    ) -> Self {
        Self {
            api,
            cache,
            session,
            active_board,
            chat,
            retry: RetryPolicy::default(),
        }
    }

    /// Builds the HTTP-backed workspace, sharing `session` with the API so a
    /// 401 clears it.
    pub fn connect(
        config: &ClientConfig,
        session: SessionStore,
        active_board: ActiveBoardStore,
    ) -> KanbanResult<Self> {
        let cache = QueryCache::new();
        let api = HttpKanbanApi::new(config, session.clone(), cache.clone())?;
        Ok(Self::new(
            Arc::new(api),
            cache,
            session,
            active_board,
            ChatStore::default(),
        )
        .with_retry_policy(RetryPolicy::from_config(config)))
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn active_board(&self) -> &ActiveBoardStore {
        &self.active_board
    }

    pub fn chat(&self) -> &ChatStore {
        &self.chat
    }

    fn require_session(&self) -> KanbanResult<()> {
        if self.session.is_authenticated() {
            Ok(())
        } else {
            Err(KanbanError::Unauthorized)
        }
    }

    // Session

    pub async fn login(&self, username: &str, password: &str) -> KanbanResult<()> {
        let response = self.api.login(username, password).await?;
        let username = response.username.or_else(|| Some(username.to_string()));
        self.session
            .set_session(response.token, response.user_id, username);
        self.cache.clear();
        tracing::info!("Signed in");
        Ok(())
    }

    /// Local sign-out always happens, even when the backend call fails.
    pub async fn logout(&self) -> KanbanResult<()> {
        let result = if self.session.is_authenticated() {
            self.api.logout().await
        } else {
            Ok(())
        };
        self.session.clear();
        self.cache.clear();
        self.chat.clear();
        if let Err(e) = &result {
            tracing::warn!("Logout request failed: {}", e);
        }
        Ok(())
    }

    // Boards

    pub async fn boards(&self) -> KanbanResult<Vec<BoardSummary>> {
        self.require_session()?;
        if let Some(QueryData::Boards(boards)) = self.cache.get_fresh(&QueryKey::Boards) {
            return Ok(boards);
        }
        let api = self.api.as_ref();
        let boards = with_retry(self.retry, move || api.list_boards()).await?;
        self.cache
            .set(QueryKey::Boards, QueryData::Boards(boards.clone()));
        Ok(boards)
    }

    /// Loads the board list and makes sure a listed board is selected.
    pub async fn ensure_active_board(&self) -> KanbanResult<Option<BoardId>> {
        let boards = self.boards().await?;
        Ok(self.active_board.reconcile(&boards))
    }

    pub async fn active_summary(&self) -> KanbanResult<Option<BoardSummary>> {
        let Some(active) = self.ensure_active_board().await? else {
            return Ok(None);
        };
        Ok(self.boards().await?.into_iter().find(|b| b.id == active))
    }

    pub fn select_board(&self, board_id: &str) {
        self.active_board.set(board_id);
    }

    pub async fn create_board(&self, title: &str) -> KanbanResult<BoardSummary> {
        self.require_session()?;
        let summary = self.api.create_board(title).await?;
        self.cache.invalidate(&QueryKey::Boards);
        tracing::info!("Created board {}", summary.id);
        Ok(summary)
    }

    /// Deletes a board and moves the selection to the first remaining one.
    pub async fn delete_board(&self, board_id: &str) -> KanbanResult<()> {
        self.require_session()?;
        self.api.delete_board(board_id).await?;

        self.cache.invalidate(&QueryKey::Boards);
        self.cache.remove(&QueryKey::Board(board_id.to_string()));
        self.cache.remove(&QueryKey::Members(board_id.to_string()));
        tracing::info!("Deleted board {}", board_id);

        if self.active_board.get().as_deref() == Some(board_id) {
            self.active_board.clear();
            // Reselection waits for the next successful board list
            if let Err(e) = self.ensure_active_board().await {
                tracing::warn!("Could not reload boards after delete: {}", e);
            }
        }
        Ok(())
    }

    pub async fn board(&self, board_id: &str) -> KanbanResult<BoardData> {
        self.require_session()?;
        let key = QueryKey::Board(board_id.to_string());
        if let Some(QueryData::Board(board)) = self.cache.get_fresh(&key) {
            return Ok(board);
        }
        let api = self.api.as_ref();
        let board = with_retry(self.retry, move || api.fetch_board(board_id)).await?;
        self.cache.set(key, QueryData::Board(board.clone()));
        Ok(board)
    }

    /// Board the UI would render: the cached value if any, fetched otherwise.
    /// Unlike [`board`](Self::board) a stale entry is still served, matching
    /// what is on screen while a refetch is pending.
    pub async fn current_board(&self, board_id: &str) -> KanbanResult<BoardData> {
        match self.cache.get_board(board_id) {
            Some(board) => Ok(board),
            None => self.board(board_id).await,
        }
    }

    pub async fn active_board_data(&self) -> KanbanResult<Option<(BoardId, BoardData)>> {
        match self.ensure_active_board().await? {
            Some(id) => {
                let board = self.board(&id).await?;
                Ok(Some((id, board)))
            }
            None => Ok(None),
        }
    }

    // Board mutations

    /// Runs `command` against the current board and persists the result
    /// optimistically. Returns `false` when the backend rejected the update;
    /// the cache has been rolled back by then. Authentication failures and
    /// command errors are returned as errors.
    pub async fn commit(&self, board_id: &str, command: &dyn Command) -> KanbanResult<bool> {
        self.require_session()?;
        let board = self.current_board(board_id).await?;
        let next = command.execute(&board)?;
        tracing::debug!("{}", command.description());

        match persist(&self.cache, self.api.as_ref(), board_id, next).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_unauthorized() => Err(e),
            Err(e) => {
                tracing::warn!("{} failed: {}", command.description(), e);
                Ok(false)
            }
        }
    }

    /// Drag end. No drop target or a drop onto itself does nothing.
    pub async fn drag_end(
        &self,
        board_id: &str,
        active_id: &str,
        over_id: Option<&str>,
    ) -> KanbanResult<bool> {
        let Some(over_id) = over_id else {
            return Ok(false);
        };
        if active_id == over_id {
            return Ok(false);
        }
        let command = MoveCard {
            card_id: active_id.to_string(),
            target_id: over_id.to_string(),
        };
        self.commit(board_id, &command).await
    }

    pub async fn rename_column(
        &self,
        board_id: &str,
        column_id: &str,
        title: &str,
    ) -> KanbanResult<bool> {
        let command = RenameColumn {
            column_id: column_id.to_string(),
            title: title.to_string(),
        };
        self.commit(board_id, &command).await
    }

    /// Returns the new card's id when the backend accepted it.
    pub async fn add_card(
        &self,
        board_id: &str,
        column_id: &str,
        title: &str,
        details: &str,
    ) -> KanbanResult<Option<CardId>> {
        let command = AddCard::new(column_id, title, details);
        let saved = self.commit(board_id, &command).await?;
        Ok(saved.then_some(command.card_id))
    }

    pub async fn delete_card(
        &self,
        board_id: &str,
        column_id: &str,
        card_id: &str,
    ) -> KanbanResult<bool> {
        let command = DeleteCard {
            column_id: column_id.to_string(),
            card_id: card_id.to_string(),
        };
        self.commit(board_id, &command).await
    }

    /// Narrow single-field update. Not optimistic: the cached board only
    /// changes once the backend has answered, and is refetched on next read.
    pub async fn assign_card(
        &self,
        board_id: &str,
        card_id: &str,
        username: Option<String>,
    ) -> KanbanResult<Card> {
        self.require_session()?;
        let card = self.api.assign_card(board_id, card_id, username).await?;
        let key = QueryKey::Board(board_id.to_string());
        if let Some(board) = self.cache.get_board(board_id) {
            self.cache
                .set(key.clone(), QueryData::Board(set_assignee(&board, &card)));
        }
        self.cache.invalidate(&key);
        Ok(card)
    }

    // Members

    pub async fn members(&self, board_id: &str) -> KanbanResult<Vec<Member>> {
        self.require_session()?;
        let key = QueryKey::Members(board_id.to_string());
        if let Some(QueryData::Members(members)) = self.cache.get_fresh(&key) {
            return Ok(members);
        }
        let api = self.api.as_ref();
        let members = with_retry(self.retry, move || api.list_members(board_id)).await?;
        self.cache.set(key, QueryData::Members(members.clone()));
        Ok(members)
    }

    pub async fn invite_member(&self, board_id: &str, username: &str) -> KanbanResult<Member> {
        self.require_session()?;
        let username = username.trim();
        if username.is_empty() {
            return Err(KanbanError::Validation("username is required".into()));
        }
        let member = self.api.invite_member(board_id, username).await?;
        self.cache.invalidate(&QueryKey::Members(board_id.to_string()));
        Ok(member)
    }

    pub async fn remove_member(&self, board_id: &str, username: &str) -> KanbanResult<()> {
        self.require_session()?;
        self.api.remove_member(board_id, username).await?;
        self.cache.invalidate(&QueryKey::Members(board_id.to_string()));
        Ok(())
    }

    pub fn is_owner(&self, board: &BoardSummary) -> bool {
        self.session
            .username()
            .is_some_and(|name| board.is_owned_by(&name))
    }

    // Chat

    /// Sends `text` to the assistant with the transcript and the active board.
    ///
    /// Returns the assistant's reply, or `None` when nothing was sent or the
    /// request failed (the inline chat error is set in that case).
    pub async fn send_chat(&self, text: &str) -> KanbanResult<Option<ChatMessage>> {
        let text = text.trim();
        if text.is_empty() || self.chat.is_loading() {
            return Ok(None);
        }
        let Some((board_id, board)) = self.active_board_data().await? else {
            return Ok(None);
        };

        let user_message = ChatMessage::user(text);
        let mut messages = self.chat.messages();
        messages.push(user_message.clone());

        self.chat.set_error(None);
        self.chat.set_loading(true);
        let result = self.exchange(user_message, messages, board, &board_id).await;
        self.chat.set_loading(false);

        match result {
            Ok(reply) => Ok(Some(reply)),
            Err(e) if e.is_unauthorized() => Err(e),
            Err(e) => {
                tracing::warn!("Chat request failed: {}", e);
                self.chat.set_error(Some(CHAT_ERROR_MESSAGE.to_string()));
                Ok(None)
            }
        }
    }

    async fn exchange(
        &self,
        user_message: ChatMessage,
        messages: Vec<ChatMessage>,
        board: BoardData,
        board_id: &str,
    ) -> KanbanResult<ChatMessage> {
        let request = ChatRequest {
            messages,
            board,
            board_id: board_id.to_string(),
        };
        let response = self.api.send_chat(&request).await?;

        let reply = ChatMessage::assistant(response.message);
        self.chat.add_message(user_message);
        self.chat.add_message(reply.clone());

        if let Some(update) = response.board_update {
            persist(&self.cache, self.api.as_ref(), board_id, update).await?;
        }
        Ok(reply)
    }
}
