//! In-process fake of the kanban backend for integration tests.

#![allow(dead_code)]

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};
use kanban_domain::{BoardData, BoardSummary, Card, Column, Member};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

pub const TOKEN: &str = "tok-1";
pub const USERNAME: &str = "user";
pub const PASSWORD: &str = "password";

#[derive(Debug, Default)]
pub struct Backend {
    pub boards: Vec<BoardSummary>,
    pub data: HashMap<String, BoardData>,
    pub members: HashMap<String, Vec<Member>>,
    /// Status returned for board PATCH requests instead of saving
    pub fail_updates: Option<u16>,
    /// Status returned for every board GET
    pub fail_fetches: Option<u16>,
    pub chat_update: Option<BoardData>,
    pub fail_chat: bool,
    pub updates: Vec<BoardData>,
    pub chat_requests: Vec<Value>,
    pub board_fetches: usize,
    next_id: usize,
}

impl Backend {
    pub fn with_board(mut self, id: &str, title: &str, board: BoardData) -> Self {
        self.boards.push(BoardSummary {
            id: id.to_string(),
            title: title.to_string(),
            owner_username: USERNAME.to_string(),
        });
        self.data.insert(id.to_string(), board);
        self
    }
}

pub type Shared = Arc<Mutex<Backend>>;

pub struct FakeServer {
    pub base_url: String,
    pub backend: Shared,
}

pub fn sample_board() -> BoardData {
    BoardData::new(
        vec![
            Column::new("col-todo", "To Do").with_cards(["card-1", "card-2"]),
            Column::new("col-done", "Done").with_cards(["card-3"]),
        ],
        [
            Card::new("card-1".into(), "Write docs".into(), String::new()),
            Card::new("card-2".into(), "Fix login".into(), String::new()),
            Card::new("card-3".into(), "Set up CI".into(), String::new()),
        ],
    )
}

pub async fn spawn(backend: Backend) -> FakeServer {
    let backend = Arc::new(Mutex::new(backend));
    let app = router(backend.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake backend");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    FakeServer {
        base_url: format!("http://{}", addr),
        backend,
    }
}

fn router(backend: Shared) -> Router {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/boards", get(list_boards).post(create_board))
        .route(
            "/api/boards/{id}",
            get(fetch_board)
                .patch(update_board)
                .delete(delete_board),
        )
        .route(
            "/api/boards/{id}/members",
            get(list_members).post(invite_member),
        )
        .route("/api/boards/{id}/members/{username}", delete(remove_member))
        .route("/api/boards/{id}/cards/{card_id}/assignee", patch(assign_card))
        .route("/api/chat", post(chat))
        .with_state(backend)
}

fn authorized(headers: &HeaderMap) -> Result<(), StatusCode> {
    let expected = format!("Bearer {}", TOKEN);
    match headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    {
        Some(value) if value == expected => Ok(()),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

fn status(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

async fn login(Json(body): Json<Value>) -> Result<Json<Value>, StatusCode> {
    if body["username"] == USERNAME && body["password"] == PASSWORD {
        Ok(Json(json!({ "token": TOKEN, "user_id": "u-1", "username": USERNAME })))
    } else {
        Err(StatusCode::UNAUTHORIZED)
    }
}

async fn logout(headers: HeaderMap) -> Result<StatusCode, StatusCode> {
    authorized(&headers)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_boards(
    State(backend): State<Shared>,
    headers: HeaderMap,
) -> Result<Json<Vec<BoardSummary>>, StatusCode> {
    authorized(&headers)?;
    Ok(Json(backend.lock().boards.clone()))
}

async fn create_board(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<BoardSummary>, StatusCode> {
    authorized(&headers)?;
    let title = body["title"].as_str().ok_or(StatusCode::BAD_REQUEST)?;
    let mut backend = backend.lock();
    backend.next_id += 1;
    let summary = BoardSummary {
        id: format!("board-{}", backend.next_id),
        title: title.to_string(),
        owner_username: USERNAME.to_string(),
    };
    backend.boards.push(summary.clone());
    backend.data.insert(
        summary.id.clone(),
        BoardData::new(vec![Column::new("col-todo", "To Do")], []),
    );
    Ok(Json(summary))
}

async fn delete_board(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    authorized(&headers)?;
    let mut backend = backend.lock();
    backend.data.remove(&id).ok_or(StatusCode::NOT_FOUND)?;
    backend.boards.retain(|b| b.id != id);
    Ok(StatusCode::NO_CONTENT)
}

async fn fetch_board(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<BoardData>, StatusCode> {
    authorized(&headers)?;
    let mut backend = backend.lock();
    backend.board_fetches += 1;
    if let Some(code) = backend.fail_fetches {
        return Err(status(code));
    }
    backend.data.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_board(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(board): Json<BoardData>,
) -> Result<Json<BoardData>, StatusCode> {
    authorized(&headers)?;
    let mut backend = backend.lock();
    if let Some(code) = backend.fail_updates {
        return Err(status(code));
    }
    if !backend.data.contains_key(&id) {
        return Err(StatusCode::NOT_FOUND);
    }
    backend.updates.push(board.clone());
    backend.data.insert(id, board.clone());
    Ok(Json(board))
}

async fn list_members(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Vec<Member>>, StatusCode> {
    authorized(&headers)?;
    Ok(Json(backend.lock().members.get(&id).cloned().unwrap_or_default()))
}

async fn invite_member(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Member>, StatusCode> {
    authorized(&headers)?;
    let username = body["username"].as_str().ok_or(StatusCode::BAD_REQUEST)?;
    let mut backend = backend.lock();
    let members = backend.members.entry(id).or_default();
    if members.iter().any(|m| m.username == username) {
        return Err(StatusCode::CONFLICT);
    }
    let member = Member {
        user_id: format!("u-{}", username),
        username: username.to_string(),
    };
    members.push(member.clone());
    Ok(Json(member))
}

async fn remove_member(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Path((id, username)): Path<(String, String)>,
) -> Result<StatusCode, StatusCode> {
    authorized(&headers)?;
    if let Some(members) = backend.lock().members.get_mut(&id) {
        members.retain(|m| m.username != username);
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn assign_card(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Path((id, card_id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Result<Json<Card>, StatusCode> {
    authorized(&headers)?;
    let mut backend = backend.lock();
    let card = backend
        .data
        .get_mut(&id)
        .and_then(|board| board.cards.get_mut(&card_id))
        .ok_or(StatusCode::NOT_FOUND)?;
    card.assigned_to = body["username"].as_str().map(String::from);
    Ok(Json(card.clone()))
}

async fn chat(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    authorized(&headers)?;
    let mut backend = backend.lock();
    backend.chat_requests.push(body);
    if backend.fail_chat {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    Ok(Json(json!({
        "message": "Done.",
        "board_update": backend.chat_update.clone(),
    })))
}
