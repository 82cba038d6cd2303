use assert_cmd::Command;
use axum::extract::{Path as UrlPath, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use kanban_domain::{BoardData, BoardSummary, Card, Column};
use predicates::prelude::*;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::{tempdir, TempDir};

const TOKEN: &str = "cli-token";

#[derive(Default)]
struct FakeBackend {
    boards: Vec<BoardSummary>,
    data: HashMap<String, BoardData>,
    next_id: usize,
}

type Shared = Arc<Mutex<FakeBackend>>;

fn authorized(headers: &HeaderMap) -> Result<(), StatusCode> {
    let expected = format!("Bearer {}", TOKEN);
    match headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

async fn login(Json(body): Json<Value>) -> Result<Json<Value>, StatusCode> {
    if body["password"] == "password" {
        Ok(Json(json!({ "token": TOKEN, "user_id": "u-1", "username": body["username"] })))
    } else {
        Err(StatusCode::UNAUTHORIZED)
    }
}

async fn logout() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn list_boards(
    State(backend): State<Shared>,
    headers: HeaderMap,
) -> Result<Json<Vec<BoardSummary>>, StatusCode> {
    authorized(&headers)?;
    Ok(Json(backend.lock().unwrap().boards.clone()))
}

async fn create_board(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<BoardSummary>, StatusCode> {
    authorized(&headers)?;
    let mut backend = backend.lock().unwrap();
    backend.next_id += 1;
    let summary = BoardSummary {
        id: format!("board-{}", backend.next_id),
        title: body["title"].as_str().unwrap_or_default().to_string(),
        owner_username: "user".into(),
    };
    let board = BoardData::new(
        vec![
            Column::new("col-todo", "To Do").with_cards(["card-1"]),
            Column::new("col-done", "Done"),
        ],
        [Card::new("card-1".into(), "Write docs".into(), String::new())],
    );
    backend.data.insert(summary.id.clone(), board);
    backend.boards.push(summary.clone());
    Ok(Json(summary))
}

async fn fetch_board(
    State(backend): State<Shared>,
    headers: HeaderMap,
    UrlPath(id): UrlPath<String>,
) -> Result<Json<BoardData>, StatusCode> {
    authorized(&headers)?;
    let backend = backend.lock().unwrap();
    backend.data.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_board(
    State(backend): State<Shared>,
    headers: HeaderMap,
    UrlPath(id): UrlPath<String>,
    Json(board): Json<BoardData>,
) -> Result<Json<BoardData>, StatusCode> {
    authorized(&headers)?;
    backend.lock().unwrap().data.insert(id, board.clone());
    Ok(Json(board))
}

/// Starts the fake backend on its own runtime thread and returns its base URL.
fn spawn_backend() -> String {
    let backend: Shared = Arc::default();
    let app = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/boards", get(list_boards).post(create_board))
        .route("/api/boards/{id}", get(fetch_board).patch(update_board))
        .with_state(backend);

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let addr = listener.local_addr().unwrap();
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            axum::serve(listener, app).await.unwrap();
        });
    });
    format!("http://{}", addr)
}

fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Isolated home: config and state both live under the temp dir.
fn home() -> TempDir {
    let dir = tempdir().unwrap();
    let config_dir = dir.path().join("config/kanban");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "query_retries = 0\n").unwrap();
    dir
}

fn kanban(home: &Path, api_url: &str) -> Command {
    let mut cmd = Command::cargo_bin("kanban").unwrap();
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("KANBAN_STATE_DIR", home.join("state"))
        .env("KANBAN_API_URL", api_url)
        .env_remove("KANBAN_DEBUG_LOG")
        .env_remove("KANBAN_PASSWORD");
    cmd
}

fn parse_json_output(output: &[u8]) -> Value {
    serde_json::from_slice(output).expect("Failed to parse JSON output")
}

fn run_ok(home: &Path, api_url: &str, args: &[&str]) -> Value {
    let output = kanban(home, api_url)
        .args(args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json = parse_json_output(&output);
    assert!(json["success"].as_bool().unwrap());
    json
}

fn run_err(home: &Path, api_url: &str, args: &[&str]) -> Value {
    let output = kanban(home, api_url)
        .args(args)
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();
    let json = parse_json_output(&output);
    assert!(!json["success"].as_bool().unwrap());
    json
}

fn signed_in(api_url: &str) -> TempDir {
    let home = home();
    run_ok(
        home.path(),
        api_url,
        &["login", "--username", "user", "--password", "password"],
    );
    home
}

mod general_tests {
    use super::*;

    #[test]
    fn test_help() {
        Command::cargo_bin("kanban")
            .unwrap()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("board"))
            .stdout(predicate::str::contains("chat"));
    }

    #[test]
    fn test_completions() {
        Command::cargo_bin("kanban")
            .unwrap()
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("kanban"));
    }

    #[test]
    fn test_signed_out_commands_are_unauthorized() {
        let home = home();
        let json = run_err(home.path(), &closed_port_url(), &["board", "list"]);
        assert_eq!(json["error"], "Unauthorized");
    }

    #[test]
    fn test_whoami_signed_out() {
        let home = home();
        let json = run_err(home.path(), &closed_port_url(), &["whoami"]);
        assert_eq!(json["error"], "Not signed in");
    }
}

mod auth_tests {
    use super::*;

    #[test]
    fn test_login_persists_session() {
        let api = spawn_backend();
        let home = signed_in(&api);

        let json = run_ok(home.path(), &api, &["whoami"]);
        assert_eq!(json["data"]["username"], "user");
        assert!(home.path().join("state/state.json").exists());
    }

    #[test]
    fn test_wrong_password() {
        let api = spawn_backend();
        let home = home();
        let json = run_err(
            home.path(),
            &api,
            &["login", "--username", "user", "--password", "nope"],
        );
        assert_eq!(json["error"], "Unauthorized");
    }

    #[test]
    fn test_logout_forgets_session() {
        let api = spawn_backend();
        let home = signed_in(&api);

        run_ok(home.path(), &api, &["logout"]);
        run_err(home.path(), &api, &["whoami"]);
    }

    #[test]
    fn test_rejected_token_signs_out() {
        let api = spawn_backend();
        let home = home();
        let state_dir = home.path().join("state");
        std::fs::create_dir_all(&state_dir).unwrap();
        std::fs::write(
            state_dir.join("state.json"),
            r#"{"session":{"token":"expired","username":"user"}}"#,
        )
        .unwrap();

        let json = run_err(home.path(), &api, &["board", "list"]);
        assert_eq!(json["error"], "Unauthorized");
        run_err(home.path(), &api, &["whoami"]);
    }

    #[test]
    fn test_network_error() {
        let home = home();
        let state_dir = home.path().join("state");
        std::fs::create_dir_all(&state_dir).unwrap();
        std::fs::write(
            state_dir.join("state.json"),
            r#"{"session":{"token":"cli-token","username":"user"}}"#,
        )
        .unwrap();

        let json = run_err(home.path(), &closed_port_url(), &["board", "list"]);
        assert!(json["error"].as_str().unwrap().contains("Network error"));
    }
}

mod board_tests {
    use super::*;

    #[test]
    fn test_create_selects_first_board() {
        let api = spawn_backend();
        let home = signed_in(&api);

        let created = run_ok(home.path(), &api, &["board", "create", "--title", "Roadmap"]);
        assert_eq!(created["data"]["title"], "Roadmap");

        let list = run_ok(home.path(), &api, &["board", "list"]);
        assert_eq!(list["data"]["count"], 1);
        assert_eq!(list["data"]["items"][0]["active"], true);
        assert_eq!(list["data"]["items"][0]["owned"], true);
    }

    #[test]
    fn test_select_unknown_board() {
        let api = spawn_backend();
        let home = signed_in(&api);

        let json = run_err(home.path(), &api, &["board", "select", "--id", "missing"]);
        assert_eq!(json["error"], "Board not found: missing");
    }

    #[test]
    fn test_failed_command_keeps_reselected_board() {
        let api = spawn_backend();
        let home = signed_in(&api);
        run_ok(home.path(), &api, &["board", "create", "--title", "Roadmap"]);

        let state_path = home.path().join("state/state.json");
        let mut state: Value =
            serde_json::from_str(&std::fs::read_to_string(&state_path).unwrap()).unwrap();
        state["active_board_id"] = json!("gone");
        std::fs::write(&state_path, state.to_string()).unwrap();

        // The fake backend has no chat endpoint, so the exchange fails after
        // the stale selection was replaced
        let json = run_err(home.path(), &api, &["chat", "--message", "hello"]);
        assert_eq!(json["error"], "Failed to get a response. Please try again.");

        let whoami = run_ok(home.path(), &api, &["whoami"]);
        assert_eq!(whoami["data"]["active_board_id"], "board-1");
    }

    #[test]
    fn test_get_resolves_cards_in_order() {
        let api = spawn_backend();
        let home = signed_in(&api);
        run_ok(home.path(), &api, &["board", "create", "--title", "Roadmap"]);

        let json = run_ok(home.path(), &api, &["board", "get"]);
        assert_eq!(json["data"]["columns"][0]["title"], "To Do");
        assert_eq!(json["data"]["columns"][0]["cards"][0]["title"], "Write docs");
    }
}

mod card_tests {
    use super::*;

    fn with_board() -> (String, TempDir) {
        let api = spawn_backend();
        let home = signed_in(&api);
        run_ok(home.path(), &api, &["board", "create", "--title", "Roadmap"]);
        (api, home)
    }

    #[test]
    fn test_add_card_with_default_details() {
        let (api, home) = with_board();

        let json = run_ok(
            home.path(),
            &api,
            &["card", "add", "--column-id", "col-done", "--title", "Ship"],
        );
        assert_eq!(json["data"]["title"], "Ship");
        assert_eq!(json["data"]["details"], "No details yet.");
        assert!(json["data"]["id"].as_str().unwrap().starts_with("card-"));
    }

    #[test]
    fn test_move_card_to_column() {
        let (api, home) = with_board();

        let json = run_ok(
            home.path(),
            &api,
            &["card", "move", "--card-id", "card-1", "--target-id", "col-done"],
        );
        assert_eq!(json["data"]["column_id"], "col-done");
        assert_eq!(json["data"]["position"], 0);

        let board = run_ok(home.path(), &api, &["board", "get"]);
        assert!(board["data"]["columns"][0]["cards"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_move_unknown_card() {
        let (api, home) = with_board();
        let json = run_err(
            home.path(),
            &api,
            &["card", "move", "--card-id", "ghost", "--target-id", "col-done"],
        );
        assert!(json["error"].as_str().unwrap().contains("ghost"));
    }

    #[test]
    fn test_rename_column() {
        let (api, home) = with_board();
        let json = run_ok(
            home.path(),
            &api,
            &["column", "rename", "--column-id", "col-todo", "--title", "Backlog"],
        );
        assert_eq!(json["data"]["title"], "Backlog");
        assert_eq!(json["data"]["cardIds"][0], "card-1");
    }
}
