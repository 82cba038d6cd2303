use super::{
    AssignCardRequest, ChatRequest, ChatResponse, CreateBoardRequest, InviteMemberRequest,
    KanbanApi, LoginRequest, LoginResponse, RequestOptions,
};
use crate::cache::QueryCache;
use crate::state::SessionStore;
use async_trait::async_trait;
use kanban_core::{ClientConfig, KanbanError, KanbanResult};
use kanban_domain::{BoardData, BoardSummary, Card, Member};
use reqwest::{header, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// reqwest-backed implementation of [`KanbanApi`].
///
/// Shares the session store and query cache with the rest of the client so a
/// 401 anywhere signs the user out and drops every cached query.
#[derive(Debug, Clone)]
pub struct HttpKanbanApi {
    client: reqwest::Client,
    base_url: Url,
    session: SessionStore,
    cache: QueryCache,
}

impl HttpKanbanApi {
    pub fn new(
        config: &ClientConfig,
        session: SessionStore,
        cache: QueryCache,
    ) -> KanbanResult<Self> {
        let base_url = Url::parse(config.api_base_url_trimmed()).map_err(|e| {
            KanbanError::Validation(format!("invalid api url {}: {}", config.api_base_url, e))
        })?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| KanbanError::Internal(e.to_string()))?;
        Ok(Self {
            client,
            base_url,
            session,
            cache,
        })
    }

    /// `/api/<segments...>` under the base URL, with each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> KanbanResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                KanbanError::Validation(format!("api url cannot be a base: {}", self.base_url))
            })?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, segments: &[&str], options: RequestOptions) -> KanbanResult<Response> {
        let url = self.endpoint(segments)?;
        tracing::debug!("{} {}", options.method, url.path());

        let mut request = self.client.request(options.method, url);
        if options.auth {
            if let Some(token) = self.session.token() {
                request = request.bearer_auth(token);
            }
        }
        if let Some(body) = options.body {
            request = request
                .header(header::CONTENT_TYPE, "application/json")
                .body(body.to_string());
        }

        let response = request
            .send()
            .await
            .map_err(|e| KanbanError::Network(e.to_string()))?;
        self.check_status(response)
    }

    fn check_status(&self, response: Response) -> KanbanResult<Response> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("Backend rejected credentials, signing out");
            self.session.clear();
            self.cache.invalidate_all();
            return Err(KanbanError::Unauthorized);
        }
        if !status.is_success() {
            return Err(KanbanError::RequestFailed {
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        options: RequestOptions,
    ) -> KanbanResult<T> {
        let response = self.send(segments, options).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| KanbanError::Network(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| KanbanError::Serialization(e.to_string()))
    }

    async fn send_empty(&self, segments: &[&str], options: RequestOptions) -> KanbanResult<()> {
        self.send(segments, options).await.map(|_| ())
    }
}

#[async_trait]
impl KanbanApi for HttpKanbanApi {
    async fn login(&self, username: &str, password: &str) -> KanbanResult<LoginResponse> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.send_json(&["auth", "login"], RequestOptions::post(&body)?.public())
            .await
    }

    async fn logout(&self) -> KanbanResult<()> {
        self.send_empty(&["auth", "logout"], RequestOptions::post_empty())
            .await
    }

    async fn list_boards(&self) -> KanbanResult<Vec<BoardSummary>> {
        self.send_json(&["boards"], RequestOptions::get()).await
    }

    async fn create_board(&self, title: &str) -> KanbanResult<BoardSummary> {
        let body = CreateBoardRequest {
            title: title.to_string(),
        };
        self.send_json(&["boards"], RequestOptions::post(&body)?).await
    }

    async fn delete_board(&self, board_id: &str) -> KanbanResult<()> {
        self.send_empty(&["boards", board_id], RequestOptions::delete())
            .await
    }

    async fn fetch_board(&self, board_id: &str) -> KanbanResult<BoardData> {
        self.send_json(&["boards", board_id], RequestOptions::get())
            .await
    }

    async fn update_board(&self, board_id: &str, board: &BoardData) -> KanbanResult<BoardData> {
        self.send_json(&["boards", board_id], RequestOptions::patch(board)?)
            .await
    }

    async fn list_members(&self, board_id: &str) -> KanbanResult<Vec<Member>> {
        self.send_json(&["boards", board_id, "members"], RequestOptions::get())
            .await
    }

    async fn invite_member(&self, board_id: &str, username: &str) -> KanbanResult<Member> {
        let body = InviteMemberRequest {
            username: username.to_string(),
        };
        self.send_json(&["boards", board_id, "members"], RequestOptions::post(&body)?)
            .await
    }

    async fn remove_member(&self, board_id: &str, username: &str) -> KanbanResult<()> {
        self.send_empty(
            &["boards", board_id, "members", username],
            RequestOptions::delete(),
        )
        .await
    }

    async fn assign_card(
        &self,
        board_id: &str,
        card_id: &str,
        username: Option<String>,
    ) -> KanbanResult<Card> {
        let body = AssignCardRequest { username };
        self.send_json(
            &["boards", board_id, "cards", card_id, "assignee"],
            RequestOptions::patch(&body)?,
        )
        .await
    }

    async fn send_chat(&self, request: &ChatRequest) -> KanbanResult<ChatResponse> {
        self.send_json(&["chat"], RequestOptions::post(request)?).await
    }
}
