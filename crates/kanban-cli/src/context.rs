use crate::cli::Cli;
use anyhow::Context as _;
use kanban_client::{BoardWorkspace, PersistedState, StateFile};
use kanban_core::{ClientConfig, KanbanResult};
use kanban_domain::BoardId;

/// One CLI invocation: the workspace plus the state file it was loaded from.
pub struct CliContext {
    pub workspace: BoardWorkspace,
    state_file: StateFile,
}

impl CliContext {
    pub async fn load(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = ClientConfig::load();
        if let Some(url) = &cli.api_url {
            config = config.with_api_base_url(url.clone());
        }
        if let Some(dir) = &cli.state_dir {
            config = config.with_state_dir(dir.clone());
        }

        let state_file = StateFile::in_dir(config.effective_state_dir());
        let state = state_file
            .load()
            .await
            .with_context(|| format!("failed to read {}", state_file.path().display()))?;
        let (session, active_board) = state.into_stores();
        let workspace = BoardWorkspace::connect(&config, session, active_board)?;

        Ok(Self {
            workspace,
            state_file,
        })
    }

    /// Writes the session and board selection back, including a sign-out
    /// caused by a rejected token.
    pub async fn save(&self) -> KanbanResult<()> {
        let state =
            PersistedState::capture(self.workspace.session(), self.workspace.active_board());
        self.state_file.save(&state).await
    }

    /// Explicit `--board-id`, or the selected board.
    pub async fn board_id(&self, explicit: Option<String>) -> anyhow::Result<BoardId> {
        if let Some(id) = explicit {
            return Ok(id);
        }
        self.workspace
            .ensure_active_board()
            .await?
            .ok_or_else(|| {
                anyhow::anyhow!("No board selected. Create one with `kanban board create`")
            })
    }
}
