use crate::cli::BoardAction;
use crate::context::CliContext;
use crate::output;
use kanban_domain::{BoardData, BoardSummary, Card};
use serde::Serialize;
use serde_json::json;

#[derive(Serialize)]
struct BoardListItem {
    #[serde(flatten)]
    summary: BoardSummary,
    active: bool,
    owned: bool,
}

#[derive(Serialize)]
pub(crate) struct ColumnView<'a> {
    id: &'a str,
    title: &'a str,
    cards: Vec<&'a Card>,
}

#[derive(Serialize)]
pub(crate) struct BoardView<'a> {
    id: &'a str,
    columns: Vec<ColumnView<'a>>,
}

/// Board with each column's cards resolved in display order.
pub(crate) fn board_view<'a>(id: &'a str, board: &'a BoardData) -> BoardView<'a> {
    BoardView {
        id,
        columns: board
            .columns
            .iter()
            .map(|column| ColumnView {
                id: &column.id,
                title: &column.title,
                cards: board.cards_in(&column.id),
            })
            .collect(),
    }
}

pub async fn handle(ctx: &CliContext, action: BoardAction) -> anyhow::Result<()> {
    let workspace = &ctx.workspace;
    match action {
        BoardAction::List => {
            let boards = workspace.boards().await?;
            let active = workspace.active_board().reconcile(&boards);
            let items = boards
                .into_iter()
                .map(|summary| BoardListItem {
                    active: active.as_deref() == Some(summary.id.as_str()),
                    owned: workspace.is_owner(&summary),
                    summary,
                })
                .collect();
            output::output_list(items);
        }
        BoardAction::Create { title } => {
            let summary = workspace.create_board(&title).await?;
            // First board becomes the selection
            workspace.ensure_active_board().await?;
            output::output_success(&summary);
        }
        BoardAction::Get { id } => {
            let id = ctx.board_id(id).await?;
            let board = workspace.board(&id).await?;
            output::output_success(board_view(&id, &board));
        }
        BoardAction::Delete { id } => {
            workspace.delete_board(&id).await?;
            output::output_success(json!({
                "deleted": id,
                "active_board_id": workspace.active_board().get(),
            }));
        }
        BoardAction::Select { id } => {
            let boards = workspace.boards().await?;
            match boards.into_iter().find(|b| b.id == id) {
                Some(summary) => {
                    workspace.select_board(&summary.id);
                    output::output_success(&summary);
                }
                None => anyhow::bail!("Board not found: {}", id),
            }
        }
    }
    Ok(())
}
