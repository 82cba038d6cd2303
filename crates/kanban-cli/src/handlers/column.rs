use super::rejected;
use crate::cli::ColumnAction;
use crate::context::CliContext;
use crate::output;

pub async fn handle(ctx: &CliContext, action: ColumnAction) -> anyhow::Result<()> {
    match action {
        ColumnAction::Rename {
            board_id,
            column_id,
            title,
        } => {
            let board_id = ctx.board_id(board_id).await?;
            if !ctx
                .workspace
                .rename_column(&board_id, &column_id, &title)
                .await?
            {
                return Err(rejected("Column rename"));
            }
            let board = ctx.workspace.current_board(&board_id).await?;
            match board.column(&column_id) {
                Some(column) => output::output_success(column),
                None => anyhow::bail!("Column not found: {}", column_id),
            }
        }
    }
    Ok(())
}
