use super::rejected;
use crate::cli::CardAction;
use crate::context::CliContext;
use crate::output;
use serde_json::json;

pub async fn handle(ctx: &CliContext, action: CardAction) -> anyhow::Result<()> {
    let workspace = &ctx.workspace;
    match action {
        CardAction::Add {
            board_id,
            column_id,
            title,
            details,
        } => {
            let board_id = ctx.board_id(board_id).await?;
            let details = details.unwrap_or_default();
            let Some(card_id) = workspace
                .add_card(&board_id, &column_id, &title, &details)
                .await?
            else {
                return Err(rejected("New card"));
            };
            let board = workspace.current_board(&board_id).await?;
            match board.card(&card_id) {
                Some(card) => output::output_success(card),
                None => output::output_success(json!({ "id": card_id })),
            }
        }
        CardAction::Delete {
            board_id,
            column_id,
            card_id,
        } => {
            let board_id = ctx.board_id(board_id).await?;
            if !workspace
                .delete_card(&board_id, &column_id, &card_id)
                .await?
            {
                return Err(rejected("Card deletion"));
            }
            output::output_success(json!({ "deleted": card_id }));
        }
        CardAction::Move {
            board_id,
            card_id,
            target_id,
        } => {
            let board_id = ctx.board_id(board_id).await?;
            if !workspace
                .drag_end(&board_id, &card_id, Some(target_id.as_str()))
                .await?
            {
                if card_id == target_id {
                    return Err(anyhow::anyhow!("A card cannot be moved onto itself"));
                }
                return Err(rejected("Card move"));
            }
            let board = workspace.current_board(&board_id).await?;
            let column = board.column_of(&card_id).map(|c| c.id.clone());
            let position = board
                .column_of(&card_id)
                .and_then(|c| c.position_of(&card_id));
            output::output_success(json!({
                "id": card_id,
                "column_id": column,
                "position": position,
            }));
        }
        CardAction::Assign {
            board_id,
            card_id,
            username,
        } => {
            let board_id = ctx.board_id(board_id).await?;
            let card = workspace
                .assign_card(&board_id, &card_id, username)
                .await?;
            output::output_success(&card);
        }
    }
    Ok(())
}
