use crate::cli::MemberAction;
use crate::context::CliContext;
use crate::output;
use kanban_domain::Member;
use serde::Serialize;
use serde_json::json;

#[derive(Serialize)]
struct MemberListItem {
    #[serde(flatten)]
    member: Member,
    owner: bool,
}

pub async fn handle(ctx: &CliContext, action: MemberAction) -> anyhow::Result<()> {
    let workspace = &ctx.workspace;
    match action {
        MemberAction::List { board_id } => {
            let board_id = ctx.board_id(board_id).await?;
            let summary = workspace
                .boards()
                .await?
                .into_iter()
                .find(|b| b.id == board_id);
            let members = workspace.members(&board_id).await?;
            let items = members
                .into_iter()
                .map(|member| MemberListItem {
                    owner: summary.as_ref().is_some_and(|s| member.is_owner_of(s)),
                    member,
                })
                .collect();
            output::output_list(items);
        }
        MemberAction::Invite { board_id, username } => {
            let board_id = ctx.board_id(board_id).await?;
            let member = workspace.invite_member(&board_id, &username).await?;
            output::output_success(&member);
        }
        MemberAction::Remove { board_id, username } => {
            let board_id = ctx.board_id(board_id).await?;
            workspace.remove_member(&board_id, &username).await?;
            output::output_success(json!({ "removed": username }));
        }
    }
    Ok(())
}
