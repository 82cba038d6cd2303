use crate::context::CliContext;
use crate::output;
use serde_json::json;

pub async fn login(ctx: &CliContext, username: &str, password: &str) -> anyhow::Result<()> {
    ctx.workspace.login(username, password).await?;
    let active_board_id = ctx.workspace.ensure_active_board().await?;
    let session = ctx.workspace.session().get();
    output::output_success(json!({
        "username": session.username,
        "user_id": session.user_id,
        "active_board_id": active_board_id,
    }));
    Ok(())
}

pub async fn logout(ctx: &CliContext) -> anyhow::Result<()> {
    ctx.workspace.logout().await?;
    ctx.workspace.active_board().clear();
    output::output_success(json!({ "signed_out": true }));
    Ok(())
}

pub async fn whoami(ctx: &CliContext) -> anyhow::Result<()> {
    let session = ctx.workspace.session().get();
    if session.token.is_none() {
        anyhow::bail!("Not signed in");
    }
    output::output_success(json!({
        "username": session.username,
        "user_id": session.user_id,
        "active_board_id": ctx.workspace.active_board().get(),
    }));
    Ok(())
}
