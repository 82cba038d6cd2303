use crate::context::CliContext;
use crate::output;
use serde_json::json;

/// One-shot exchange. The transcript lives only for this invocation.
pub async fn handle(ctx: &CliContext, message: &str) -> anyhow::Result<()> {
    let workspace = &ctx.workspace;
    match workspace.send_chat(message).await? {
        Some(reply) => {
            output::output_success(json!({
                "reply": reply.content,
                "board_id": workspace.active_board().get(),
            }));
        }
        None => {
            let error = workspace
                .chat()
                .error()
                .unwrap_or_else(|| "Nothing to send: empty message or no board selected".into());
            anyhow::bail!(error);
        }
    }
    Ok(())
}
