pub mod auth;
pub mod board;
pub mod card;
pub mod chat;
pub mod column;
pub mod member;

use crate::cli::Commands;
use crate::context::CliContext;

pub async fn dispatch(ctx: &CliContext, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Login { username, password } => auth::login(ctx, &username, &password).await,
        Commands::Logout => auth::logout(ctx).await,
        Commands::Whoami => auth::whoami(ctx).await,
        Commands::Board(board_cmd) => board::handle(ctx, board_cmd.action).await,
        Commands::Column(column_cmd) => column::handle(ctx, column_cmd.action).await,
        Commands::Card(card_cmd) => card::handle(ctx, card_cmd.action).await,
        Commands::Member(member_cmd) => member::handle(ctx, member_cmd.action).await,
        Commands::Chat { message } => chat::handle(ctx, &message).await,
        // Handled before a context is built
        Commands::Completions { .. } => Ok(()),
    }
}

/// Error for a board mutation the backend rejected. The local copy has been
/// rolled back by the time this is reported.
pub(crate) fn rejected(action: &str) -> anyhow::Error {
    anyhow::anyhow!("{} was not saved; the board was left unchanged", action)
}
