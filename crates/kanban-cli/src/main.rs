mod cli;
mod context;
mod handlers;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("KANBAN_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::WARN)
            .init();
    }

    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "kanban", &mut std::io::stdout());
        return Ok(());
    }

    let ctx = match CliContext::load(&cli).await {
        Ok(ctx) => ctx,
        Err(e) => output::output_error(&format!("{:#}", e)),
    };

    let result = handlers::dispatch(&ctx, cli.command).await;

    // A 401 during the command signs the user out; that has to stick
    if let Err(e) = ctx.save().await {
        tracing::warn!("Failed to save client state: {}", e);
    }

    if let Err(e) = result {
        output::output_error(&format!("{:#}", e));
    }
    Ok(())
}
