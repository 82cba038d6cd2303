use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kanban")]
#[command(about = "Command-line client for a shared kanban board service", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Backend base URL (or set KANBAN_API_URL)
    #[arg(long, global = true, env = "KANBAN_API_URL")]
    pub api_url: Option<String>,

    /// Directory holding the saved session (or set KANBAN_STATE_DIR)
    #[arg(long, global = true, env = "KANBAN_STATE_DIR")]
    pub state_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and remember the session
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "KANBAN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign out and forget the session
    Logout,
    /// Show the signed-in user and the selected board
    Whoami,
    /// Board operations
    Board(BoardCommand),
    /// Column operations
    Column(ColumnCommand),
    /// Card operations
    Card(CardCommand),
    /// Board membership
    Member(MemberCommand),
    /// Ask the assistant about the selected board
    Chat {
        #[arg(long)]
        message: String,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// Board commands
#[derive(Args)]
pub struct BoardCommand {
    #[command(subcommand)]
    pub action: BoardAction,
}

#[derive(Subcommand)]
pub enum BoardAction {
    /// List boards you own or belong to
    List,
    /// Create a new board
    Create {
        #[arg(long)]
        title: String,
    },
    /// Show a board's columns and cards (defaults to the selected board)
    Get {
        #[arg(long)]
        id: Option<String>,
    },
    /// Delete a board
    Delete {
        #[arg(long)]
        id: String,
    },
    /// Make a board the selected one
    Select {
        #[arg(long)]
        id: String,
    },
}

// Column commands
#[derive(Args)]
pub struct ColumnCommand {
    #[command(subcommand)]
    pub action: ColumnAction,
}

#[derive(Subcommand)]
pub enum ColumnAction {
    /// Rename a column
    Rename {
        #[arg(long)]
        board_id: Option<String>,
        #[arg(long)]
        column_id: String,
        #[arg(long)]
        title: String,
    },
}

// Card commands
#[derive(Args)]
pub struct CardCommand {
    #[command(subcommand)]
    pub action: CardAction,
}

#[derive(Subcommand)]
pub enum CardAction {
    /// Add a card at the end of a column
    Add {
        #[arg(long)]
        board_id: Option<String>,
        #[arg(long)]
        column_id: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        details: Option<String>,
    },
    /// Delete a card
    Delete {
        #[arg(long)]
        board_id: Option<String>,
        #[arg(long)]
        column_id: String,
        #[arg(long)]
        card_id: String,
    },
    /// Move a card onto another card or to the end of a column
    Move {
        #[arg(long)]
        board_id: Option<String>,
        #[arg(long)]
        card_id: String,
        /// Card to drop onto, or a column id to append to
        #[arg(long)]
        target_id: String,
    },
    /// Assign a card to a member, or clear the assignee
    Assign {
        #[arg(long)]
        board_id: Option<String>,
        #[arg(long)]
        card_id: String,
        #[arg(long)]
        username: Option<String>,
    },
}

// Member commands
#[derive(Args)]
pub struct MemberCommand {
    #[command(subcommand)]
    pub action: MemberAction,
}

#[derive(Subcommand)]
pub enum MemberAction {
    /// List a board's members
    List {
        #[arg(long)]
        board_id: Option<String>,
    },
    /// Invite a user by username (owner only)
    Invite {
        #[arg(long)]
        board_id: Option<String>,
        #[arg(long)]
        username: String,
    },
    /// Remove a member (owner only)
    Remove {
        #[arg(long)]
        board_id: Option<String>,
        #[arg(long)]
        username: String,
    },
}
