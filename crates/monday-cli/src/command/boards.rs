use clap::{Args, Subcommand};
use monday_core::MondayClient;
use monday_core::types::BoardKind;

use super::print_json;

#[derive(Debug, Clone, Subcommand)]
pub enum BoardsCommand {
    /// List every board visible to the account.
    List,
    /// Show one board.
    Get {
        #[arg(long)]
        board: String,
    },
    /// Create a board.
    Create(CreateBoardArgs),
    /// Archive a board.
    Archive {
        #[arg(long)]
        board: String,
    },
}

#[derive(Debug, Clone, Args)]
pub struct CreateBoardArgs {
    #[arg(long)]
    pub name: String,
    /// public, private or share
    #[arg(long, default_value_t = BoardKind::Public)]
    pub kind: BoardKind,
    /// Board to copy the structure from.
    #[arg(long)]
    pub template: Option<String>,
}

impl BoardsCommand {
    pub async fn run(self, client: &MondayClient) -> anyhow::Result<()> {
        match self {
            Self::List => print_json(&client.list_boards().await?),
            Self::Get { board } => print_json(&client.get_board(&board).await?),
            Self::Create(args) => {
                let created = client
                    .create_board(&args.name, args.kind, args.template.as_deref())
                    .await?;
                print_json(&created)
            }
            Self::Archive { board } => print_json(&client.archive_board(&board).await?),
        }
    }
}
