use clap::Subcommand;
use monday_core::MondayClient;

use super::print_json;

#[derive(Debug, Clone, Subcommand)]
pub enum GroupsCommand {
    /// List the groups of a board.
    List {
        #[arg(long)]
        board: String,
    },
    /// Add a group to a board.
    Create {
        #[arg(long)]
        board: String,
        #[arg(long)]
        name: String,
    },
    /// Delete a group and its items.
    Delete {
        #[arg(long)]
        board: String,
        #[arg(long)]
        group: String,
    },
}

impl GroupsCommand {
    pub async fn run(self, client: &MondayClient) -> anyhow::Result<()> {
        match self {
            Self::List { board } => print_json(&client.list_groups(&board).await?),
            Self::Create { board, name } => print_json(&client.create_group(&board, &name).await?),
            Self::Delete { board, group } => {
                print_json(&client.delete_group(&board, &group).await?)
            }
        }
    }
}
