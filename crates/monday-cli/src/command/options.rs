use clap::Subcommand;
use monday_core::MondayClient;

use super::print_json;

/// Name/value pairs for populating selection lists.
#[derive(Debug, Clone, Subcommand)]
pub enum OptionsCommand {
    Boards,
    Groups {
        #[arg(long)]
        board: String,
    },
    Columns {
        #[arg(long)]
        board: String,
    },
    Items {
        #[arg(long)]
        board: String,
    },
}

impl OptionsCommand {
    pub async fn run(self, client: &MondayClient) -> anyhow::Result<()> {
        let options = match self {
            Self::Boards => client.board_options().await?,
            Self::Groups { board } => client.group_options(&board).await?,
            Self::Columns { board } => client.column_options(&board).await?,
            Self::Items { board } => client.item_options(&board).await?,
        };

        print_json(&options)
    }
}
