use clap::{Args, Subcommand};
use monday_core::{ColumnType, MondayClient};
use serde_json::Value;

use super::{ColumnInputs, parse_json, print_json};

#[derive(Debug, Clone, Subcommand)]
pub enum ColumnsCommand {
    /// List the columns of a board.
    List {
        #[arg(long)]
        board: String,
        /// Leave out archived and computed columns.
        #[arg(long)]
        writable_only: bool,
    },
    /// Add a column to a board.
    Create(CreateColumnArgs),
    /// Print the column values a set of inputs translates to, without writing them.
    Preview {
        #[arg(long)]
        board: String,
        /// JSON array of column inputs.
        #[arg(long)]
        columns: ColumnInputs,
    },
}

#[derive(Debug, Clone, Args)]
pub struct CreateColumnArgs {
    #[arg(long)]
    pub board: String,
    #[arg(long)]
    pub title: String,
    /// Column type tag, e.g. `status` or `date`.
    #[arg(long = "type")]
    pub column_type: ColumnType,
    /// JSON settings for the column, such as status labels.
    #[arg(long, value_parser = parse_json)]
    pub defaults: Option<Value>,
}

impl ColumnsCommand {
    pub async fn run(self, client: &MondayClient) -> anyhow::Result<()> {
        match self {
            Self::List {
                board,
                writable_only,
            } => print_json(&client.list_columns(&board, writable_only).await?),
            Self::Create(args) => {
                let column = client
                    .create_column(
                        &args.board,
                        &args.title,
                        &args.column_type,
                        args.defaults.as_ref(),
                    )
                    .await?;
                print_json(&column)
            }
            Self::Preview { board, columns } => {
                print_json(&client.process_column_values(&board, &columns.0).await?)
            }
        }
    }
}
