use clap::{Args, Subcommand};
use monday_core::MondayClient;
use serde_json::Value;

use super::{ColumnInputs, parse_json, print_json};

#[derive(Debug, Clone, Subcommand)]
pub enum ItemsCommand {
    /// List the items of a board, or of one group.
    List {
        #[arg(long)]
        board: String,
        #[arg(long)]
        group: Option<String>,
    },
    /// Fetch items by id.
    Get {
        #[arg(long = "id", required = true, value_delimiter = ',')]
        ids: Vec<String>,
    },
    /// Find the items whose column holds a value.
    Search {
        #[arg(long)]
        board: String,
        #[arg(long)]
        column: String,
        #[arg(long)]
        value: String,
    },
    /// Create an item with its column values.
    Create(CreateItemArgs),
    /// Set several column values of an item.
    Update {
        #[arg(long)]
        board: String,
        #[arg(long)]
        item: String,
        /// JSON array of column inputs.
        #[arg(long)]
        columns: ColumnInputs,
    },
    /// Set one column to a raw JSON value.
    SetValue {
        #[arg(long)]
        board: String,
        #[arg(long)]
        item: String,
        #[arg(long)]
        column: String,
        #[arg(long, value_parser = parse_json)]
        value: Value,
    },
    /// Move an item to another group.
    Move {
        #[arg(long)]
        item: String,
        #[arg(long)]
        group: String,
    },
    /// Delete an item.
    Delete {
        #[arg(long)]
        item: String,
    },
    /// Post an update on an item.
    Comment {
        #[arg(long)]
        item: String,
        #[arg(long)]
        body: String,
    },
}

#[derive(Debug, Clone, Args)]
pub struct CreateItemArgs {
    #[arg(long)]
    pub board: String,
    /// Group to create the item in; the board's top group when omitted.
    #[arg(long)]
    pub group: Option<String>,
    #[arg(long)]
    pub name: String,
    /// JSON array of column inputs.
    #[arg(long, default_value = "[]")]
    pub columns: ColumnInputs,
}

impl ItemsCommand {
    pub async fn run(self, client: &MondayClient) -> anyhow::Result<()> {
        match self {
            Self::List { board, group } => {
                print_json(&client.list_items(&board, group.as_deref()).await?)
            }
            Self::Get { ids } => print_json(&client.get_items(&ids).await?),
            Self::Search {
                board,
                column,
                value,
            } => print_json(&client.items_by_column_value(&board, &column, &value).await?),
            Self::Create(args) => {
                let created = client
                    .create_item(&args.board, args.group.as_deref(), &args.name, &args.columns.0)
                    .await?;
                print_json(&created)
            }
            Self::Update {
                board,
                item,
                columns,
            } => {
                let updated = client
                    .change_multiple_column_values(&board, &item, &columns.0)
                    .await?;
                print_json(&updated)
            }
            Self::SetValue {
                board,
                item,
                column,
                value,
            } => {
                let updated = client
                    .change_column_value(&board, &item, &column, &value)
                    .await?;
                print_json(&updated)
            }
            Self::Move { item, group } => {
                print_json(&client.move_item_to_group(&item, &group).await?)
            }
            Self::Delete { item } => print_json(&client.delete_item(&item).await?),
            Self::Comment { item, body } => print_json(&client.add_update(&item, &body).await?),
        }
    }
}
