//! Subcommands of the `monday` binary.
//!
//! API commands print their result as pretty JSON on stdout.

mod boards;
mod columns;
mod groups;
mod items;
mod options;
mod query;
mod webhook;

use std::io::{self, Write};
use std::str::FromStr;

use anyhow::Context;
use clap::Subcommand;
use monday_core::UserColumnInput;
use serde::Serialize;
use serde_json::Value;

pub use self::boards::BoardsCommand;
pub use self::columns::ColumnsCommand;
pub use self::groups::GroupsCommand;
pub use self::items::ItemsCommand;
pub use self::options::OptionsCommand;
pub use self::query::QueryArgs;
pub use self::webhook::WebhookCommand;
use crate::config::ApiConfig;

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show the account the API token belongs to.
    Me,
    /// Create, inspect and archive boards.
    #[command(subcommand)]
    Boards(BoardsCommand),
    /// List and create board columns.
    #[command(subcommand)]
    Columns(ColumnsCommand),
    /// List, create and delete groups.
    #[command(subcommand)]
    Groups(GroupsCommand),
    /// Work with items and their column values.
    #[command(subcommand)]
    Items(ItemsCommand),
    /// Print name/value pairs for selection lists.
    #[command(subcommand)]
    Options(OptionsCommand),
    /// Send a raw GraphQL document and print the classified response.
    Query(QueryArgs),
    /// Receive monday.com webhook events.
    #[command(subcommand)]
    Webhook(WebhookCommand),
}

impl Command {
    /// Runs the command.
    pub async fn run(self, api: &ApiConfig) -> anyhow::Result<()> {
        match self {
            Self::Me => {
                let client = api.create_client()?;
                print_json(&client.verify_credentials().await?)
            }
            Self::Boards(command) => command.run(&api.create_client()?).await,
            Self::Columns(command) => command.run(&api.create_client()?).await,
            Self::Groups(command) => command.run(&api.create_client()?).await,
            Self::Items(command) => command.run(&api.create_client()?).await,
            Self::Options(command) => command.run(&api.create_client()?).await,
            Self::Query(args) => args.run(&api.create_client()?).await,
            Self::Webhook(command) => command.run().await,
        }
    }
}

/// Writes `value` to stdout as pretty JSON.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value).context("failed to serialize output")?;
    writeln!(stdout).context("failed to write output")?;
    Ok(())
}

/// Parses a JSON argument.
pub(crate) fn parse_json(raw: &str) -> serde_json::Result<Value> {
    serde_json::from_str(raw)
}

/// Column inputs given as a JSON array on the command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnInputs(pub Vec<UserColumnInput>);

impl FromStr for ColumnInputs {
    type Err = serde_json::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(raw).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use monday_core::ColumnType;

    use super::*;

    #[test]
    fn column_inputs_parse_from_json() {
        let inputs: ColumnInputs =
            r#"[{"columnId":"status","columnType":"color","statusLabel":"Done"}]"#
                .parse()
                .unwrap();

        assert_eq!(inputs.0.len(), 1);
        assert_eq!(inputs.0[0].column_id, "status");
        assert_eq!(inputs.0[0].column_type, Some(ColumnType::Status));
        assert_eq!(inputs.0[0].status_label.as_deref(), Some("Done"));
    }

    #[test]
    fn column_inputs_reject_non_arrays() {
        assert!("{\"columnId\":\"status\"}".parse::<ColumnInputs>().is_err());
    }
}
