//! The monday.com operations a workflow node exposes.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::column::{ColumnDefinition, ColumnDispatcher, ColumnType, ColumnValues, UserColumnInput};
use crate::graphql::{Classification, GraphqlRequest, classify, decode_data, query};
use crate::pagination::PageWalker;
use crate::provider::{ApiKey, ConfigSource, MondayTransport};
use crate::types::{
    Account, Board, BoardKind, BoardRef, Group, GroupRef, Item, ItemRef, ResourceId, SearchOption,
};
use crate::{Error, ErrorKind, Result, TRACING_TARGET};

#[derive(serde::Deserialize)]
struct BoardColumns {
    #[serde(default)]
    columns: Vec<ColumnDefinition>,
}

#[derive(serde::Deserialize)]
struct BoardGroups {
    #[serde(default)]
    groups: Vec<Group>,
}

#[derive(serde::Deserialize)]
struct BoardItems {
    #[serde(default)]
    items: Vec<Item>,
}

#[derive(serde::Deserialize)]
struct BoardGroupItems {
    #[serde(default)]
    groups: Vec<BoardItems>,
}

/// Client for the monday.com GraphQL API.
///
/// Every operation is one or more sequential calls through the injected
/// [`MondayTransport`]. Responses carrying an `errors` payload surface as
/// [`ErrorKind::ApiError`]; responses missing the expected nested fields as
/// [`ErrorKind::UpstreamShape`].
#[derive(Clone)]
pub struct MondayClient {
    transport: Arc<dyn MondayTransport>,
    api_key: ApiKey,
    walker: PageWalker,
}

impl fmt::Debug for MondayClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MondayClient")
            .field("api_key", &self.api_key)
            .field("walker", &self.walker)
            .finish_non_exhaustive()
    }
}

impl MondayClient {
    /// Creates a client over a transport.
    pub fn new<T>(transport: T, api_key: ApiKey) -> Self
    where
        T: MondayTransport + 'static,
    {
        Self::from_arc(Arc::new(transport), api_key)
    }

    /// Creates a client over a shared transport.
    pub fn from_arc(transport: Arc<dyn MondayTransport>, api_key: ApiKey) -> Self {
        Self {
            transport,
            api_key,
            walker: PageWalker::default(),
        }
    }

    /// Creates a client with the API token read from host configuration.
    pub fn from_source<T>(transport: T, source: &dyn ConfigSource) -> Result<Self>
    where
        T: MondayTransport + 'static,
    {
        Ok(Self::new(transport, ApiKey::from_source(source)?))
    }

    /// Replaces the pagination settings used by list operations.
    #[must_use]
    pub fn with_page_walker(mut self, walker: PageWalker) -> Self {
        self.walker = walker;
        self
    }

    pub fn page_walker(&self) -> PageWalker {
        self.walker
    }

    async fn send(&self, request: &GraphqlRequest) -> Result<String> {
        tracing::debug!(
            target: TRACING_TARGET,
            operation = request.operation(),
            "Sending request"
        );

        self.transport.execute(&self.api_key, request).await
    }

    /// Sends a request and classifies the raw reply without decoding it.
    pub async fn execute_raw(&self, request: &GraphqlRequest) -> Result<Classification> {
        let raw = self.send(request).await?;
        Ok(classify(&raw))
    }

    /// Sends a request and decodes the top-level field named by its operation.
    async fn fetch<T>(&self, request: &GraphqlRequest) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let operation = request.operation();
        let raw = self.send(request).await?;

        let mut data: Map<String, Value> = decode_data(&raw).inspect_err(|error| {
            if error.kind == ErrorKind::ApiError {
                tracing::warn!(
                    target: TRACING_TARGET,
                    operation,
                    error = %error,
                    "API returned an error payload"
                );
            }
        })?;

        let field = data
            .remove(operation)
            .filter(|value| !value.is_null())
            .ok_or_else(|| {
                Error::upstream_shape()
                    .with_message(format!("response has no '{operation}' field"))
                    .with_context(raw.clone())
            })?;

        serde_json::from_value(field).map_err(|err| {
            Error::upstream_shape()
                .with_message(format!("unexpected '{operation}' shape"))
                .with_context(raw.clone())
                .with_source(err)
        })
    }

    /// Sends a mutation and decodes its result.
    async fn mutate<T>(&self, request: &GraphqlRequest) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let result = self.fetch(request).await?;

        tracing::info!(
            target: TRACING_TARGET,
            operation = request.operation(),
            "Mutation applied"
        );

        Ok(result)
    }

    /// Fetches a query returning `boards` and keeps the single requested board.
    async fn fetch_board<T>(&self, board_id: &str, request: &GraphqlRequest) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let boards: Vec<T> = self.fetch(request).await?;
        boards.into_iter().next().ok_or_else(|| {
            Error::upstream_shape().with_message(format!("board '{board_id}' was not found"))
        })
    }

    /// Checks the API token by fetching the account it belongs to.
    pub async fn verify_credentials(&self) -> Result<Account> {
        self.fetch(&query::me()).await
    }

    pub async fn get_board(&self, board_id: &str) -> Result<Board> {
        self.fetch_board(board_id, &query::board(board_id)).await
    }

    /// Lists every board visible to the account.
    pub async fn list_boards(&self) -> Result<Vec<Board>> {
        let limit = self.walker.page_size();
        self.walker
            .collect(|page| async move {
                self.fetch::<Vec<Board>>(&query::boards_page(limit, page))
                    .await
            })
            .await
    }

    pub async fn create_board(
        &self,
        name: &str,
        kind: BoardKind,
        template_id: Option<&str>,
    ) -> Result<ResourceId> {
        self.mutate(&query::create_board(name, kind, template_id))
            .await
    }

    pub async fn archive_board(&self, board_id: &str) -> Result<ResourceId> {
        self.mutate(&query::archive_board(board_id)).await
    }

    /// Lists the columns of a board.
    ///
    /// With `writable_only`, archived columns and columns that cannot be
    /// written are left out.
    pub async fn list_columns(
        &self,
        board_id: &str,
        writable_only: bool,
    ) -> Result<Vec<ColumnDefinition>> {
        let board: BoardColumns = self
            .fetch_board(board_id, &query::board_columns(board_id))
            .await?;

        let columns = board
            .columns
            .into_iter()
            .filter(|column| {
                !writable_only
                    || (column.column_type.is_writable() && column.archived != Some(true))
            })
            .collect();

        Ok(columns)
    }

    /// Adds a column; `defaults` holds type-specific settings such as labels.
    pub async fn create_column(
        &self,
        board_id: &str,
        title: &str,
        column_type: &ColumnType,
        defaults: Option<&Value>,
    ) -> Result<ColumnDefinition> {
        let defaults = defaults.map(Value::to_string);
        let request =
            query::create_column(board_id, title, column_type.as_str(), defaults.as_deref());

        self.mutate(&request).await
    }

    pub async fn list_groups(&self, board_id: &str) -> Result<Vec<Group>> {
        let board: BoardGroups = self
            .fetch_board(board_id, &query::board_groups(board_id))
            .await?;

        Ok(board.groups)
    }

    pub async fn create_group(&self, board_id: &str, group_name: &str) -> Result<ResourceId> {
        self.mutate(&query::create_group(board_id, group_name))
            .await
    }

    pub async fn delete_group(&self, board_id: &str, group_id: &str) -> Result<ResourceId> {
        self.mutate(&query::delete_group(board_id, group_id)).await
    }

    /// Fetches items by id.
    pub async fn get_items(&self, item_ids: &[String]) -> Result<Vec<Item>> {
        if item_ids.is_empty() {
            return Ok(Vec::new());
        }

        self.fetch(&query::items(item_ids)).await
    }

    /// Lists every item on a board, or in one of its groups.
    pub async fn list_items(&self, board_id: &str, group_id: Option<&str>) -> Result<Vec<Item>> {
        let limit = self.walker.page_size();

        self.walker
            .collect(|page| async move {
                match group_id {
                    None => {
                        let request = query::board_items_page(board_id, limit, page);
                        let board: BoardItems = self.fetch_board(board_id, &request).await?;
                        Ok::<_, Error>(board.items)
                    }
                    Some(group_id) => {
                        let request = query::group_items_page(board_id, group_id, limit, page);
                        let board: BoardGroupItems = self.fetch_board(board_id, &request).await?;
                        let group = board.groups.into_iter().next().ok_or_else(|| {
                            Error::upstream_shape()
                                .with_message(format!("group '{group_id}' was not found"))
                        })?;
                        Ok::<_, Error>(group.items)
                    }
                }
            })
            .await
    }

    /// Lists every item on a board whose column holds the given value.
    pub async fn items_by_column_value(
        &self,
        board_id: &str,
        column_id: &str,
        column_value: &str,
    ) -> Result<Vec<Item>> {
        let limit = self.walker.page_size();

        self.walker
            .collect(|page| async move {
                let request = query::items_by_column_value_page(
                    board_id,
                    column_id,
                    column_value,
                    limit,
                    page,
                );
                self.fetch::<Vec<Item>>(&request).await
            })
            .await
    }

    /// Translates user inputs into the column values of a board.
    ///
    /// Empty input returns an empty mapping without calling the API;
    /// otherwise the board's columns are fetched once to resolve types.
    pub async fn process_column_values(
        &self,
        board_id: &str,
        inputs: &[UserColumnInput],
    ) -> Result<ColumnValues> {
        if inputs.is_empty() {
            return Ok(ColumnValues::new());
        }

        let columns = self.list_columns(board_id, false).await?;
        let values = ColumnDispatcher::new(&columns).build(inputs)?;

        tracing::debug!(
            target: TRACING_TARGET,
            board_id,
            inputs = inputs.len(),
            values = values.len(),
            "Processed column values"
        );

        Ok(values)
    }

    /// Creates an item with its column values set from user inputs.
    pub async fn create_item(
        &self,
        board_id: &str,
        group_id: Option<&str>,
        item_name: &str,
        inputs: &[UserColumnInput],
    ) -> Result<ResourceId> {
        let values = self.process_column_values(board_id, inputs).await?;
        self.mutate(&query::create_item(board_id, group_id, item_name, &values))
            .await
    }

    /// Sets one column to a raw value, sent as-is.
    pub async fn change_column_value(
        &self,
        board_id: &str,
        item_id: &str,
        column_id: &str,
        value: &Value,
    ) -> Result<ResourceId> {
        let value = value.to_string();
        self.mutate(&query::change_column_value(
            board_id, item_id, column_id, &value,
        ))
        .await
    }

    /// Sets several columns from user inputs in one mutation.
    pub async fn change_multiple_column_values(
        &self,
        board_id: &str,
        item_id: &str,
        inputs: &[UserColumnInput],
    ) -> Result<ResourceId> {
        let values = self.process_column_values(board_id, inputs).await?;
        self.mutate(&query::change_multiple_column_values(
            board_id, item_id, &values,
        ))
        .await
    }

    pub async fn move_item_to_group(&self, item_id: &str, group_id: &str) -> Result<ResourceId> {
        self.mutate(&query::move_item_to_group(item_id, group_id))
            .await
    }

    pub async fn delete_item(&self, item_id: &str) -> Result<ResourceId> {
        self.mutate(&query::delete_item(item_id)).await
    }

    /// Posts an update (comment) on an item.
    pub async fn add_update(&self, item_id: &str, body: &str) -> Result<ResourceId> {
        self.mutate(&query::create_update(item_id, body)).await
    }

    /// Boards offered for selection.
    pub async fn board_options(&self) -> Result<Vec<SearchOption>> {
        let boards = self.list_boards().await?;
        Ok(boards
            .iter()
            .map(|board| BoardRef::from(board).into())
            .collect())
    }

    pub async fn group_options(&self, board_id: &str) -> Result<Vec<SearchOption>> {
        let groups = self.list_groups(board_id).await?;
        Ok(groups
            .iter()
            .map(|group| GroupRef::from(group).into())
            .collect())
    }

    /// Columns offered for selection, titled by their display name.
    pub async fn column_options(&self, board_id: &str) -> Result<Vec<SearchOption>> {
        let columns = self.list_columns(board_id, false).await?;
        Ok(columns
            .into_iter()
            .map(|column| SearchOption {
                name: column.title,
                value: column.id,
            })
            .collect())
    }

    pub async fn item_options(&self, board_id: &str) -> Result<Vec<SearchOption>> {
        let items = self.list_items(board_id, None).await?;
        Ok(items
            .iter()
            .map(|item| ItemRef::from(item).into())
            .collect())
    }
}
