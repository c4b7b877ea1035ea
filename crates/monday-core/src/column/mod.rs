//! Board columns and the translation of user input into column values.
//!
//! - [`ColumnType`]: the closed set of column type tags monday.com reports
//! - [`ColumnDefinition`]: a column as fetched from a board
//! - [`UserColumnInput`]: the form fields a user fills in for one column
//! - [`ColumnDispatcher`]: turns inputs into a [`ColumnValues`] mapping

mod dispatch;
mod input;
mod value;

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use dispatch::{ColumnDispatcher, ColumnValues};
pub use input::{FileLink, IdList, UserColumnInput};

/// Tracing target for column value processing.
pub const TRACING_TARGET: &str = "monday_core::column";

/// Type tag of a board column.
///
/// Tags monday.com reports that are not listed here parse into
/// [`ColumnType::Other`] and are written through the passthrough branch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColumnType {
    Text,
    Simple,
    ObjectValue,
    Status,
    Checkbox,
    Date,
    Dropdown,
    People,
    Location,
    Link,
    Email,
    Phone,
    Timeline,
    Hour,
    BoardRelation,
    Dependency,
    File,
    Subtasks,
    Formula,
    AutoNumber,
    CreationLog,
    LastUpdated,
    Mirror,
    /// Any tag without a dedicated builder.
    Other(String),
}

impl ColumnType {
    /// Parses a tag, accepting the legacy aliases monday.com still reports.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "text" => Self::Text,
            "simple" => Self::Simple,
            "objectValue" => Self::ObjectValue,
            "status" | "color" => Self::Status,
            "checkbox" | "boolean" => Self::Checkbox,
            "date" => Self::Date,
            "dropdown" => Self::Dropdown,
            "people" | "multiple-person" => Self::People,
            "location" => Self::Location,
            "link" => Self::Link,
            "email" => Self::Email,
            "phone" => Self::Phone,
            "timeline" | "timerange" => Self::Timeline,
            "hour" => Self::Hour,
            "board_relation" | "connect_boards" => Self::BoardRelation,
            "dependency" => Self::Dependency,
            "file" | "fileLink" => Self::File,
            "subtasks" => Self::Subtasks,
            "formula" => Self::Formula,
            "auto_number" => Self::AutoNumber,
            "creation_log" | "pulse-log" => Self::CreationLog,
            "last_updated" | "pulse-updated" => Self::LastUpdated,
            "mirror" | "lookup" => Self::Mirror,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Returns the canonical tag as monday.com spells it.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Simple => "simple",
            Self::ObjectValue => "objectValue",
            Self::Status => "status",
            Self::Checkbox => "checkbox",
            Self::Date => "date",
            Self::Dropdown => "dropdown",
            Self::People => "people",
            Self::Location => "location",
            Self::Link => "link",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Timeline => "timeline",
            Self::Hour => "hour",
            Self::BoardRelation => "board_relation",
            Self::Dependency => "dependency",
            Self::File => "file",
            Self::Subtasks => "subtasks",
            Self::Formula => "formula",
            Self::AutoNumber => "auto_number",
            Self::CreationLog => "creation_log",
            Self::LastUpdated => "last_updated",
            Self::Mirror => "mirror",
            Self::Other(tag) => tag,
        }
    }

    /// Returns whether values of this type can be set through a mutation.
    ///
    /// Read-only types are computed by monday.com itself.
    #[must_use]
    pub const fn is_writable(&self) -> bool {
        !matches!(
            self,
            Self::Subtasks
                | Self::Formula
                | Self::AutoNumber
                | Self::CreationLog
                | Self::LastUpdated
                | Self::Mirror
        )
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = Infallible;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(tag))
    }
}

impl From<String> for ColumnType {
    fn from(tag: String) -> Self {
        Self::parse(&tag)
    }
}

impl From<&str> for ColumnType {
    fn from(tag: &str) -> Self {
        Self::parse(tag)
    }
}

impl From<ColumnType> for String {
    fn from(column_type: ColumnType) -> Self {
        column_type.as_str().to_owned()
    }
}

/// A column as defined on a board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    /// Column identifier, unique within its board.
    pub id: String,
    /// Human-readable column title.
    pub title: String,
    /// Column type tag.
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    /// Type-specific settings as a JSON string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings_str: Option<String>,
    /// Whether the column has been archived.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

impl ColumnDefinition {
    /// Creates a new column definition.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        column_type: impl Into<ColumnType>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            column_type: column_type.into(),
            settings_str: None,
            archived: None,
        }
    }
}
