//! User-entered column fields.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ColumnType;

/// The fields a user fills in to set one column.
///
/// Only the fields relevant to the column's type are read; the rest are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserColumnInput {
    /// Column to set.
    pub column_id: String,
    /// Explicit type, taking priority over the type defined on the board.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_type: Option<ColumnType>,
    /// Raw value for plain and unrecognized column types.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkbox_value: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub people_value: Option<IdList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teams_value: Option<IdList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline_to: Option<String>,
    /// Time of day as `HH:MM`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hour_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Comma-separated dropdown labels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropdown_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_value: Option<String>,
    /// Country as `"<dial code> <ISO code>"`, e.g. `"+1 US"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub file_links: Vec<FileLink>,
    /// Linked item ids for board relation and dependency columns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board_relation_value: Option<IdList>,
}

impl UserColumnInput {
    /// Creates an input for the given column with no fields set.
    pub fn new(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            ..Default::default()
        }
    }

    /// Sets the explicit column type.
    pub fn with_type(mut self, column_type: impl Into<ColumnType>) -> Self {
        self.column_type = Some(column_type.into());
        self
    }

    /// Sets the raw column value.
    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.column_value = Some(value.into());
        self
    }
}

/// An external file attached to a file column by link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileLink {
    pub link_to_file: String,
    #[serde(default)]
    pub name: String,
}

/// A list of ids given either as an array or as one comma-separated string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdList {
    Many(Vec<Value>),
    Joined(String),
}

impl IdList {
    /// Returns the trimmed, non-empty ids in their original order.
    pub fn ids(&self) -> Vec<String> {
        let raw: Vec<String> = match self {
            Self::Many(values) => values
                .iter()
                .map(|value| match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect(),
            Self::Joined(joined) => joined.split(',').map(str::to_owned).collect(),
        };

        raw.into_iter()
            .map(|id| id.trim().to_owned())
            .filter(|id| !id.is_empty())
            .collect()
    }
}

impl From<&str> for IdList {
    fn from(joined: &str) -> Self {
        Self::Joined(joined.to_owned())
    }
}
