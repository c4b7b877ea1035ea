//! Entities returned by the monday.com API.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use strum::{AsRefStr, Display, EnumString};

use crate::column::ColumnType;

/// Visibility of a board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BoardKind {
    #[default]
    Public,
    Private,
    Share,
}

/// The user an API key belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub board_kind: Option<BoardKind>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub archived: Option<bool>,
}

/// The current value of one column on an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnValue {
    pub id: String,
    /// Display text as rendered by monday.com.
    #[serde(default)]
    pub text: Option<String>,
    /// JSON-encoded raw value.
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default, rename = "type")]
    pub column_type: Option<ColumnType>,
}

impl ColumnValue {
    /// Parses the raw value, if any.
    pub fn parsed_value(&self) -> Option<Value> {
        self.value
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub group: Option<GroupRef>,
    #[serde(default)]
    pub column_values: Vec<ColumnValue>,
}

/// Identifier returned by mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceId {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
}

/// A `{name, value}` pair offered to a user picking from a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOption {
    pub name: String,
    pub value: String,
}

macro_rules! entity_ref {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name {
            #[serde(deserialize_with = "id_string")]
            pub id: String,
            #[serde(alias = "title")]
            pub name: String,
        }

        impl From<$name> for SearchOption {
            fn from(entity: $name) -> Self {
                Self {
                    name: entity.name,
                    value: entity.id,
                }
            }
        }
    };
}

entity_ref!(
    /// Board id and name.
    BoardRef
);
entity_ref!(
    /// Group id and title.
    GroupRef
);
entity_ref!(
    /// Item id and name.
    ItemRef
);

impl From<&Board> for BoardRef {
    fn from(board: &Board) -> Self {
        Self {
            id: board.id.clone(),
            name: board.name.clone(),
        }
    }
}

impl From<&Group> for GroupRef {
    fn from(group: &Group) -> Self {
        Self {
            id: group.id.clone(),
            name: group.title.clone(),
        }
    }
}

impl From<&Item> for ItemRef {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
        }
    }
}

/// Accepts ids sent either as strings or as numbers.
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn ids_accept_numbers_and_strings() {
        let account: Account =
            serde_json::from_value(json!({ "id": 42, "name": "Ada", "email": "ada@x.io" }))
                .unwrap();
        assert_eq!(account.id, "42");

        let board: Board = serde_json::from_value(json!({
            "id": "7", "name": "Roadmap", "board_kind": "private"
        }))
        .unwrap();
        assert_eq!(board.id, "7");
        assert_eq!(board.board_kind, Some(BoardKind::Private));
    }

    #[test]
    fn item_group_reads_title_as_name() {
        let item: Item = serde_json::from_value(json!({
            "id": "9",
            "name": "Task",
            "group": { "id": "topics", "title": "Topics" },
            "column_values": [
                { "id": "status", "text": "Done", "value": "{\"index\":1}", "type": "status" }
            ]
        }))
        .unwrap();

        assert_eq!(item.group.unwrap().name, "Topics");
        assert_eq!(item.column_values[0].column_type, Some(ColumnType::Status));
        assert_eq!(
            item.column_values[0].parsed_value(),
            Some(json!({ "index": 1 }))
        );
    }

    #[test]
    fn refs_become_search_options() {
        let board = Board {
            id: "1".to_owned(),
            name: "Roadmap".to_owned(),
            description: None,
            state: None,
            board_kind: None,
        };

        let option = SearchOption::from(BoardRef::from(&board));
        assert_eq!(option.name, "Roadmap");
        assert_eq!(option.value, "1");
    }
}
