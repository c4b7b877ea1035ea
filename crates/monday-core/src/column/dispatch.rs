//! Column type resolution and dispatch.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{ColumnDefinition, ColumnType, TRACING_TARGET, UserColumnInput, value};
use crate::Result;

/// Column id to column value, in input order.
///
/// Sent to the API as one JSON-encoded string argument.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnValues(Map<String, Value>);

impl ColumnValues {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of a column, replacing any earlier one.
    pub fn insert(&mut self, column_id: impl Into<String>, value: Value) {
        self.0.insert(column_id.into(), value);
    }

    /// Removes a column, keeping the order of the others.
    pub fn remove(&mut self, column_id: &str) -> Option<Value> {
        self.0.shift_remove(column_id)
    }

    pub fn get(&self, column_id: &str) -> Option<&Value> {
        self.0.get(column_id)
    }

    pub fn contains(&self, column_id: &str) -> bool {
        self.0.contains_key(column_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Encodes the mapping the way mutations expect it.
    pub fn to_json_string(&self) -> String {
        Value::Object(self.0.clone()).to_string()
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for ColumnValues {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Translates user inputs into column values for one board.
#[derive(Debug, Clone, Default)]
pub struct ColumnDispatcher {
    column_types: HashMap<String, ColumnType>,
}

impl ColumnDispatcher {
    /// Creates a dispatcher from the columns defined on the target board.
    pub fn new<'a>(columns: impl IntoIterator<Item = &'a ColumnDefinition>) -> Self {
        let column_types = columns
            .into_iter()
            .map(|column| (column.id.clone(), column.column_type.clone()))
            .collect();

        Self { column_types }
    }

    /// Returns the type an input is written as.
    ///
    /// An explicit override wins over the board's definition; inputs that
    /// match neither are treated as plain values.
    pub fn resolve(&self, input: &UserColumnInput) -> ColumnType {
        input
            .column_type
            .clone()
            .or_else(|| self.column_types.get(&input.column_id).cloned())
            .unwrap_or(ColumnType::Simple)
    }

    /// Builds the column values for a set of inputs.
    ///
    /// Columns without a meaningful value are left out so the mutation does
    /// not clear what is already stored. When a column id repeats, the last
    /// input decides, including a last input that carries no value.
    pub fn build<'a>(
        &self,
        inputs: impl IntoIterator<Item = &'a UserColumnInput>,
    ) -> Result<ColumnValues> {
        let mut values = ColumnValues::new();

        for input in inputs {
            let column_type = self.resolve(input);

            if !column_type.is_writable() {
                tracing::debug!(
                    target: TRACING_TARGET,
                    column_id = %input.column_id,
                    column_type = %column_type,
                    "Skipping read-only column"
                );
                continue;
            }

            match build_value(&column_type, input)? {
                Some(value) => values.insert(input.column_id.clone(), value),
                None => {
                    values.remove(&input.column_id);
                    tracing::trace!(
                        target: TRACING_TARGET,
                        column_id = %input.column_id,
                        column_type = %column_type,
                        "No value to set"
                    );
                }
            }
        }

        Ok(values)
    }
}

/// Builds the value of one column according to its type.
///
/// Tags without a dedicated builder pass `columnValue` through unchecked;
/// monday.com rejects a malformed value when the mutation runs.
pub(super) fn build_value(
    column_type: &ColumnType,
    input: &UserColumnInput,
) -> Result<Option<Value>> {
    match column_type {
        ColumnType::Text | ColumnType::Simple => value::passthrough(input),
        ColumnType::ObjectValue => value::object_value(input),
        ColumnType::BoardRelation | ColumnType::Dependency => value::item_ids(input),
        ColumnType::People => value::people(input),
        ColumnType::Timeline => value::timeline(input),
        ColumnType::Checkbox => value::checkbox(input),
        ColumnType::Hour => value::hour(input),
        ColumnType::Status => value::status(input),
        ColumnType::Location => value::location(input),
        ColumnType::Dropdown => value::dropdown(input),
        ColumnType::Date => value::date(input),
        ColumnType::Email => value::email(input),
        ColumnType::Link => value::link(input),
        ColumnType::Phone => value::phone(input),
        ColumnType::File => value::file(input),
        ColumnType::Subtasks
        | ColumnType::Formula
        | ColumnType::AutoNumber
        | ColumnType::CreationLog
        | ColumnType::LastUpdated
        | ColumnType::Mirror => Ok(None),
        ColumnType::Other(_) => value::passthrough(input),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::column::IdList;

    fn board() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::new("name", "Name", "name"),
            ColumnDefinition::new("status", "Status", "status"),
            ColumnDefinition::new("tags", "Tags", "dropdown"),
            ColumnDefinition::new("due", "Due", "date"),
            ColumnDefinition::new("total", "Total", "formula"),
            ColumnDefinition::new("linked", "Linked", "connect_boards"),
        ]
    }

    #[test]
    fn resolves_override_then_definition_then_plain() {
        let dispatcher = ColumnDispatcher::new(&board());

        let input = UserColumnInput::new("status");
        assert_eq!(dispatcher.resolve(&input), ColumnType::Status);

        let input = UserColumnInput::new("status").with_type("text");
        assert_eq!(dispatcher.resolve(&input), ColumnType::Text);

        let input = UserColumnInput::new("unknown");
        assert_eq!(dispatcher.resolve(&input), ColumnType::Simple);
    }

    #[test]
    fn builds_mixed_inputs() {
        let dispatcher = ColumnDispatcher::new(&board());

        let mut status = UserColumnInput::new("status");
        status.status_label = Some("Done".to_owned());
        let mut due = UserColumnInput::new("due");
        due.date_value = Some("2024-03-05".to_owned());
        let mut linked = UserColumnInput::new("linked");
        linked.board_relation_value = Some(IdList::from("11, 12"));
        let numbers = UserColumnInput::new("numbers").with_value(json!("42"));

        let values = dispatcher
            .build(&[status, due, linked, numbers])
            .unwrap();

        assert_eq!(values.len(), 4);
        assert_eq!(values.get("status"), Some(&json!({ "label": "Done" })));
        assert_eq!(values.get("due"), Some(&json!({ "date": "2024-03-05" })));
        assert_eq!(
            values.get("linked"),
            Some(&json!({ "item_ids": ["11", "12"] }))
        );
        assert_eq!(values.get("numbers"), Some(&json!("42")));

        let keys: Vec<&String> = values.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["status", "due", "linked", "numbers"]);
    }

    #[test]
    fn omits_empty_values_and_read_only_columns() {
        let dispatcher = ColumnDispatcher::new(&board());

        let mut tags = UserColumnInput::new("tags");
        tags.dropdown_value = Some(" ,  ".to_owned());
        let total = UserColumnInput::new("total").with_value(json!(10));
        let status = UserColumnInput::new("status");
        let plain = UserColumnInput::new("notes");

        let values = dispatcher.build(&[tags, total, status, plain]).unwrap();
        assert!(values.is_empty());
        assert_eq!(values.to_json_string(), "{}");
    }

    #[test]
    fn duplicate_columns_keep_the_last_value() {
        let dispatcher = ColumnDispatcher::default();

        let first = UserColumnInput::new("notes").with_value(json!("a"));
        let second = UserColumnInput::new("notes").with_value(json!("b"));

        let values = dispatcher.build(&[first, second]).unwrap();
        assert_eq!(values.len(), 1);
        assert_eq!(values.get("notes"), Some(&json!("b")));
    }

    #[test]
    fn duplicate_column_without_value_clears_the_earlier_one() {
        let dispatcher = ColumnDispatcher::default();

        let inputs = [
            UserColumnInput::new("notes").with_value(json!("a")),
            UserColumnInput::new("due").with_value(json!("x")),
            UserColumnInput::new("notes"),
        ];

        let values = dispatcher.build(&inputs).unwrap();
        assert!(!values.contains("notes"));
        assert_eq!(values.to_json_string(), r#"{"due":"x"}"#);
    }

    #[test]
    fn file_override_splits_string_value() {
        let dispatcher = ColumnDispatcher::default();
        let input = UserColumnInput::new("files")
            .with_type("file")
            .with_value(json!("https://a.io/x.pdf Spec"));

        let values = dispatcher.build([&input]).unwrap();
        assert_eq!(
            values.get("files"),
            Some(&json!({ "files": [
                { "fileType": "LINK", "linkToFile": "https://a.io/x.pdf", "name": "Spec" }
            ]}))
        );
    }

    #[test]
    fn invalid_input_aborts_the_whole_batch() {
        let dispatcher = ColumnDispatcher::new(&board());

        let mut due = UserColumnInput::new("due");
        due.date_value = Some("soon".to_owned());

        let error = dispatcher.build([&due]).unwrap_err();
        assert_eq!(error.kind, crate::ErrorKind::InvalidInput);
    }
}
