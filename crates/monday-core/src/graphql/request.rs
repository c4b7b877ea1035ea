//! GraphQL request payloads.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{escape_for_graphql, escape_json_for_graphql};
use crate::{Error, Result};

/// Leading operation keyword with its variable declaration list.
static DECLARATIONS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\s*(?:query|mutation)(?:\s+\w+)?\s*)\(([^)]*)\)")
        .expect("declaration pattern is valid")
});

/// A `$name` variable reference.
static REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$([A-Za-z_][A-Za-z0-9_]*)").expect("reference pattern is valid")
});

/// A GraphQL name, the only form an unquoted enum value may take.
static NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[_A-Za-z][_0-9A-Za-z]*$").expect("name pattern is valid"));

/// An `Int` or `Float` literal.
static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?(?:0|[1-9][0-9]*)(?:\.[0-9]+)?(?:[eE][+-]?[0-9]+)?$")
        .expect("number pattern is valid")
});

/// Built-in scalars whose string values are written as quoted literals.
const QUOTED_SCALARS: &[&str] = &["ID", "String", "JSON", "Date", "ISO8601DateTime"];

/// The JSON body of one GraphQL call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphqlRequest {
    /// Query or mutation document.
    pub query: String,
    /// Variables referenced by the document.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub variables: Map<String, Value>,
}

impl GraphqlRequest {
    /// Creates a request without variables.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: Map::new(),
        }
    }

    /// Adds a variable.
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    /// Adds a variable only when a value is present.
    pub fn with_optional_variable(
        self,
        name: impl Into<String>,
        value: Option<impl Into<Value>>,
    ) -> Self {
        match value {
            Some(value) => self.with_variable(name, value),
            None => self,
        }
    }

    /// Returns the operation name used in logs: the first field after the brace.
    pub fn operation(&self) -> &str {
        self.query
            .split_once('{')
            .map(|(_, rest)| rest)
            .unwrap_or_default()
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .find(|token| !token.is_empty())
            .unwrap_or("anonymous")
    }

    /// Renders the request as a document with every variable written inline.
    ///
    /// For transports that can only send `{query}`. Strings are escaped with
    /// [`escape_for_graphql`]; object values are sent as JSON strings.
    pub fn render_literal(&self) -> Result<String> {
        let Some(caps) = DECLARATIONS.captures(&self.query) else {
            return Ok(self.query.clone());
        };

        let declared: HashMap<&str, &str> = caps[2]
            .split(',')
            .filter_map(|declaration| declaration.split_once(':'))
            .map(|(name, ty)| (name.trim().trim_start_matches('$'), ty.trim()))
            .collect();

        let mut literals = HashMap::new();
        for (name, ty) in &declared {
            let literal = match self.variables.get(*name) {
                Some(value) => render_value(value, base_type(ty))?,
                None if ty.ends_with('!') => {
                    return Err(Error::invalid_input()
                        .with_message(format!("required variable '${name}' is not set")));
                }
                None => "null".to_owned(),
            };
            literals.insert(name.to_string(), literal);
        }

        let body = &self.query[caps.get(0).map_or(0, |m| m.end())..];
        let head = caps[1].trim_end();

        let mut missing = None;
        let body = REFERENCE.replace_all(body, |reference: &Captures| {
            match literals.get(&reference[1]) {
                Some(literal) => literal.clone(),
                None => {
                    missing.get_or_insert_with(|| reference[1].to_owned());
                    String::new()
                }
            }
        });

        if let Some(name) = missing {
            return Err(Error::invalid_input()
                .with_message(format!("variable '${name}' is used but not declared")));
        }

        Ok(format!("{head} {}", body.trim_start()))
    }
}

/// Strips list and non-null wrappers: `[ID!]!` becomes `ID`.
fn base_type(ty: &str) -> &str {
    ty.trim_matches(|c: char| c == '[' || c == ']' || c == '!' || c.is_whitespace())
}

fn render_value(value: &Value, base_type: &str) -> Result<String> {
    let literal = match value {
        Value::Null => "null".to_owned(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) if !QUOTED_SCALARS.contains(&base_type) => bare_literal(s, base_type)?,
        Value::String(s) => format!("\"{}\"", escape_for_graphql(s)),
        Value::Array(items) => {
            let items = items
                .iter()
                .map(|item| render_value(item, base_type))
                .collect::<Result<Vec<_>>>()?;
            format!("[{}]", items.join(", "))
        }
        Value::Object(_) => format!("\"{}\"", escape_json_for_graphql(value)?),
    };

    Ok(literal)
}

/// Checks a string written without quotes: numbers for `Int`/`Float`,
/// `true`/`false` for `Boolean`, otherwise an enum name.
fn bare_literal(value: &str, base_type: &str) -> Result<String> {
    let valid = match base_type {
        "Int" | "Float" => NUMBER.is_match(value),
        "Boolean" => matches!(value, "true" | "false"),
        _ => NAME.is_match(value) && !matches!(value, "true" | "false" | "null"),
    };

    if !valid {
        return Err(Error::invalid_input().with_message(format!(
            "'{value}' is not a valid {base_type} literal"
        )));
    }

    Ok(value.to_owned())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn serializes_without_empty_variables() {
        let request = GraphqlRequest::new("query { me { id } }");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "query": "query { me { id } }" })
        );

        let request = request.with_variable("limit", 5);
        assert_eq!(serde_json::to_value(&request).unwrap()["variables"]["limit"], 5);
    }

    #[test]
    fn operation_name() {
        let request = GraphqlRequest::new("mutation ($id: ID!) { delete_item (item_id: $id) { id } }");
        assert_eq!(request.operation(), "delete_item");
        assert_eq!(GraphqlRequest::new("").operation(), "anonymous");
    }

    #[test]
    fn renders_variables_inline() {
        let request = GraphqlRequest::new(
            "mutation ($board: ID!, $name: String!, $kind: BoardKind!, $values: JSON, $ids: [ID!]) \
             { create_item (board_id: $board, item_name: $name, kind: $kind, column_values: $values, ids: $ids) { id } }",
        )
        .with_variable("board", "42")
        .with_variable("name", "Say \"hi\"")
        .with_variable("kind", "public")
        .with_variable("values", r#"{"a":"b"}"#)
        .with_variable("ids", json!(["1", "2"]));

        let literal = request.render_literal().unwrap();
        assert_eq!(
            literal,
            r#"mutation { create_item (board_id: "42", item_name: "Say \"hi\"", kind: public, column_values: "{\"a\":\"b\"}", ids: ["1", "2"]) { id } }"#
        );
    }

    #[test]
    fn enum_values_must_be_names() {
        let request = GraphqlRequest::new(
            "mutation ($type: ColumnType!) { create_column (column_type: $type) { id } }",
        )
        .with_variable("type", "text) { id } archive_board (board_id: 1");

        let error = request.render_literal().unwrap_err();
        assert_eq!(error.kind, crate::ErrorKind::InvalidInput);

        let request = GraphqlRequest::new(
            "mutation ($type: ColumnType!) { create_column (column_type: $type) { id } }",
        )
        .with_variable("type", "null");
        assert!(request.render_literal().is_err());
    }

    #[test]
    fn numeric_strings_must_be_numbers() {
        let document = "query ($limit: Int!) { boards (limit: $limit) { id } }";

        let request = GraphqlRequest::new(document).with_variable("limit", "25");
        assert_eq!(
            request.render_literal().unwrap(),
            "query { boards (limit: 25) { id } }"
        );

        let request = GraphqlRequest::new(document).with_variable("limit", "1) { id } me { id");
        let error = request.render_literal().unwrap_err();
        assert_eq!(error.kind, crate::ErrorKind::InvalidInput);
    }

    #[test]
    fn optional_variables_render_as_null() {
        let request = GraphqlRequest::new("query ($page: Int) { boards (page: $page) { id } }");
        assert_eq!(
            request.render_literal().unwrap(),
            "query { boards (page: null) { id } }"
        );
    }

    #[test]
    fn missing_required_variable_is_rejected() {
        let request = GraphqlRequest::new("query ($ids: [ID!]!) { boards (ids: $ids) { id } }");
        assert!(request.render_literal().is_err());

        let request = GraphqlRequest::new("query ($a: Int) { boards (ids: $b) { id } }");
        assert!(request.render_literal().is_err());
    }

    #[test]
    fn documents_without_declarations_are_unchanged() {
        let request = GraphqlRequest::new("query { me { id } }");
        assert_eq!(request.render_literal().unwrap(), "query { me { id } }");
    }
}
