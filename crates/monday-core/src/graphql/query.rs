//! Request builders for every operation the client issues.
//!
//! Each builder returns a variable-based [`GraphqlRequest`]. Paged queries
//! take the page size as `limit` and a 1-based `page` index.

use serde_json::json;

use super::GraphqlRequest;
use crate::column::ColumnValues;
use crate::types::BoardKind;

const BOARD_FIELDS: &str = "id name description state board_kind";
const COLUMN_FIELDS: &str = "id title type settings_str archived";
const GROUP_FIELDS: &str = "id title color position archived";
const ITEM_FIELDS: &str = "id name state group { id title } column_values { id text value type }";

/// The account the API key belongs to.
pub fn me() -> GraphqlRequest {
    GraphqlRequest::new("query { me { id name email } }")
}

/// One page of the boards visible to the account.
pub fn boards_page(limit: u32, page: u32) -> GraphqlRequest {
    GraphqlRequest::new(format!(
        "query ($limit: Int!, $page: Int!) {{ boards (limit: $limit, page: $page) {{ {BOARD_FIELDS} }} }}"
    ))
    .with_variable("limit", limit)
    .with_variable("page", page)
}

pub fn board(board_id: &str) -> GraphqlRequest {
    GraphqlRequest::new(format!(
        "query ($ids: [ID!]) {{ boards (ids: $ids) {{ {BOARD_FIELDS} }} }}"
    ))
    .with_variable("ids", json!([board_id]))
}

/// Column definitions of a board.
pub fn board_columns(board_id: &str) -> GraphqlRequest {
    GraphqlRequest::new(format!(
        "query ($ids: [ID!]) {{ boards (ids: $ids) {{ columns {{ {COLUMN_FIELDS} }} }} }}"
    ))
    .with_variable("ids", json!([board_id]))
}

pub fn board_groups(board_id: &str) -> GraphqlRequest {
    GraphqlRequest::new(format!(
        "query ($ids: [ID!]) {{ boards (ids: $ids) {{ groups {{ {GROUP_FIELDS} }} }} }}"
    ))
    .with_variable("ids", json!([board_id]))
}

/// One page of the items on a board.
pub fn board_items_page(board_id: &str, limit: u32, page: u32) -> GraphqlRequest {
    GraphqlRequest::new(format!(
        "query ($ids: [ID!], $limit: Int!, $page: Int!) \
         {{ boards (ids: $ids) {{ items (limit: $limit, page: $page) {{ {ITEM_FIELDS} }} }} }}"
    ))
    .with_variable("ids", json!([board_id]))
    .with_variable("limit", limit)
    .with_variable("page", page)
}

/// One page of the items in one group of a board.
pub fn group_items_page(board_id: &str, group_id: &str, limit: u32, page: u32) -> GraphqlRequest {
    GraphqlRequest::new(format!(
        "query ($ids: [ID!], $groups: [String], $limit: Int!, $page: Int!) \
         {{ boards (ids: $ids) {{ groups (ids: $groups) {{ items (limit: $limit, page: $page) {{ {ITEM_FIELDS} }} }} }} }}"
    ))
    .with_variable("ids", json!([board_id]))
    .with_variable("groups", json!([group_id]))
    .with_variable("limit", limit)
    .with_variable("page", page)
}

/// One page of the items whose column matches a value.
pub fn items_by_column_value_page(
    board_id: &str,
    column_id: &str,
    column_value: &str,
    limit: u32,
    page: u32,
) -> GraphqlRequest {
    GraphqlRequest::new(format!(
        "query ($board: ID!, $column: String!, $value: String!, $limit: Int!, $page: Int!) \
         {{ items_by_column_values (board_id: $board, column_id: $column, column_value: $value, limit: $limit, page: $page) {{ {ITEM_FIELDS} }} }}"
    ))
    .with_variable("board", board_id)
    .with_variable("column", column_id)
    .with_variable("value", column_value)
    .with_variable("limit", limit)
    .with_variable("page", page)
}

pub fn items(item_ids: &[String]) -> GraphqlRequest {
    GraphqlRequest::new(format!(
        "query ($ids: [ID!]) {{ items (ids: $ids) {{ {ITEM_FIELDS} }} }}"
    ))
    .with_variable("ids", json!(item_ids))
}

pub fn create_board(name: &str, kind: BoardKind, template_id: Option<&str>) -> GraphqlRequest {
    GraphqlRequest::new(
        "mutation ($name: String!, $kind: BoardKind!, $template: ID) \
         { create_board (board_name: $name, board_kind: $kind, template_id: $template) { id } }",
    )
    .with_variable("name", name)
    .with_variable("kind", kind.as_ref())
    .with_optional_variable("template", template_id)
}

pub fn archive_board(board_id: &str) -> GraphqlRequest {
    GraphqlRequest::new("mutation ($board: ID!) { archive_board (board_id: $board) { id } }")
        .with_variable("board", board_id)
}

/// Adds a column; `defaults` is the JSON-encoded column settings.
pub fn create_column(
    board_id: &str,
    title: &str,
    column_type: &str,
    defaults: Option<&str>,
) -> GraphqlRequest {
    GraphqlRequest::new(format!(
        "mutation ($board: ID!, $title: String!, $type: ColumnType!, $defaults: JSON) \
         {{ create_column (board_id: $board, title: $title, column_type: $type, defaults: $defaults) {{ {COLUMN_FIELDS} }} }}"
    ))
    .with_variable("board", board_id)
    .with_variable("title", title)
    .with_variable("type", column_type)
    .with_optional_variable("defaults", defaults)
}

pub fn create_group(board_id: &str, group_name: &str) -> GraphqlRequest {
    GraphqlRequest::new(
        "mutation ($board: ID!, $name: String!) \
         { create_group (board_id: $board, group_name: $name) { id } }",
    )
    .with_variable("board", board_id)
    .with_variable("name", group_name)
}

pub fn delete_group(board_id: &str, group_id: &str) -> GraphqlRequest {
    GraphqlRequest::new(
        "mutation ($board: ID!, $group: String!) \
         { delete_group (board_id: $board, group_id: $group) { id } }",
    )
    .with_variable("board", board_id)
    .with_variable("group", group_id)
}

pub fn create_item(
    board_id: &str,
    group_id: Option<&str>,
    item_name: &str,
    column_values: &ColumnValues,
) -> GraphqlRequest {
    GraphqlRequest::new(
        "mutation ($board: ID!, $group: String, $name: String!, $values: JSON) \
         { create_item (board_id: $board, group_id: $group, item_name: $name, column_values: $values) { id } }",
    )
    .with_variable("board", board_id)
    .with_optional_variable("group", group_id)
    .with_variable("name", item_name)
    .with_variable("values", column_values.to_json_string())
}

/// Sets one column; `value` is the already JSON-encoded column value.
pub fn change_column_value(
    board_id: &str,
    item_id: &str,
    column_id: &str,
    value: &str,
) -> GraphqlRequest {
    GraphqlRequest::new(
        "mutation ($board: ID!, $item: ID!, $column: String!, $value: JSON!) \
         { change_column_value (board_id: $board, item_id: $item, column_id: $column, value: $value) { id } }",
    )
    .with_variable("board", board_id)
    .with_variable("item", item_id)
    .with_variable("column", column_id)
    .with_variable("value", value)
}

pub fn change_multiple_column_values(
    board_id: &str,
    item_id: &str,
    column_values: &ColumnValues,
) -> GraphqlRequest {
    GraphqlRequest::new(
        "mutation ($board: ID!, $item: ID!, $values: JSON!) \
         { change_multiple_column_values (board_id: $board, item_id: $item, column_values: $values) { id } }",
    )
    .with_variable("board", board_id)
    .with_variable("item", item_id)
    .with_variable("values", column_values.to_json_string())
}

pub fn move_item_to_group(item_id: &str, group_id: &str) -> GraphqlRequest {
    GraphqlRequest::new(
        "mutation ($item: ID!, $group: String!) \
         { move_item_to_group (item_id: $item, group_id: $group) { id } }",
    )
    .with_variable("item", item_id)
    .with_variable("group", group_id)
}

pub fn delete_item(item_id: &str) -> GraphqlRequest {
    GraphqlRequest::new("mutation ($item: ID!) { delete_item (item_id: $item) { id } }")
        .with_variable("item", item_id)
}

/// Posts an update (comment) on an item.
pub fn create_update(item_id: &str, body: &str) -> GraphqlRequest {
    GraphqlRequest::new(
        "mutation ($item: ID!, $body: String!) { create_update (item_id: $item, body: $body) { id } }",
    )
    .with_variable("item", item_id)
    .with_variable("body", body)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn paged_queries_carry_limit_and_page() {
        let request = boards_page(100, 3);
        assert_eq!(request.operation(), "boards");
        assert_eq!(request.variables["limit"], 100);
        assert_eq!(request.variables["page"], 3);

        let request = group_items_page("1", "topics", 50, 1);
        assert_eq!(request.variables["groups"], json!(["topics"]));
    }

    #[test]
    fn optional_arguments_are_left_unset() {
        let request = create_board("Roadmap", BoardKind::Private, None);
        assert_eq!(request.variables["kind"], "private");
        assert!(!request.variables.contains_key("template"));

        let request = create_item("1", None, "Task", &ColumnValues::new());
        assert!(!request.variables.contains_key("group"));
        assert_eq!(request.variables["values"], "{}");
    }

    #[test]
    fn column_values_are_sent_as_one_json_string() {
        let mut values = ColumnValues::new();
        values.insert("status", json!({ "label": "Done" }));

        let request = change_multiple_column_values("1", "2", &values);
        assert_eq!(request.variables["values"], r#"{"status":{"label":"Done"}}"#);
    }

    #[test]
    fn every_builder_renders_inline() {
        let mut values = ColumnValues::new();
        values.insert("text", json!("a \"quoted\" word"));

        let requests = [
            me(),
            boards_page(10, 1),
            board("1"),
            board_columns("1"),
            board_groups("1"),
            board_items_page("1", 10, 1),
            group_items_page("1", "g", 10, 1),
            items_by_column_value_page("1", "status", "Done", 10, 1),
            items(&["1".to_owned(), "2".to_owned()]),
            create_board("B", BoardKind::Public, Some("7")),
            archive_board("1"),
            create_column("1", "Due", "date", None),
            create_group("1", "Next"),
            delete_group("1", "g"),
            create_item("1", Some("g"), "Task", &values),
            change_column_value("1", "2", "status", r#"{"label":"Done"}"#),
            change_multiple_column_values("1", "2", &values),
            move_item_to_group("2", "g"),
            delete_item("2"),
            create_update("2", "line one\nline two"),
        ];

        for request in requests {
            let literal = request.render_literal().unwrap();
            assert!(!literal.contains('$'), "unresolved variable in {literal}");
        }
    }

    #[test]
    fn inline_column_type_cannot_break_out() {
        let hostile = "text, title: \"x\") { id } archive_board (board_id: 1) { id } \
                       create_column (board_id: 1, title: \"y\", column_type: text";

        let error = create_column("1", "Due", hostile, None)
            .render_literal()
            .unwrap_err();
        assert_eq!(error.kind, crate::ErrorKind::InvalidInput);

        let literal = create_column("1", "Due\") { id } archive_board (board_id: 1", "status", None)
            .render_literal()
            .unwrap();
        assert!(literal.contains(r#"title: "Due\") { id } archive_board (board_id: 1""#));
        assert!(literal.contains("column_type: status"));
    }

    #[test]
    fn inline_mutation_escapes_strings() {
        let literal = create_update("2", "say \"hi\"\n").render_literal().unwrap();
        assert_eq!(
            literal,
            r#"mutation { create_update (item_id: "2", body: "say \"hi\"\n") { id } }"#
        );
    }
}
