//! Escaping for text embedded in GraphQL string literals.

use serde::Serialize;

use crate::Result;

/// Escapes text for use inside a double-quoted GraphQL string.
///
/// Backslashes are replaced first so later substitutions are not escaped twice.
pub fn escape_for_graphql(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// JSON-encodes a value and escapes the result for a GraphQL string literal.
pub fn escape_json_for_graphql<T>(value: &T) -> Result<String>
where
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string(value)?;
    Ok(escape_for_graphql(&json))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn adversarial_inputs() {
        let cases = [
            ("plain", "plain"),
            (r#"a\"b"#, r#"a\\\"b"#),
            (r"C:\temp", r"C:\\temp"),
            (r#""quoted""#, r#"\"quoted\""#),
            ("line\nbreak", r"line\nbreak"),
            ("cr\r\ntab\t", r"cr\r\ntab\t"),
            (r"\n", r"\\n"),
            (r"\\", r"\\\\"),
            ("", ""),
        ];

        for (input, expected) in cases {
            assert_eq!(escape_for_graphql(input), expected, "input: {input:?}");
        }
    }

    #[test]
    fn json_values_are_encoded_then_escaped() {
        let value = json!({ "text": "say \"hi\"" });
        let escaped = escape_json_for_graphql(&value).unwrap();
        assert_eq!(escaped, r#"{\"text\":\"say \\\"hi\\\"\"}"#);
    }
}
