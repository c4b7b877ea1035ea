//! Classification and decoding of raw API responses.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};

/// Outcome of inspecting a raw response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Whether the body carries no GraphQL errors.
    pub success: bool,
    /// The raw body, unchanged.
    pub data: String,
}

/// Classifies a raw response by its payload alone.
///
/// A body with a non-empty `errors` field, or one that is not JSON at all,
/// is a failure. HTTP status codes play no part.
pub fn classify(raw: &str) -> Classification {
    let success = match serde_json::from_str::<Value>(raw) {
        Ok(body) => !has_errors(&body),
        Err(_) => false,
    };

    Classification {
        success,
        data: raw.to_owned(),
    }
}

fn has_errors(body: &Value) -> bool {
    match body.get("errors") {
        None | Some(Value::Null) => false,
        Some(Value::Array(errors)) => !errors.is_empty(),
        Some(Value::Object(errors)) => !errors.is_empty(),
        Some(Value::String(errors)) => !errors.is_empty(),
        Some(_) => true,
    }
}

/// One entry of a GraphQL `errors` array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphqlError {
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Option<Vec<GraphqlError>>,
    #[serde(default)]
    error_message: Option<String>,
}

/// Decodes the `data` member of a successful response.
///
/// Error payloads, including monday.com's top-level `error_message`, become
/// [`ErrorKind::ApiError`] carrying the raw body as context; a missing `data`
/// member is an [`ErrorKind::UpstreamShape`].
///
/// [`ErrorKind::ApiError`]: crate::ErrorKind::ApiError
/// [`ErrorKind::UpstreamShape`]: crate::ErrorKind::UpstreamShape
pub fn decode_data<T>(raw: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let classification = classify(raw);
    if !classification.success {
        return Err(Error::api_error()
            .with_message(first_error_message(raw))
            .with_context(classification.data));
    }

    let envelope: Envelope<T> = serde_json::from_str(raw).map_err(|err| {
        Error::api_error()
            .with_message("response does not match the expected shape")
            .with_context(raw.to_owned())
            .with_source(err)
    })?;

    match (envelope.data, envelope.error_message) {
        (Some(data), _) => Ok(data),
        (None, Some(message)) => Err(Error::api_error()
            .with_message(message)
            .with_context(raw.to_owned())),
        (None, None) => Err(Error::upstream_shape()
            .with_message("response has no data")
            .with_context(raw.to_owned())),
    }
}

/// Returns the first error message of an error payload.
fn first_error_message(raw: &str) -> String {
    serde_json::from_str::<Envelope<Value>>(raw)
        .ok()
        .and_then(|envelope| envelope.errors)
        .and_then(|errors| errors.into_iter().next())
        .map(|error| error.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| "request failed".to_owned())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::ErrorKind;

    #[test]
    fn classifies_success() {
        let raw = r#"{"data":{"boards":[]}}"#;
        let classification = classify(raw);

        assert!(classification.success);
        assert_eq!(classification.data, raw);
    }

    #[test]
    fn classifies_errors() {
        let raw = r#"{"errors":[{"message":"x"}]}"#;
        let classification = classify(raw);

        assert!(!classification.success);
        assert_eq!(classification.data, raw);
    }

    #[test]
    fn empty_errors_are_success() {
        assert!(classify(r#"{"data":{},"errors":[]}"#).success);
        assert!(classify(r#"{"data":{},"errors":null}"#).success);
    }

    #[test]
    fn non_json_is_failure() {
        let classification = classify("<html>Bad gateway</html>");
        assert!(!classification.success);
        assert_eq!(classification.data, "<html>Bad gateway</html>");
    }

    #[test]
    fn decodes_data() {
        #[derive(Deserialize)]
        struct Me {
            me: Value,
        }

        let me: Me = decode_data(r#"{"data":{"me":{"id":"1"}},"account_id":9}"#).unwrap();
        assert_eq!(me.me, json!({ "id": "1" }));
    }

    #[test]
    fn decode_surfaces_api_errors() {
        let raw = r#"{"errors":[{"message":"Column not found"}]}"#;
        let error = decode_data::<Value>(raw).unwrap_err();

        assert_eq!(error.kind, ErrorKind::ApiError);
        assert_eq!(error.message.as_deref(), Some("Column not found"));
        assert_eq!(error.context.as_deref(), Some(raw));
    }

    #[test]
    fn decode_reports_missing_data() {
        let error = decode_data::<Value>(r#"{"account_id":1}"#).unwrap_err();
        assert_eq!(error.kind, ErrorKind::UpstreamShape);

        let error = decode_data::<Value>(r#"{"error_message":"Not Authenticated"}"#).unwrap_err();
        assert_eq!(error.kind, ErrorKind::ApiError);
        assert_eq!(error.message.as_deref(), Some("Not Authenticated"));
    }
}
