//! Error responses of the webhook endpoint.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use monday_core::{Error, ErrorKind};
use serde::Serialize;

/// JSON body returned when a delivery is not accepted.
#[must_use = "error responses do nothing unless serialized"]
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// The error name/type identifier
    pub name: &'static str,
    /// Message safe for client display
    pub message: String,
    /// HTTP status code (not serialized in JSON)
    #[serde(skip)]
    pub status: StatusCode,
}

impl ErrorResponse {
    /// Creates a response for a body that is not JSON.
    pub fn malformed_body(message: impl Into<String>) -> Self {
        Self {
            name: "malformed_body",
            message: message.into(),
            status: StatusCode::BAD_REQUEST,
        }
    }
}

impl From<Error> for ErrorResponse {
    fn from(error: Error) -> Self {
        let status = match error.kind {
            ErrorKind::InvalidInput | ErrorKind::Serialization => StatusCode::BAD_REQUEST,
            _ if error.is_transient() => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        Self {
            name: error.kind_str(),
            message: error
                .message
                .unwrap_or_else(|| "the event could not be delivered".to_owned()),
            status,
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_error_kinds_to_status_codes() {
        let response = ErrorResponse::from(Error::invalid_input());
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.name, "invalid_input");

        let response = ErrorResponse::from(Error::network_error().with_message("closed"));
        assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.message, "closed");

        let response = ErrorResponse::from(Error::configuration());
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
