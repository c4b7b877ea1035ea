//! Structured error handling for monday.com operations.

use strum::{AsRefStr, Display, EnumString, IntoStaticStr};
use thiserror::Error;

/// Type alias for boxed dynamic errors that can be sent across threads.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for Results with our custom Error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Categories of errors that can occur in monday.com operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// No API key was configured.
    MissingCredential,
    /// A user-supplied value could not be parsed into its column shape.
    InvalidInput,
    /// The API answered with an error payload or an unparsable body.
    ApiError,
    /// A successful-looking response lacked the expected nested fields.
    UpstreamShape,
    /// Network-related error occurred.
    NetworkError,
    /// The HTTP call exceeded its deadline.
    Timeout,
    /// Serialization/deserialization error.
    Serialization,
    /// Configuration error.
    Configuration,
}

impl ErrorKind {
    /// Returns whether a later attempt of the same call could succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::NetworkError | Self::Timeout)
    }
}

/// Structured error type with classification and context tracking.
#[must_use]
#[derive(Debug, Error)]
#[error("[{kind}]{}", message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Primary error message.
    pub message: Option<String>,
    /// Underlying source error, if any.
    #[source]
    pub source: Option<BoxedError>,
    /// Additional context information, such as the raw API response.
    pub context: Option<String>,
}

impl Error {
    /// Creates a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            source: None,
            context: None,
        }
    }

    /// Creates a new error from a source error.
    pub fn from_source(kind: ErrorKind, source: impl Into<BoxedError>) -> Self {
        Self {
            kind,
            message: None,
            source: Some(source.into()),
            context: None,
        }
    }

    /// Adds a message to this error.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the source of the error.
    pub fn with_source(mut self, source: impl Into<BoxedError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Adds context to the error.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Creates a new missing credential error.
    pub fn missing_credential() -> Self {
        Self::new(ErrorKind::MissingCredential)
    }

    /// Creates a new invalid input error.
    pub fn invalid_input() -> Self {
        Self::new(ErrorKind::InvalidInput)
    }

    /// Creates a new API error.
    pub fn api_error() -> Self {
        Self::new(ErrorKind::ApiError)
    }

    /// Creates a new upstream shape error.
    pub fn upstream_shape() -> Self {
        Self::new(ErrorKind::UpstreamShape)
    }

    /// Creates a new network error.
    pub fn network_error() -> Self {
        Self::new(ErrorKind::NetworkError)
    }

    /// Creates a new timeout error.
    pub fn timeout() -> Self {
        Self::new(ErrorKind::Timeout)
    }

    /// Creates a new serialization error.
    pub fn serialization() -> Self {
        Self::new(ErrorKind::Serialization)
    }

    /// Creates a new configuration error.
    pub fn configuration() -> Self {
        Self::new(ErrorKind::Configuration)
    }

    /// Returns the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error kind as a string.
    pub fn kind_str(&self) -> &'static str {
        self.kind.into()
    }

    /// Check if this error is transient based on its kind.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        self.kind.is_transient()
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::from_source(ErrorKind::Serialization, error).with_message("Invalid JSON")
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_error_new() {
        let error = Error::new(ErrorKind::ApiError);
        assert_eq!(error.kind, ErrorKind::ApiError);
        assert!(error.message.is_none());
        assert!(error.source.is_none());
        assert!(error.context.is_none());
    }

    #[test]
    fn test_error_builder_pattern() {
        let error = Error::invalid_input()
            .with_message("bad hour")
            .with_context("hourValue=25:xx");

        assert_eq!(error.kind, ErrorKind::InvalidInput);
        assert_eq!(error.message.as_deref(), Some("bad hour"));
        assert_eq!(error.context.as_deref(), Some("hourValue=25:xx"));
    }

    #[test]
    fn test_error_display() {
        let error = Error::upstream_shape().with_message("board 42 not found");

        let display_str = error.to_string();
        assert_eq!(display_str, "[upstream_shape]: board 42 not found");
        assert_eq!(Error::missing_credential().to_string(), "[missing_credential]");
    }

    #[test]
    fn test_from_serde_json() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = Error::from(source);

        assert_eq!(error.kind, ErrorKind::Serialization);
        assert!(error.source.is_some());
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            ErrorKind::from_str("missing_credential").unwrap(),
            ErrorKind::MissingCredential
        );
        assert_eq!(ErrorKind::from_str("timeout").unwrap(), ErrorKind::Timeout);
        assert!(ErrorKind::from_str("retry_later").is_err());
    }

    #[test]
    fn test_transient() {
        assert!(ErrorKind::NetworkError.is_transient());
        assert!(ErrorKind::Timeout.is_transient());

        assert!(!ErrorKind::ApiError.is_transient());
        assert!(!ErrorKind::InvalidInput.is_transient());
        assert!(!ErrorKind::MissingCredential.is_transient());
        assert!(!ErrorKind::UpstreamShape.is_transient());
        assert_eq!(Error::timeout().kind_str(), "timeout");
    }
}
