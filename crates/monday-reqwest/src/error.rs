//! Internal error types for monday-reqwest.

use thiserror::Error;

/// Result type alias for monday-reqwest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Internal error type for monday-reqwest operations.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl From<Error> for monday_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Reqwest(e) => {
                if e.is_timeout() {
                    monday_core::Error::timeout()
                        .with_message(e.to_string())
                        .with_source(e)
                } else if e.is_connect() {
                    monday_core::Error::network_error()
                        .with_message("Connection failed")
                        .with_source(e)
                } else if e.is_builder() {
                    monday_core::Error::configuration()
                        .with_message(e.to_string())
                        .with_source(e)
                } else {
                    monday_core::Error::network_error()
                        .with_message(e.to_string())
                        .with_source(e)
                }
            }
            Error::Serde(e) => monday_core::Error::serialization()
                .with_message(e.to_string())
                .with_source(e),
        }
    }
}
