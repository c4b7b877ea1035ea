//! Scripted transport for testing.
//!
//! This module is only available when the `test-utils` feature is enabled:
//!
//! ```toml
//! [dev-dependencies]
//! monday-core = { version = "...", features = ["test-utils"] }
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use monday_core::mock::MockTransport;
//! use monday_core::{ApiKey, MondayClient};
//!
//! let transport = Arc::new(MockTransport::new().with_data(json!({ "me": { "id": "1", "name": "Ada" } })));
//! let client = MondayClient::from_arc(transport.clone(), ApiKey::new("token")?);
//!
//! let account = client.verify_credentials().await?;
//! assert_eq!(transport.call_count(), 1);
//! ```

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use serde_json::{Value, json};

use crate::graphql::GraphqlRequest;
use crate::provider::{ApiKey, MondayTransport};
use crate::{Error, Result};

/// Transport replaying scripted replies in order and recording every request.
///
/// Once the script runs out, calls fail with a network error.
#[derive(Debug, Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<Result<String>>>,
    requests: Mutex<Vec<GraphqlRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a raw response body.
    #[must_use]
    pub fn with_reply(self, raw: impl Into<String>) -> Self {
        self.push(Ok(raw.into()));
        self
    }

    /// Queues a successful response wrapping `data`.
    #[must_use]
    pub fn with_data(self, data: Value) -> Self {
        self.with_reply(json!({ "data": data }).to_string())
    }

    /// Queues a transport failure.
    #[must_use]
    pub fn with_error(self, error: Error) -> Self {
        self.push(Err(error));
        self
    }

    fn push(&self, reply: Result<String>) {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(reply);
    }

    /// Returns the requests received so far.
    pub fn requests(&self) -> Vec<GraphqlRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait::async_trait]
impl MondayTransport for MockTransport {
    async fn execute(&self, _api_key: &ApiKey, request: &GraphqlRequest) -> Result<String> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| {
                Err(Error::network_error().with_message("no scripted reply left"))
            })
    }
}
