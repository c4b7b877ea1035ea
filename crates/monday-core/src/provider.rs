//! Injected capabilities: credentials and the HTTP transport.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::graphql::GraphqlRequest;
use crate::{Error, Result};

/// Configuration key holding the API token.
pub const API_TOKEN_KEY: &str = "apiToken";

/// A monday.com personal or OAuth API token.
///
/// The token never appears in `Debug` output or logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wraps a token, rejecting blank values.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(Error::missing_credential().with_message("API token is empty"));
        }

        Ok(Self(token))
    }

    /// Resolves the token from a key-value configuration source.
    pub fn from_source(source: &(impl ConfigSource + ?Sized)) -> Result<Self> {
        let token = source.get(API_TOKEN_KEY).ok_or_else(|| {
            Error::missing_credential()
                .with_message(format!("configuration has no '{API_TOKEN_KEY}' entry"))
        })?;

        Self::new(token)
    }

    /// Returns the raw token for the `Authorization` header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Key-value configuration supplied by the host.
pub trait ConfigSource: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

impl ConfigSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl ConfigSource for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        BTreeMap::get(self, key).cloned()
    }
}

/// Sends one GraphQL request and returns the raw response text.
///
/// Implementations report transport failures as
/// [`ErrorKind::NetworkError`] or [`ErrorKind::Timeout`] and do not inspect
/// the body; classification happens in the client.
///
/// [`ErrorKind::NetworkError`]: crate::ErrorKind::NetworkError
/// [`ErrorKind::Timeout`]: crate::ErrorKind::Timeout
#[async_trait::async_trait]
pub trait MondayTransport: Send + Sync {
    async fn execute(&self, api_key: &ApiKey, request: &GraphqlRequest) -> Result<String>;
}
