//! Reqwest transport configuration.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use url::Url;

/// Default GraphQL endpoint.
pub const DEFAULT_API_URL: &str = "https://api.monday.com/v2";

/// Default timeout for HTTP requests: 30 seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the reqwest transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct ReqwestConfig {
    /// GraphQL endpoint
    #[cfg_attr(
        feature = "config",
        arg(long = "api-url", env = "MONDAY_API_URL", default_value = DEFAULT_API_URL)
    )]
    #[serde(default = "default_api_url")]
    pub api_url: Url,

    /// Value of the `API-Version` header
    #[cfg_attr(feature = "config", arg(long = "api-version", env = "MONDAY_API_VERSION"))]
    #[serde(default)]
    pub api_version: Option<String>,

    /// HTTP request timeout in seconds
    #[cfg_attr(
        feature = "config",
        arg(long = "http-timeout", env = "MONDAY_HTTP_TIMEOUT", default_value = "30")
    )]
    #[serde(default = "default_timeout_secs")]
    pub http_timeout: u64,

    /// User-Agent header to send with requests
    #[cfg_attr(
        feature = "config",
        arg(long = "http-user-agent", env = "MONDAY_HTTP_USER_AGENT")
    )]
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Send requests as `{query}` with variables rendered inline
    #[cfg_attr(
        feature = "config",
        arg(long = "inline-variables", env = "MONDAY_INLINE_VARIABLES")
    )]
    #[serde(default)]
    pub inline_variables: bool,
}

fn default_api_url() -> Url {
    Url::parse(DEFAULT_API_URL).expect("default API URL is valid")
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ReqwestConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_version: None,
            http_timeout: default_timeout_secs(),
            user_agent: None,
            inline_variables: false,
        }
    }
}

impl ReqwestConfig {
    /// Returns the timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout)
    }

    /// Returns the effective timeout, using default if zero.
    pub fn effective_timeout(&self) -> Duration {
        if self.http_timeout == 0 {
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        } else {
            self.timeout()
        }
    }

    /// Returns the effective user agent, using default if not set.
    pub fn effective_user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("monday-integration/{}", env!("CARGO_PKG_VERSION")))
    }

    #[must_use]
    pub fn with_api_url(mut self, api_url: Url) -> Self {
        self.api_url = api_url;
        self
    }

    #[must_use]
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = Some(api_version.into());
        self
    }

    /// Set the timeout in seconds.
    #[must_use]
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.http_timeout = timeout_secs;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    #[must_use]
    pub fn with_inline_variables(mut self, inline_variables: bool) -> Self {
        self.inline_variables = inline_variables;
        self
    }
}
