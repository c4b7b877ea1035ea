//! monday.com API access configuration.

use std::collections::HashMap;
use std::fmt;

use anyhow::Context;
use clap::Args;
use monday_core::pagination::{DEFAULT_MAX_PAGES, DEFAULT_PAGE_SIZE};
use monday_core::{API_TOKEN_KEY, MondayClient, PageWalker};
use monday_reqwest::{ReqwestClient, ReqwestConfig};

use crate::TRACING_TARGET_CONFIG;

/// API token, pagination limits and HTTP transport settings.
#[derive(Clone, Args)]
pub struct ApiConfig {
    /// Personal or OAuth API token.
    #[arg(long, env = "MONDAY_API_TOKEN", hide_env_values = true, global = true)]
    pub api_token: Option<String>,

    /// Entries requested per page by list commands.
    #[arg(long, env = "MONDAY_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE, global = true)]
    pub page_size: u32,

    /// Upper bound on pages walked by list commands.
    #[arg(long, env = "MONDAY_MAX_PAGES", default_value_t = DEFAULT_MAX_PAGES, global = true)]
    pub max_pages: u32,

    #[clap(flatten)]
    pub http: ReqwestConfig,
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("api_token", &self.api_token.as_ref().map(|_| "***"))
            .field("page_size", &self.page_size)
            .field("max_pages", &self.max_pages)
            .field("http", &self.http)
            .finish()
    }
}

impl ApiConfig {
    /// Builds an API client from this configuration.
    ///
    /// Fails with a missing-credential error when no token was given.
    pub fn create_client(&self) -> anyhow::Result<MondayClient> {
        let mut source = HashMap::new();
        if let Some(token) = &self.api_token {
            source.insert(API_TOKEN_KEY.to_owned(), token.clone());
        }

        let transport =
            ReqwestClient::new(self.http.clone()).context("failed to create HTTP client")?;
        let client = MondayClient::from_source(transport, &source)
            .context("set MONDAY_API_TOKEN or pass --api-token")?;

        Ok(client.with_page_walker(PageWalker::new(self.page_size, self.max_pages)))
    }

    /// Logs the configuration without the token.
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            api_url = %self.http.api_url,
            api_version = ?self.http.api_version,
            http_timeout_secs = self.http.http_timeout,
            page_size = self.page_size,
            max_pages = self.max_pages,
            has_token = self.api_token.is_some(),
            "API configuration"
        );
    }
}

#[cfg(test)]
mod tests {
    use monday_core::ErrorKind;

    use super::*;

    fn config(api_token: Option<&str>) -> ApiConfig {
        ApiConfig {
            api_token: api_token.map(str::to_owned),
            page_size: 10,
            max_pages: 5,
            http: ReqwestConfig::default(),
        }
    }

    #[test]
    fn debug_hides_the_token() {
        let debug = format!("{:?}", config(Some("secret-token")));
        assert!(!debug.contains("secret-token"));
    }

    #[test]
    fn client_requires_a_token() {
        let error = config(None).create_client().unwrap_err();
        let kind = error
            .downcast_ref::<monday_core::Error>()
            .map(|error| error.kind);
        assert_eq!(kind, Some(ErrorKind::MissingCredential));
    }

    #[test]
    fn client_uses_the_page_limits() {
        let client = config(Some("token")).create_client().unwrap();
        assert_eq!(client.page_walker(), PageWalker::new(10, 5));
    }
}
