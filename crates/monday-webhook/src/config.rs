//! Webhook endpoint configuration.

#[cfg(feature = "config")]
use clap::Args;
use monday_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default path monday.com posts events to.
pub const DEFAULT_WEBHOOK_PATH: &str = "/webhook";

/// Configuration for the webhook endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct WebhookConfig {
    /// Path of the webhook endpoint
    #[cfg_attr(
        feature = "config",
        arg(long = "webhook-path", env = "WEBHOOK_PATH", default_value = DEFAULT_WEBHOOK_PATH)
    )]
    #[serde(default = "default_path")]
    pub path: String,
}

fn default_path() -> String {
    DEFAULT_WEBHOOK_PATH.to_owned()
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

impl WebhookConfig {
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Checks that the path can be mounted on a router.
    pub fn validate(&self) -> Result<()> {
        if !self.path.starts_with('/') {
            return Err(Error::configuration()
                .with_message(format!("webhook path '{}' must start with '/'", self.path)));
        }

        let has_capture = self
            .path
            .split('/')
            .any(|segment| segment.starts_with(':'));
        if has_capture || self.path.contains(['{', '}', '*']) {
            return Err(Error::configuration()
                .with_message(format!("webhook path '{}' must be a fixed path", self.path)));
        }

        Ok(())
    }
}
