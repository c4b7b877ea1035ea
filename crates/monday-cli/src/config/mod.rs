//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── api: ApiConfig      # Token, pagination, HTTP transport
//! └── command: Command    # What to run
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.
//! Use `--help` to see all available options.

mod api;
mod server;

use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub use self::api::ApiConfig;
pub use self::server::ServerConfig;
use crate::TRACING_TARGET_CONFIG;
use crate::command::Command;

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "monday")]
#[command(about = "monday.com workflow operations and webhook endpoint")]
#[command(version)]
pub struct Cli {
    /// API access and pagination.
    #[clap(flatten)]
    pub api: ApiConfig,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Initializes tracing with environment-based filtering.
    ///
    /// Logs go to stderr so command output on stdout stays valid JSON.
    pub fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    /// Logs configuration at debug level (no sensitive information).
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_CONFIG,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            features = ?Self::enabled_features(),
            "Build information"
        );

        self.api.log();
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;
    use crate::command::{ItemsCommand, WebhookCommand};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_api_flags_before_the_command() {
        let cli = Cli::try_parse_from([
            "monday",
            "--api-token",
            "token",
            "--page-size",
            "25",
            "boards",
            "list",
        ])
        .unwrap();

        assert_eq!(cli.api.page_size, 25);
        assert!(matches!(cli.command, Command::Boards(_)));
    }

    #[test]
    fn parses_item_creation_with_column_inputs() {
        let cli = Cli::try_parse_from([
            "monday",
            "items",
            "create",
            "--board",
            "42",
            "--name",
            "Ship it",
            "--columns",
            r#"[{"columnId":"status","statusLabel":"Done"}]"#,
        ])
        .unwrap();

        let Command::Items(ItemsCommand::Create(args)) = cli.command else {
            panic!("expected items create");
        };
        assert_eq!(args.board, "42");
        assert!(args.group.is_none());
        assert_eq!(args.columns.0[0].column_id, "status");
    }

    #[test]
    fn rejects_malformed_column_inputs() {
        let result = Cli::try_parse_from([
            "monday", "items", "create", "--board", "42", "--name", "x", "--columns", "{",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn webhook_serve_uses_server_defaults() {
        let cli = Cli::try_parse_from(["monday", "webhook", "serve", "--port", "8080"]).unwrap();

        let Command::Webhook(WebhookCommand::Serve(args)) = cli.command else {
            panic!("expected webhook serve");
        };
        assert_eq!(args.server.port, 8080);
        assert_eq!(args.webhook.path, "/webhook");
        assert!(args.server.validate().is_ok());
    }
}
