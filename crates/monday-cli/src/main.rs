#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod command;
mod config;
mod server;

use std::process;

use crate::config::Cli;

// Tracing target constants
pub const TRACING_TARGET_SERVER_STARTUP: &str = "monday_cli::server::startup";
pub const TRACING_TARGET_SERVER_SHUTDOWN: &str = "monday_cli::server::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "monday_cli::config";
pub const TRACING_TARGET_COMMAND: &str = "monday_cli::command";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_COMMAND,
            error = %error,
            "command failed"
        );
    }

    eprintln!("Error: {error:#}");
    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    Cli::init_tracing();
    cli.log();

    cli.command.run(&cli.api).await
}
