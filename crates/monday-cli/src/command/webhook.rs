use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use clap::{Args, Subcommand};
use monday_webhook::{ChannelSink, WebhookConfig, WebhookEvent, routes};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::{TRACING_TARGET_SERVER_SHUTDOWN, TRACING_TARGET_SERVER_STARTUP};
use crate::config::ServerConfig;
use crate::server::serve_http;

#[derive(Debug, Clone, Subcommand)]
pub enum WebhookCommand {
    /// Serve the endpoint and print every received event as a JSON line.
    Serve(ServeArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    #[clap(flatten)]
    pub server: ServerConfig,

    #[clap(flatten)]
    pub webhook: WebhookConfig,
}

impl WebhookCommand {
    pub async fn run(self) -> anyhow::Result<()> {
        match self {
            Self::Serve(args) => args.run().await,
        }
    }
}

impl ServeArgs {
    async fn run(self) -> anyhow::Result<()> {
        self.server
            .validate()
            .context("invalid server configuration")?;
        self.webhook
            .validate()
            .context("invalid webhook configuration")?;
        self.server.log();

        let (sink, receiver) = ChannelSink::new(self.server.queue_capacity);
        let router = routes(&self.webhook, Arc::new(sink));
        let consumer = tokio::spawn(print_events(receiver));

        tracing::info!(
            target: TRACING_TARGET_SERVER_STARTUP,
            path = %self.webhook.path,
            "Webhook endpoint mounted"
        );

        let drain_timeout = self.server.shutdown_timeout();
        serve_http(router, self.server).await?;

        // The router held the last sender; the consumer ends once the queue is empty.
        drain(consumer, drain_timeout).await
    }
}

/// Waits up to `limit` for the consumer to print the events queued before shutdown.
async fn drain(consumer: JoinHandle<anyhow::Result<()>>, limit: Duration) -> anyhow::Result<()> {
    match tokio::time::timeout(limit, consumer).await {
        Ok(joined) => joined.context("event consumer panicked")?,
        Err(_) => {
            tracing::warn!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                timeout_secs = limit.as_secs(),
                "Event queue not drained before the shutdown timeout"
            );
            bail!("queued webhook events were dropped after {}s", limit.as_secs())
        }
    }
}

/// Prints events as JSON lines until every sender is gone.
async fn print_events(mut receiver: mpsc::Receiver<WebhookEvent>) -> anyhow::Result<()> {
    while let Some(event) = receiver.recv().await {
        let mut stdout = io::stdout().lock();
        serde_json::to_writer(&mut stdout, &event).context("failed to serialize event")?;
        writeln!(stdout).context("failed to write event")?;
        stdout.flush().context("failed to flush event")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn drain_waits_for_queued_events() {
        let (sender, receiver) = mpsc::channel(4);
        sender.send(WebhookEvent::new(json!({ "a": 1 }))).await.unwrap();
        drop(sender);

        let consumer = tokio::spawn(print_events(receiver));
        assert!(drain(consumer, Duration::from_secs(5)).await.is_ok());
    }

    #[tokio::test]
    async fn drain_gives_up_after_the_timeout() {
        let (_sender, receiver) = mpsc::channel::<WebhookEvent>(4);

        let consumer = tokio::spawn(print_events(receiver));
        let error = drain(consumer, Duration::from_millis(20)).await.unwrap_err();
        assert!(error.to_string().contains("dropped"));
    }
}
