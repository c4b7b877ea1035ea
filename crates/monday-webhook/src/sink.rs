//! Destinations for received events.

use monday_core::{Error, Result};
use tokio::sync::mpsc;

use crate::WebhookEvent;

/// Receives the events the endpoint accepts.
///
/// An error makes the endpoint answer with a failure status, so monday.com
/// retries the delivery.
#[async_trait::async_trait]
pub trait WorkflowSink: Send + Sync {
    async fn emit(&self, event: WebhookEvent) -> Result<()>;
}

/// Forwards events into a bounded tokio channel.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: mpsc::Sender<WebhookEvent>,
}

impl ChannelSink {
    /// Creates a sink and the receiver its events arrive on.
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<WebhookEvent>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, receiver)
    }
}

#[async_trait::async_trait]
impl WorkflowSink for ChannelSink {
    async fn emit(&self, event: WebhookEvent) -> Result<()> {
        self.sender.send(event).await.map_err(|_| {
            Error::network_error().with_message("workflow receiver has been dropped")
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn forwards_into_the_channel() {
        let (sink, mut receiver) = ChannelSink::new(4);
        sink.emit(WebhookEvent::new(json!({ "a": 1 }))).await.unwrap();

        let event = receiver.recv().await.unwrap();
        assert_eq!(event.body, json!({ "a": 1 }));
    }

    #[tokio::test]
    async fn closed_receiver_is_an_error() {
        let (sink, receiver) = ChannelSink::new(1);
        drop(receiver);

        let error = sink.emit(WebhookEvent::new(json!({}))).await.unwrap_err();
        assert!(error.is_transient());
    }
}
