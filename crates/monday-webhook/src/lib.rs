#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod event;
mod response;
mod router;
mod sink;

pub use config::{DEFAULT_WEBHOOK_PATH, WebhookConfig};
pub use event::{MondayEvent, WebhookEvent};
pub use response::ErrorResponse;
pub use router::{RouterObservabilityExt, routes};
pub use sink::{ChannelSink, WorkflowSink};

/// Tracing target for webhook deliveries.
pub const TRACING_TARGET: &str = "monday_webhook";
