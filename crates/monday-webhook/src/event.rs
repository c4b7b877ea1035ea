//! Events received from monday.com.

use jiff::Timestamp;
use monday_core::ColumnType;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// One webhook delivery, as handed to the workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookEvent {
    /// Identifier assigned when the delivery was received.
    pub request_id: Uuid,
    pub received_at: Timestamp,
    /// The posted JSON, unchanged.
    pub body: Value,
}

impl WebhookEvent {
    /// Wraps a posted body, stamping it with a new id and the current time.
    pub fn new(body: Value) -> Self {
        Self {
            request_id: Uuid::now_v7(),
            received_at: Timestamp::now(),
            body,
        }
    }

    /// Returns the typed view of the body's `event` member, if it has one.
    pub fn monday_event(&self) -> Option<MondayEvent> {
        let event = self.body.get("event")?;
        serde_json::from_value(event.clone()).ok()
    }
}

/// The `event` member of a monday.com webhook body.
///
/// Only `type` is always present; the rest depends on the subscription.
/// Members without a field here are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MondayEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    /// Item id; monday.com still calls items pulses here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pulse_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pulse_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_type: Option<ColumnType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_value: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
