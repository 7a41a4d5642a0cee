use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::RelayError;
use crate::utils::required_str;

/// A Pub/Sub message carrying a GKE cluster notification.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InboundEvent {
    #[serde(default)]
    pub attributes: Map<String, Value>,
    /// Base64-encoded detail message. Absent means there is nothing to relay.
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default, rename = "messageId")]
    pub message_id: Option<String>,
    #[serde(default, rename = "publishTime")]
    pub publish_time: Option<String>,
}

/// `attributes.payload` of an upgrade notification.
///
/// Held as a raw map. Only the keys a notification uses are checked.
#[derive(Debug, Clone, Default)]
pub struct UpgradePayload {
    fields: Map<String, Value>,
}

impl UpgradePayload {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// A required string field, e.g. `currentVersion`.
    pub fn required(&self, key: &str) -> Result<String, RelayError> {
        required_str(&self.fields, key, || format!("payload.{}", key))
    }

    /// Operation id, only used for logging.
    pub fn operation(&self) -> Option<&str> {
        self.fields.get("operation").and_then(Value::as_str)
    }
}

/// Chat-ready form of an event, built once per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedNotification {
    pub channel: String,
    pub title: String,
    pub fields: Vec<(String, String)>,
}

/// Who triggered this invocation, used only for logging.
#[derive(Debug, Clone)]
pub struct InvocationContext {
    pub event_id: String,
    pub timestamp: String,
}

impl InvocationContext {
    /// Explicit values win, then the message's own `messageId`/`publishTime`,
    /// then `"local"` and the current UTC time.
    pub fn resolve(
        event_id: Option<&str>,
        timestamp: Option<&str>,
        event: &InboundEvent,
    ) -> Self {
        Self {
            event_id: event_id
                .or(event.message_id.as_deref())
                .unwrap_or("local")
                .to_string(),
            timestamp: timestamp
                .or(event.publish_time.as_deref())
                .map(str::to_string)
                .unwrap_or_else(|| chrono::Utc::now().to_rfc3339()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NoData,
    UnsupportedType(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interpretation {
    Notify(NormalizedNotification),
    Skip(SkipReason),
}

/// Result of a relay invocation that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Delivered,
    Skipped(SkipReason),
}
