use anyhow::Context;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::RelayError;
use crate::types::{InboundEvent, Interpretation, NormalizedNotification, SkipReason};
use crate::utils::{decode_data, parse_payload, required_attribute};

pub const UPGRADE_TITLE: &str = "GKE Cluster Upgrade Notification :zap:";

/// Sample upgrade notification, as published by GKE.
pub const SAMPLE_EVENT: &str = include_str!("../fixtures/upgrade_event.json");

/// Parse a Pub/Sub message, unwrapping a push-subscription envelope if present.
pub fn parse_event(raw: &str) -> anyhow::Result<InboundEvent> {
    let value: Value = serde_json::from_str(raw).context("event is not valid JSON")?;
    let message = match value {
        Value::Object(mut map)
            if !map.contains_key("attributes")
                && map.get("message").is_some_and(Value::is_object) =>
        {
            map.remove("message").unwrap_or_default()
        }
        other => other,
    };
    serde_json::from_value(message).context("event is not a Pub/Sub message")
}

/// Notification classes this relay knows how to format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Upgrade,
}

impl EventKind {
    pub fn from_type_url(type_url: &str) -> Option<Self> {
        if type_url.contains("UpgradeEvent") {
            Some(EventKind::Upgrade)
        } else {
            None
        }
    }
}

/// Turn an inbound event into a notification for `channel`, or decide to skip it.
pub fn interpret(event: &InboundEvent, channel: &str) -> Result<Interpretation, RelayError> {
    let Some(data) = event.data.as_deref() else {
        info!("No event was passed in, nothing to do");
        return Ok(Interpretation::Skip(SkipReason::NoData));
    };

    let attributes = &event.attributes;
    let cluster = required_attribute(attributes, "cluster_name")?;
    let payload = parse_payload(attributes)?;
    let resource_type = payload.required("resourceType")?;
    let location = required_attribute(attributes, "cluster_location")?;
    let message = decode_data(data)?;
    let project = required_attribute(attributes, "project_id")?;
    let type_url = required_attribute(attributes, "type_url")?;

    match EventKind::from_type_url(&type_url) {
        Some(EventKind::Upgrade) => {
            let current_version = payload.required("currentVersion")?;
            let target_version = payload.required("targetVersion")?;
            let start_time = payload.required("operationStartTime")?;
            debug!(
                "Upgrade of {} in {} from {} to {} (operation {})",
                cluster,
                location,
                current_version,
                target_version,
                payload.operation().unwrap_or("unknown")
            );

            Ok(Interpretation::Notify(NormalizedNotification {
                channel: channel.to_string(),
                title: UPGRADE_TITLE.to_string(),
                fields: vec![
                    ("Project ID".to_string(), project),
                    ("Cluster".to_string(), cluster),
                    ("Location".to_string(), location),
                    ("Update Type".to_string(), resource_type),
                    ("Current Version".to_string(), current_version),
                    ("Target Version".to_string(), target_version),
                    ("Start Time".to_string(), start_time),
                    ("Details".to_string(), message),
                ],
            }))
        }
        None => {
            info!("Skipping event {}", type_url);
            Ok(Interpretation::Skip(SkipReason::UnsupportedType(type_url)))
        }
    }
}
