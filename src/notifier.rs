//! Slack incoming-webhook delivery.
//!
//! Renders a [`NormalizedNotification`] in Slack's attachment format and
//! POSTs it once. Delivery is at-most-once: nothing here retries.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, error, info};

use crate::error::RelayError;
use crate::types::NormalizedNotification;

const USERNAME: &str = "GKE Notifications";
const ICON_EMOJI: &str = ":kubernetes:";
const ATTACHMENT_COLOR: &str = "#9733EE";

#[derive(Debug, Serialize)]
pub struct SlackMessage<'a> {
    pub username: &'a str,
    pub icon_emoji: &'a str,
    pub channel: &'a str,
    pub attachments: Vec<SlackAttachment<'a>>,
}

#[derive(Debug, Serialize)]
pub struct SlackAttachment<'a> {
    pub color: &'a str,
    pub fields: Vec<SlackField<'a>>,
}

#[derive(Debug, Serialize)]
pub struct SlackField<'a> {
    pub title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<&'a str>,
    // Slack accepts the string form; kept as sent historically.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short: Option<&'a str>,
}

impl<'a> SlackMessage<'a> {
    pub fn from_notification(notification: &'a NormalizedNotification) -> Self {
        let mut fields = Vec::with_capacity(notification.fields.len() + 1);
        fields.push(SlackField {
            title: &notification.title,
            value: None,
            short: None,
        });
        for (label, value) in &notification.fields {
            fields.push(SlackField {
                title: label,
                value: Some(value.as_str()),
                short: Some("false"),
            });
        }

        SlackMessage {
            username: USERNAME,
            icon_emoji: ICON_EMOJI,
            channel: &notification.channel,
            attachments: vec![SlackAttachment {
                color: ATTACHMENT_COLOR,
                fields,
            }],
        }
    }
}

/// Posts notifications to a single webhook URL.
#[derive(Clone)]
pub struct Notifier {
    client: reqwest::Client,
    webhook_url: String,
}

impl Notifier {
    pub fn new(webhook_url: impl Into<String>, timeout: Duration) -> Result<Self, RelayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            webhook_url: webhook_url.into(),
        })
    }

    pub async fn notify(&self, notification: &NormalizedNotification) -> Result<(), RelayError> {
        let message = SlackMessage::from_notification(notification);

        let response = self
            .client
            .post(&self.webhook_url)
            .json(&message)
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            error!(
                "Failed to send the notification to slack: HTTP {} {}",
                status.as_u16(),
                body
            );
            if let Ok(json) = serde_json::to_string(&message) {
                debug!("Rejected payload: {}", json);
            }
            return Err(RelayError::Delivery {
                status: status.as_u16(),
                body,
            });
        }

        info!("GKE upgrade notification delivered to {}", notification.channel);
        Ok(())
    }
}
