//! Runtime configuration, loaded from environment variables.

use anyhow::{Context, Result};
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    /// Slack incoming webhook URL. Optional only for dry runs.
    pub webhook_url: Option<String>,

    /// Channel the notification is posted to (e.g. "#gke-upgrades" or "@user")
    pub channel: String,

    /// Emit structured JSON logs for a cloud log agent
    pub cloud_logging: bool,

    /// Upper bound on the webhook request
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let timeout_secs = match lookup("WEBHOOK_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("WEBHOOK_TIMEOUT_SECS is not a number: {}", raw))?;
                if secs == 0 {
                    anyhow::bail!("WEBHOOK_TIMEOUT_SECS must be greater than zero");
                }
                secs
            }
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            webhook_url: lookup("SLACK_WEBHOOK_URL").filter(|v| !v.is_empty()),
            channel: lookup("SLACK_NOTIFICATION_CHANNEL")
                .filter(|v| !v.is_empty())
                .context("SLACK_NOTIFICATION_CHANNEL must be set")?,
            cloud_logging: lookup("CLOUD_LOGGING_ENABLED").as_deref() == Some("yes"),
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Webhook URL for a real delivery.
    pub fn require_webhook_url(&self) -> Result<&str> {
        self.webhook_url
            .as_deref()
            .context("SLACK_WEBHOOK_URL must be set")
    }
}
