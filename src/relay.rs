use tracing::{debug, error, info, warn};

use crate::error::RelayError;
use crate::event::interpret;
use crate::notifier::{Notifier, SlackMessage};
use crate::types::{InboundEvent, Interpretation, InvocationContext, Outcome};

/// Interpret one event and deliver it.
///
/// Every failure is logged here together with the original event and then
/// handed back to the caller, which owns retry and exit-code policy.
pub async fn handle_event(
    event: &InboundEvent,
    ctx: &InvocationContext,
    channel: &str,
    notifier: &Notifier,
) -> Result<Outcome, RelayError> {
    info!(
        "Incoming messageId {} published at {}",
        ctx.event_id, ctx.timestamp
    );
    debug!("Event: {:?}", event);

    let result = relay(event, channel, notifier).await;
    if let Err(e) = &result {
        error!(
            "Failed to process the GKE upgrade event {}: {:?}",
            ctx.event_id, event
        );
        error!("{}", e);
        if e.is_retryable() {
            warn!("Delivery of {} may succeed if retried", ctx.event_id);
        }
    }
    result
}

async fn relay(
    event: &InboundEvent,
    channel: &str,
    notifier: &Notifier,
) -> Result<Outcome, RelayError> {
    match interpret(event, channel)? {
        Interpretation::Skip(reason) => Ok(Outcome::Skipped(reason)),
        Interpretation::Notify(notification) => {
            notifier.notify(&notification).await?;
            Ok(Outcome::Delivered)
        }
    }
}

/// Webhook body an event would produce, or `None` when it would be skipped.
pub fn render_dry_run(event: &InboundEvent, channel: &str) -> anyhow::Result<Option<String>> {
    match interpret(event, channel)? {
        Interpretation::Notify(notification) => {
            let message = SlackMessage::from_notification(&notification);
            Ok(Some(serde_json::to_string_pretty(&message)?))
        }
        Interpretation::Skip(reason) => {
            info!("Nothing to send: {:?}", reason);
            Ok(None)
        }
    }
}
