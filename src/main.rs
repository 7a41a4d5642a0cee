mod cli;
mod config;
mod error;
mod event;
mod logging;
mod notifier;
mod relay;
mod types;
mod utils;

use anyhow::Context;
use clap::Parser;
use std::io::Read;
use tracing::info;

use cli::Cli;
use config::Config;
use event::{SAMPLE_EVENT, parse_event};
use notifier::Notifier;
use types::{InboundEvent, InvocationContext, Outcome, SkipReason};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    logging::init(logging::LogSettings {
        verbose: cli.verbose,
        cloud_logging: config.cloud_logging,
    });

    let event = read_event(&cli)?;
    let ctx =
        InvocationContext::resolve(cli.event_id.as_deref(), cli.timestamp.as_deref(), &event);

    if cli.dry_run {
        if let Some(body) = relay::render_dry_run(&event, &config.channel)? {
            println!("{}", body);
        }
        return Ok(());
    }

    let notifier = Notifier::new(config.require_webhook_url()?, config.timeout)?;
    match relay::handle_event(&event, &ctx, &config.channel, &notifier).await {
        Ok(Outcome::Delivered) => {
            info!("GKE upgrade notification is successfully processed");
            Ok(())
        }
        Ok(Outcome::Skipped(reason)) => {
            info!("Event {} skipped: {}", ctx.event_id, describe_skip(&reason));
            Ok(())
        }
        Err(e) => Err(e).with_context(|| format!("failed to relay event {}", ctx.event_id)),
    }
}

fn read_event(cli: &Cli) -> anyhow::Result<InboundEvent> {
    if cli.sample {
        return parse_event(SAMPLE_EVENT);
    }

    let raw = match cli.event_file.as_deref() {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read event from stdin")?;
            buf
        }
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read event file '{}'", path))?,
    };
    parse_event(&raw)
}

fn describe_skip(reason: &SkipReason) -> String {
    match reason {
        SkipReason::NoData => "no data in event".to_string(),
        SkipReason::UnsupportedType(type_url) => format!("unsupported type {}", type_url),
    }
}
