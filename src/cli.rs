use clap::Parser;

#[derive(Parser)]
#[command(name = "gke-upgrade-notify")]
#[command(about = "Relay GKE cluster upgrade notifications from Pub/Sub to a Slack webhook")]
pub struct Cli {
    /// Path to the event JSON ("-" or omitted reads stdin)
    pub event_file: Option<String>,

    /// Message id of the triggering event, for logging
    #[arg(long)]
    pub event_id: Option<String>,

    /// Publish time of the triggering event (ISO-8601), for logging
    #[arg(long)]
    pub timestamp: Option<String>,

    /// Use the built-in sample upgrade event
    #[arg(long)]
    pub sample: bool,

    /// Print the webhook body instead of posting it
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
