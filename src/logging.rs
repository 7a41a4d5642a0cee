use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy)]
pub struct LogSettings {
    pub verbose: bool,
    pub cloud_logging: bool,
}

fn env_filter(verbose: bool) -> EnvFilter {
    let filter = if verbose { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter))
}

/// Install the process-wide subscriber. Call once, before any relay work.
pub fn init(settings: LogSettings) {
    if settings.cloud_logging {
        // One JSON object per line on stdout, picked up by the cloud log agent
        tracing_subscriber::fmt()
            .with_env_filter(env_filter(settings.verbose))
            .with_target(false)
            .json()
            .flatten_event(true)
            .with_writer(std::io::stdout)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter(settings.verbose))
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}
