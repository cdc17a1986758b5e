use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn env_filter(log_level: &str) -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level))
}

/// Install the global subscriber. Events are written as JSON to stderr, which
/// the plugin host captures; stdout stays free for the host protocol.
pub fn init_tracing(provider_name: &str, log_level: &str) {
    if let Err(e) = try_init_tracing(provider_name, log_level) {
        eprintln!(
            "Failed to initialize tracing for provider '{}': {}",
            provider_name, e
        );
    }
}

pub fn try_init_tracing(
    provider_name: &str,
    log_level: &str,
) -> Result<(), tracing_subscriber::util::TryInitError> {
    tracing_subscriber::registry()
        .with(env_filter(log_level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_file(true)
                .with_line_number(true)
                .json()
                .flatten_event(true),
        )
        .try_init()?;

    tracing::debug!(provider = provider_name, "Tracing initialized");
    Ok(())
}
