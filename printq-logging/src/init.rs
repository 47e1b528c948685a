use anyhow::Result;
use printq_config::{LogFormat, LoggingConfig};
use tracing_subscriber::EnvFilter;

/// Filter for `level`, falling back to `RUST_LOG`, then to `info`
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber described by `config`.
///
/// A second call is a no-op; the first subscriber stays in place.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(config.level.as_str());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Text => builder.try_init(),
    };

    if installed.is_err() {
        tracing::debug!("Global tracing subscriber already initialized, skipping");
    }

    Ok(())
}
