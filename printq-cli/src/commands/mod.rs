pub mod config;
pub mod console;
pub mod submit;

use anyhow::{Context, Result};
use printq_config::OutputConfig;
use printq_output::{build_sinks, FanoutSink, OutputSink};
use std::sync::Arc;

/// Combine the configured destinations, plus `extra`, behind one sink
pub(crate) async fn output_sink(
    config: &OutputConfig,
    extra: Option<Arc<dyn OutputSink>>,
) -> Result<Arc<dyn OutputSink>> {
    let mut fanout = FanoutSink::new(
        build_sinks(config)
            .await
            .context("Failed to open output destinations")?,
    );
    if let Some(sink) = extra {
        fanout.push(sink);
    }
    Ok(Arc::new(fanout))
}
