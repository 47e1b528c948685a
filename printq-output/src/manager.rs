//! Combining several destinations behind one sink

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use printq_config::{DestinationConfig, OutputConfig};

use crate::{
    destinations::{ConsoleSink, FileSink},
    errors::SinkError,
    line::OutputLine,
    sink::OutputSink,
};

/// Delivers each line to every inner sink, in registration order.
///
/// A failing sink does not stop delivery to the others; the first error is
/// returned once all sinks have been tried.
#[derive(Default)]
pub struct FanoutSink {
    sinks: Vec<Arc<dyn OutputSink>>,
}

impl FanoutSink {
    pub fn new(sinks: Vec<Arc<dyn OutputSink>>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: Arc<dyn OutputSink>) {
        self.sinks.push(sink);
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

#[async_trait]
impl OutputSink for FanoutSink {
    async fn append_line(&self, line: OutputLine) -> Result<(), SinkError> {
        let mut first_error = None;
        for sink in &self.sinks {
            if let Err(e) = sink.append_line(line.clone()).await {
                warn!(sink = sink.name(), "Failed to deliver output line: {}", e);
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn name(&self) -> &str {
        "fanout"
    }
}

/// Build the destinations listed in the output configuration
pub async fn build_sinks(config: &OutputConfig) -> Result<Vec<Arc<dyn OutputSink>>, SinkError> {
    let mut sinks: Vec<Arc<dyn OutputSink>> = Vec::with_capacity(config.destinations.len());

    for destination in &config.destinations {
        match destination {
            DestinationConfig::Console { show_channel } => {
                sinks.push(Arc::new(ConsoleSink::new(*show_channel)));
            }
            DestinationConfig::File { path, append } => {
                let sink = FileSink::open(path, *append).await?;
                info!(path = %sink.path().display(), "Added file output destination");
                sinks.push(Arc::new(sink));
            }
        }
    }

    Ok(sinks)
}
