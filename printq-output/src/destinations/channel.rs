//! Channel handoff to a single consumer

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::{errors::SinkError, line::OutputLine, sink::OutputSink};

/// Forwards lines to whoever holds the paired receiver.
///
/// Producers never touch consumer-owned state; the receiver drains lines in
/// the order they were appended.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: mpsc::UnboundedSender<OutputLine>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<OutputLine>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl OutputSink for ChannelSink {
    async fn append_line(&self, line: OutputLine) -> Result<(), SinkError> {
        self.sender.send(line).map_err(|_| SinkError::Closed {
            sink: self.name().to_string(),
        })
    }

    fn name(&self) -> &str {
        "channel"
    }
}
