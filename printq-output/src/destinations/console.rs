//! Mirror child output onto this process's standard streams

use async_trait::async_trait;
use tokio::io::{AsyncWriteExt, Stderr, Stdout};
use tokio::sync::Mutex;

use crate::{
    errors::SinkError,
    line::{Channel, OutputLine},
    sink::OutputSink,
};

/// Writes child stdout lines to our stdout and child stderr lines to our
/// stderr. Each line is written under a lock so two readers never split a line.
#[derive(Debug)]
pub struct ConsoleSink {
    show_channel: bool,
    stdout: Mutex<Stdout>,
    stderr: Mutex<Stderr>,
}

impl ConsoleSink {
    pub fn new(show_channel: bool) -> Self {
        Self {
            show_channel,
            stdout: Mutex::new(tokio::io::stdout()),
            stderr: Mutex::new(tokio::io::stderr()),
        }
    }

    fn render(&self, line: &OutputLine) -> String {
        if self.show_channel {
            format!("[{}] {}\n", line.channel, line.text)
        } else {
            format!("{}\n", line.text)
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new(false)
    }
}

#[async_trait]
impl OutputSink for ConsoleSink {
    async fn append_line(&self, line: OutputLine) -> Result<(), SinkError> {
        let rendered = self.render(&line);
        match line.channel {
            Channel::Stdout => {
                let mut out = self.stdout.lock().await;
                out.write_all(rendered.as_bytes()).await?;
                out.flush().await?;
            }
            Channel::Stderr => {
                let mut err = self.stderr.lock().await;
                err.write_all(rendered.as_bytes()).await?;
                err.flush().await?;
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
