//! Append child output to a log file

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File, OpenOptions};
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::sync::Mutex;
use tracing::debug;

use crate::{errors::SinkError, line::OutputLine, sink::OutputSink};

/// File destination.
///
/// Every line is written as `<rfc3339 timestamp> <session> <channel> <text>`
/// and flushed immediately so the log can be tailed while a session runs.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
}

impl FileSink {
    /// Open `path`, creating parent directories. With `append` false an
    /// existing file is truncated.
    pub async fn open(path: impl AsRef<Path>, append: bool) -> Result<Self, SinkError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let mut options = OpenOptions::new();
        options.create(true);
        if append {
            options.append(true);
        } else {
            options.write(true).truncate(true);
        }
        let file = options.open(&path).await?;
        debug!(path = %path.display(), append, "Opened output file");

        Ok(Self {
            path,
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl OutputSink for FileSink {
    async fn append_line(&self, line: OutputLine) -> Result<(), SinkError> {
        let record = format!(
            "{} {} {} {}\n",
            line.received_at.to_rfc3339(),
            line.session_id,
            line.channel,
            line.text
        );

        let mut writer = self.writer.lock().await;
        writer.write_all(record.as_bytes()).await?;
        writer.flush().await?;
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}
