//! Line readers for a child's output pipes

use printq_output::{Channel, OutputLine, OutputSink, SinkError};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, BufReader};
use tracing::{debug, warn};
use uuid::Uuid;

/// Longest line forwarded as one [`OutputLine`]; longer runs are split
pub const MAX_LINE_BYTES: usize = 64 * 1024;

/// What a reader saw before its pipe closed
#[derive(Debug)]
pub struct DrainOutcome {
    pub channel: Channel,
    pub lines: usize,
    pub read_error: Option<std::io::Error>,
}

/// Read `reader` line by line until end of stream, forwarding each line to
/// `sink` tagged with `channel`.
///
/// Reading continues after sink failures so the child never blocks on a full
/// pipe. A closed sink stops forwarding for the rest of the stream. Lines
/// longer than [`MAX_LINE_BYTES`] are forwarded in pieces of at most that size.
pub async fn drain_lines<R>(
    reader: R,
    channel: Channel,
    session_id: Uuid,
    sink: Arc<dyn OutputSink>,
) -> DrainOutcome
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::with_capacity(256);
    let mut lines = 0usize;
    let mut forwarding = true;

    loop {
        buf.clear();
        let read = (&mut reader)
            .take(MAX_LINE_BYTES as u64)
            .read_until(b'\n', &mut buf)
            .await;
        match read {
            Ok(0) => break,
            Ok(_) => {
                lines += 1;
                if !forwarding {
                    continue;
                }
                let line = OutputLine::new(session_id, channel, line_text(&buf));
                match sink.append_line(line).await {
                    Ok(()) => {}
                    Err(SinkError::Closed { sink: name }) => {
                        warn!(
                            "Sink '{}' closed; discarding further {} output of session {}",
                            name, channel, session_id
                        );
                        forwarding = false;
                    }
                    Err(e) => {
                        warn!("Failed to deliver {} line of session {}: {}", channel, session_id, e);
                    }
                }
            }
            Err(e) => {
                warn!("Error reading {} of session {}: {}", channel, session_id, e);
                return DrainOutcome {
                    channel,
                    lines,
                    read_error: Some(e),
                };
            }
        }
    }

    debug!("{} of session {} closed after {} lines", channel, session_id, lines);
    DrainOutcome {
        channel,
        lines,
        read_error: None,
    }
}

/// Strip the line terminator and decode lossily
fn line_text(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}

/// Reader that yields `prefix` and then fails every read
#[cfg(test)]
pub(crate) struct FailingReader {
    prefix: &'static [u8],
}

#[cfg(test)]
impl FailingReader {
    pub(crate) fn new(prefix: &'static [u8]) -> Self {
        Self { prefix }
    }
}

#[cfg(test)]
impl AsyncRead for FailingReader {
    fn poll_read(
        mut self: std::pin::Pin<&mut Self>,
        _cx: &mut std::task::Context<'_>,
        buf: &mut tokio::io::ReadBuf<'_>,
    ) -> std::task::Poll<std::io::Result<()>> {
        if self.prefix.is_empty() {
            return std::task::Poll::Ready(Err(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "pipe reset",
            )));
        }
        let n = self.prefix.len().min(buf.remaining());
        buf.put_slice(&self.prefix[..n]);
        self.prefix = &self.prefix[n..];
        std::task::Poll::Ready(Ok(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use printq_output::TranscriptSink;
    use tokio::io::AsyncWriteExt;

    #[test]
    fn test_line_text_strips_terminators() {
        assert_eq!(line_text(b"plain\n"), "plain");
        assert_eq!(line_text(b"windows\r\n"), "windows");
        assert_eq!(line_text(b"unterminated"), "unterminated");
        assert_eq!(line_text(b"\n"), "");
    }

    #[test]
    fn test_line_text_replaces_invalid_utf8() {
        assert_eq!(line_text(b"ok \xff\n"), "ok \u{FFFD}");
    }

    #[tokio::test]
    async fn test_drain_keeps_lines_whole_and_ordered() {
        let (mut writer, reader) = tokio::io::duplex(16);
        let transcript = Arc::new(TranscriptSink::new(100));
        let sink: Arc<dyn OutputSink> = transcript.clone();
        let session = Uuid::new_v4();

        let drain = tokio::spawn(drain_lines(reader, Channel::Stderr, session, sink));
        writer
            .write_all(b"first line is longer than the pipe\nsecond\nlast")
            .await
            .unwrap();
        drop(writer);

        let outcome = drain.await.unwrap();
        assert_eq!(outcome.lines, 3);
        assert!(outcome.read_error.is_none());

        let texts: Vec<String> = transcript.lines().into_iter().map(|l| l.text).collect();
        assert_eq!(texts, vec!["first line is longer than the pipe", "second", "last"]);
        assert!(transcript
            .lines()
            .iter()
            .all(|l| l.channel == Channel::Stderr && l.session_id == session));
    }

    #[tokio::test]
    async fn test_drain_splits_overlong_lines() {
        let (mut writer, reader) = tokio::io::duplex(4096);
        let transcript = Arc::new(TranscriptSink::new(10));
        let sink: Arc<dyn OutputSink> = transcript.clone();

        let drain = tokio::spawn(drain_lines(reader, Channel::Stdout, Uuid::new_v4(), sink));
        let long = vec![b'a'; 2 * MAX_LINE_BYTES + 100];
        writer.write_all(&long).await.unwrap();
        writer.write_all(b"\ntail\n").await.unwrap();
        drop(writer);

        let outcome = drain.await.unwrap();
        assert_eq!(outcome.lines, 4);
        let lengths: Vec<usize> = transcript.lines().iter().map(|l| l.text.len()).collect();
        assert_eq!(lengths, vec![MAX_LINE_BYTES, MAX_LINE_BYTES, 100, 4]);
    }

    #[tokio::test]
    async fn test_drain_reports_read_error() {
        let transcript = Arc::new(TranscriptSink::new(10));
        let sink: Arc<dyn OutputSink> = transcript.clone();
        let reader = FailingReader::new(b"before failure\n");

        let outcome = drain_lines(reader, Channel::Stderr, Uuid::new_v4(), sink).await;
        assert_eq!(outcome.lines, 1);
        let error = outcome.read_error.unwrap();
        assert_eq!(error.kind(), std::io::ErrorKind::ConnectionReset);
        assert_eq!(transcript.lines()[0].text, "before failure");
    }

    #[tokio::test]
    async fn test_drain_empty_stream() {
        let (writer, reader) = tokio::io::duplex(16);
        drop(writer);
        let sink: Arc<dyn OutputSink> = Arc::new(TranscriptSink::new(10));
        let outcome = drain_lines(reader, Channel::Stdout, Uuid::new_v4(), sink).await;
        assert_eq!(outcome.lines, 0);
    }
}
