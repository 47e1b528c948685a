//! Bounded in-memory transcript

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use crate::{errors::SinkError, line::OutputLine, sink::OutputSink};

/// Keeps the most recent `limit` lines; the oldest line is dropped first.
#[derive(Debug)]
pub struct TranscriptSink {
    limit: usize,
    lines: Mutex<VecDeque<OutputLine>>,
}

impl TranscriptSink {
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
            lines: Mutex::new(VecDeque::new()),
        }
    }

    /// Copy of the retained lines, oldest first
    pub fn lines(&self) -> Vec<OutputLine> {
        self.guard().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.guard().len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard().is_empty()
    }

    pub fn clear(&self) {
        self.guard().clear();
    }

    fn guard(&self) -> MutexGuard<'_, VecDeque<OutputLine>> {
        // A panicking appender cannot leave a half-written line behind
        self.lines.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl OutputSink for TranscriptSink {
    async fn append_line(&self, line: OutputLine) -> Result<(), SinkError> {
        let mut lines = self.guard();
        if lines.len() == self.limit {
            lines.pop_front();
        }
        lines.push_back(line);
        Ok(())
    }

    fn name(&self) -> &str {
        "transcript"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::Channel;
    use std::sync::Arc;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_transcript_drops_oldest() {
        let sink = TranscriptSink::new(2);
        let id = Uuid::new_v4();
        for text in ["a", "b", "c"] {
            sink.append_line(OutputLine::new(id, Channel::Stdout, text)).await.unwrap();
        }

        let texts: Vec<String> = sink.lines().into_iter().map(|l| l.text).collect();
        assert_eq!(texts, vec!["b", "c"]);
    }

    #[tokio::test]
    async fn test_clear() {
        let sink = TranscriptSink::new(10);
        sink.append_line(OutputLine::new(Uuid::new_v4(), Channel::Stderr, "x"))
            .await
            .unwrap();
        sink.clear();
        assert!(sink.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_appends_keep_per_channel_order() {
        let sink = Arc::new(TranscriptSink::new(10_000));
        let id = Uuid::new_v4();

        let mut handles = Vec::new();
        for channel in [Channel::Stdout, Channel::Stderr] {
            let sink = Arc::clone(&sink);
            handles.push(tokio::spawn(async move {
                for n in 0..500 {
                    sink.append_line(OutputLine::new(id, channel, format!("{channel}-{n}")))
                        .await
                        .unwrap();
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let lines = sink.lines();
        assert_eq!(lines.len(), 1000);
        for channel in [Channel::Stdout, Channel::Stderr] {
            let seen: Vec<String> = lines
                .iter()
                .filter(|l| l.channel == channel)
                .map(|l| l.text.clone())
                .collect();
            let expected: Vec<String> = (0..500).map(|n| format!("{channel}-{n}")).collect();
            assert_eq!(seen, expected);
        }
    }
}
