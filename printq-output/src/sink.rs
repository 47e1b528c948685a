//! Output sink trait

use async_trait::async_trait;

use crate::errors::SinkError;
use crate::line::OutputLine;

/// Append-only destination for child output lines.
///
/// Implementations are called from both reader tasks of a session at once.
/// Each call must land the whole line; lines from one channel arrive in the
/// order the child wrote them, but the two channels may interleave.
#[async_trait]
pub trait OutputSink: Send + Sync {
    async fn append_line(&self, line: OutputLine) -> Result<(), SinkError>;

    /// Short name used in logs
    fn name(&self) -> &str;
}
