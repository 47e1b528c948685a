//! Delivering encoded batches over a byte stream

use printq_core::Batch;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::protocol::encode;

/// Write `batch` to `writer` in wire format, then shut the stream down.
///
/// Shutting down signals end-of-input to the reader; the writer is dropped on
/// return either way, so a child never waits on a half-open pipe.
pub async fn write_batch<W>(mut writer: W, batch: &Batch) -> std::io::Result<usize>
where
    W: AsyncWrite + Unpin,
{
    let payload = encode(batch);
    writer.write_all(payload.as_bytes()).await?;
    writer.flush().await?;
    writer.shutdown().await?;

    debug!(jobs = batch.len(), bytes = payload.len(), "Batch written");
    Ok(payload.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use printq_core::{Category, JobRecord, Priority};
    use tokio::io::AsyncReadExt;

    #[tokio::test]
    async fn test_write_batch_closes_stream() {
        let (client, mut server) = tokio::io::duplex(8);
        let batch = Batch::single(JobRecord::new(1, 10, Category::Newspaper, Priority::High));

        // Tiny buffer forces the writer and reader to interleave
        let writer = tokio::spawn(async move { write_batch(client, &batch).await });

        let mut received = String::new();
        server.read_to_string(&mut received).await.unwrap();

        assert_eq!(writer.await.unwrap().unwrap(), received.len());
        assert_eq!(received, "1\n1\n10\n1\n1\n");
    }

    #[tokio::test]
    async fn test_write_batch_reports_closed_reader() {
        let (client, server) = tokio::io::duplex(4);
        drop(server);

        let batch = Batch::single(JobRecord::new(1, 10, Category::Newspaper, Priority::High));
        assert!(write_batch(client, &batch).await.is_err());
    }
}
