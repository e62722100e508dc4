//! Output sinks for the relay.
//!
//! ## Responsibility
//! Deliver one numbered batch of decoded records at a time. The console sink
//! prints every record on its own line without truncation.
//!
//! ## Guarantees
//! - Records are written in the order they are given
//! - Write failures surface as [`RelayError::Sink`], never a panic

use std::fmt::Write as _;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use super::RelayError;

/// Destination for relayed records.
#[async_trait]
pub trait RecordSink: Send {
    /// Delivers one batch. `records` is never empty.
    async fn write_batch(&mut self, batch_id: u64, records: &[String]) -> Result<(), RelayError>;
}

const RULE: &str = "-------------------------------------------";

/// Append-only console output.
///
/// ```text
/// -------------------------------------------
/// Batch: 0
/// -------------------------------------------
/// first record
/// second record
/// ```
///
/// Output goes through tokio's async writers.
#[derive(Debug)]
pub struct ConsoleSink<W: AsyncWrite + Unpin + Send = tokio::io::Stdout> {
    out: W,
}

impl ConsoleSink<tokio::io::Stdout> {
    /// Sink writing to standard output.
    pub fn stdout() -> Self {
        Self {
            out: tokio::io::stdout(),
        }
    }
}

impl<W: AsyncWrite + Unpin + Send> ConsoleSink<W> {
    /// Sink writing to an arbitrary writer.
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    /// Consumes the sink, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Formats one batch exactly as it appears on the console.
fn format_batch(batch_id: u64, records: &[String]) -> String {
    let capacity = records.iter().map(|r| r.len() + 1).sum::<usize>() + 3 * RULE.len() + 32;
    let mut text = String::with_capacity(capacity);
    // Writing into a String cannot fail.
    let _ = writeln!(text, "{RULE}\nBatch: {batch_id}\n{RULE}");
    for record in records {
        text.push_str(record);
        text.push('\n');
    }
    text.push('\n');
    text
}

#[async_trait]
impl<W: AsyncWrite + Unpin + Send> RecordSink for ConsoleSink<W> {
    async fn write_batch(&mut self, batch_id: u64, records: &[String]) -> Result<(), RelayError> {
        let text = format_batch(batch_id, records);
        let result = match self.out.write_all(text.as_bytes()).await {
            Ok(()) => self.out.flush().await,
            Err(e) => Err(e),
        };
        result.map_err(|e| RelayError::Sink(format!("console write failed for batch {batch_id}: {e}")))
    }
}

/// Sink that keeps every batch in memory; clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    batches: Arc<Mutex<Vec<(u64, Vec<String>)>>>,
}

impl CollectingSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the batches received so far.
    pub fn batches(&self) -> Vec<(u64, Vec<String>)> {
        self.batches
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// All records received so far, flattened in delivery order.
    pub fn records(&self) -> Vec<String> {
        self.batches()
            .into_iter()
            .flat_map(|(_, records)| records)
            .collect()
    }
}

#[async_trait]
impl RecordSink for CollectingSink {
    async fn write_batch(&mut self, batch_id: u64, records: &[String]) -> Result<(), RelayError> {
        let mut guard = self
            .batches
            .lock()
            .map_err(|_| RelayError::Sink("collecting sink poisoned".to_string()))?;
        guard.push((batch_id, records.to_vec()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_console_sink_formats_batch() {
        let mut sink = ConsoleSink::with_writer(Vec::new());
        sink.write_batch(3, &["alpha".to_string(), "beta".to_string()])
            .await
            .expect("test: write");
        let text = String::from_utf8(sink.into_inner()).expect("test: utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "Batch: 3");
        assert_eq!(&lines[3..5], &["alpha", "beta"]);
    }

    #[tokio::test]
    async fn test_console_sink_does_not_truncate() {
        let long = "x".repeat(10_000);
        let mut sink = ConsoleSink::with_writer(Vec::new());
        sink.write_batch(0, &[long.clone()]).await.expect("test: write");
        let text = String::from_utf8(sink.into_inner()).expect("test: utf8");
        assert!(text.lines().any(|l| l == long));
    }

    struct FailingWriter;

    impl AsyncWrite for FailingWriter {
        fn poll_write(
            self: std::pin::Pin<&mut Self>,
            _cx: &mut std::task::Context<'_>,
            _buf: &[u8],
        ) -> std::task::Poll<std::io::Result<usize>> {
            std::task::Poll::Ready(Err(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "closed",
            )))
        }

        fn poll_flush(
            self: std::pin::Pin<&mut Self>,
            _cx: &mut std::task::Context<'_>,
        ) -> std::task::Poll<std::io::Result<()>> {
            std::task::Poll::Ready(Ok(()))
        }

        fn poll_shutdown(
            self: std::pin::Pin<&mut Self>,
            _cx: &mut std::task::Context<'_>,
        ) -> std::task::Poll<std::io::Result<()>> {
            std::task::Poll::Ready(Ok(()))
        }
    }

    #[tokio::test]
    async fn test_console_sink_write_failure_is_sink_error() {
        let mut sink = ConsoleSink::with_writer(FailingWriter);
        let result = sink.write_batch(0, &["a".to_string()]).await;
        assert!(matches!(result, Err(RelayError::Sink(_))));
    }

    #[test]
    fn test_format_batch_layout() {
        let text = format_batch(7, &["a".to_string(), "b".to_string()]);
        assert_eq!(text, format!("{RULE}\nBatch: 7\n{RULE}\na\nb\n\n"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_console_sink_writes_through_async_duplex() {
        let (writer, mut reader) = tokio::io::duplex(64);
        let task = tokio::spawn(async move {
            let mut sink = ConsoleSink::with_writer(writer);
            let records: Vec<String> = (0..200).map(|i| format!("record-{i}")).collect();
            sink.write_batch(0, &records).await
        });

        let mut out = Vec::new();
        tokio::io::AsyncReadExt::read_to_end(&mut reader, &mut out)
            .await
            .expect("test: read");
        task.await.expect("test: join").expect("test: write");

        let text = String::from_utf8(out).expect("test: utf8");
        assert!(text.contains("Batch: 0\n"));
        assert!(text.contains("record-199\n"));
    }

    #[tokio::test]
    async fn test_collecting_sink_clones_share_storage() {
        let sink = CollectingSink::new();
        let mut writer = sink.clone();
        writer
            .write_batch(0, &["a".to_string()])
            .await
            .expect("test: write");
        writer
            .write_batch(1, &["b".to_string(), "c".to_string()])
            .await
            .expect("test: write");
        assert_eq!(sink.batches().len(), 2);
        assert_eq!(sink.records(), vec!["a", "b", "c"]);
    }
}
