//! Micro-batching loop between a record stream and a sink.
//!
//! Records are buffered as they arrive. On every trigger tick a non-empty
//! buffer is handed to the sink as one numbered batch. The loop ends when
//! the source ends or the shutdown future resolves, after a final flush.

use std::future::Future;
use std::time::{Duration, Instant};

use futures::{Stream, StreamExt};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use super::{RecordSink, RelayError, StreamRecord};
use crate::config::RelayConfig;

/// Totals reported when a relay run finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelayStats {
    /// Batches delivered to the sink.
    pub batches: u64,
    /// Records delivered to the sink.
    pub records: u64,
}

/// Forwards records from one topic to a sink on a fixed trigger.
#[derive(Debug, Clone)]
pub struct Relay {
    topic: String,
    broker_url: String,
    trigger_interval: Duration,
}

impl Relay {
    /// Builds a relay from its configuration section.
    pub fn new(config: &RelayConfig) -> Self {
        Self {
            topic: config.topic.clone(),
            broker_url: config.broker_url.clone(),
            trigger_interval: config.trigger_interval(),
        }
    }

    /// Topic the relay reads.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Broker the relay connects to.
    pub fn broker_url(&self) -> &str {
        &self.broker_url
    }

    /// Interval between sink deliveries.
    pub fn trigger_interval(&self) -> Duration {
        self.trigger_interval
    }

    /// Runs until `source` ends.
    ///
    /// # Errors
    /// The first [`RelayError::Sink`] returned by `sink`.
    pub async fn run<S, K>(&self, source: S, sink: &mut K) -> Result<RelayStats, RelayError>
    where
        S: Stream<Item = StreamRecord>,
        K: RecordSink + ?Sized,
    {
        self.run_until(source, sink, std::future::pending::<()>())
            .await
    }

    /// Runs until `source` ends or `shutdown` resolves, whichever is first.
    ///
    /// Records already buffered at that point are still delivered.
    ///
    /// # Errors
    /// The first [`RelayError::Sink`] returned by `sink`.
    pub async fn run_until<S, K, F>(
        &self,
        source: S,
        sink: &mut K,
        shutdown: F,
    ) -> Result<RelayStats, RelayError>
    where
        S: Stream<Item = StreamRecord>,
        K: RecordSink + ?Sized,
        F: Future<Output = ()>,
    {
        let mut source = std::pin::pin!(source);
        let mut shutdown = std::pin::pin!(shutdown);

        let mut ticker = tokio::time::interval_at(
            tokio::time::Instant::now() + self.trigger_interval,
            self.trigger_interval,
        );
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut buffer: Vec<String> = Vec::new();
        let mut stats = RelayStats::default();

        info!(
            topic = %self.topic,
            broker = %self.broker_url,
            interval_ms = self.trigger_interval.as_millis() as u64,
            "relay started"
        );

        loop {
            tokio::select! {
                item = source.next() => match item {
                    Some(record) => buffer.push(record.into_text()),
                    None => {
                        debug!("source ended");
                        break;
                    }
                },
                _ = ticker.tick() => {
                    flush(&mut buffer, &mut stats, sink).await?;
                }
                _ = &mut shutdown => {
                    info!("relay shutdown requested");
                    break;
                }
            }
        }

        flush(&mut buffer, &mut stats, sink).await?;
        info!(batches = stats.batches, records = stats.records, "relay stopped");
        Ok(stats)
    }

    /// Runs the relay on its own task until `source` ends.
    pub fn spawn<S, K>(self, source: S, mut sink: K) -> JoinHandle<Result<RelayStats, RelayError>>
    where
        S: Stream<Item = StreamRecord> + Send + 'static,
        K: RecordSink + 'static,
    {
        tokio::spawn(async move { self.run(source, &mut sink).await })
    }
}

/// Delivers the buffer as the next batch. Empty buffers produce no batch.
async fn flush<K>(
    buffer: &mut Vec<String>,
    stats: &mut RelayStats,
    sink: &mut K,
) -> Result<(), RelayError>
where
    K: RecordSink + ?Sized,
{
    if buffer.is_empty() {
        return Ok(());
    }

    let batch = std::mem::take(buffer);
    let batch_id = stats.batches;
    let started = Instant::now();

    sink.write_batch(batch_id, &batch).await?;

    stats.batches += 1;
    stats.records += batch.len() as u64;
    crate::metrics::record_batch_flushed(batch_id, batch.len(), started.elapsed());
    crate::metrics::record_records_relayed(stats.records);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::CollectingSink;
    use async_trait::async_trait;

    fn relay_with_interval(ms: u64) -> Relay {
        Relay::new(&RelayConfig {
            trigger_interval_ms: ms,
            ..RelayConfig::default()
        })
    }

    fn records(texts: &[&str]) -> Vec<StreamRecord> {
        texts.iter().map(|t| StreamRecord::from(*t)).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_finite_source_is_flushed_as_one_batch_in_order() {
        let relay = relay_with_interval(1000);
        let mut sink = CollectingSink::new();
        let stats = relay
            .run(futures::stream::iter(records(&["a", "b", "c"])), &mut sink)
            .await
            .expect("test: run");

        assert_eq!(stats, RelayStats { batches: 1, records: 3 });
        assert_eq!(sink.batches(), vec![(0, vec!["a".into(), "b".into(), "c".into()])]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_source_produces_no_batches() {
        let relay = relay_with_interval(1000);
        let mut sink = CollectingSink::new();
        let stats = relay
            .run(futures::stream::empty(), &mut sink)
            .await
            .expect("test: run");
        assert_eq!(stats.batches, 0);
        assert!(sink.batches().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_trigger_splits_batches_and_numbers_from_zero() {
        let (tx, rx) = futures::channel::mpsc::unbounded::<StreamRecord>();
        let sink = CollectingSink::new();
        let handle = relay_with_interval(1000).spawn(rx, sink.clone());

        tx.unbounded_send("first".into()).expect("test: send");
        tx.unbounded_send("second".into()).expect("test: send");
        tokio::time::sleep(Duration::from_millis(1500)).await;

        tx.unbounded_send("third".into()).expect("test: send");
        drop(tx);

        let stats = handle.await.expect("test: join").expect("test: run");
        assert_eq!(stats, RelayStats { batches: 2, records: 3 });
        assert_eq!(
            sink.batches(),
            vec![
                (0, vec!["first".to_string(), "second".to_string()]),
                (1, vec!["third".to_string()]),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_windows_emit_nothing() {
        let (tx, rx) = futures::channel::mpsc::unbounded::<StreamRecord>();
        let sink = CollectingSink::new();
        let handle = relay_with_interval(100).spawn(rx, sink.clone());

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert!(sink.batches().is_empty());

        tx.unbounded_send("late".into()).expect("test: send");
        tokio::time::sleep(Duration::from_millis(150)).await;
        drop(tx);

        handle.await.expect("test: join").expect("test: run");
        assert_eq!(sink.batches(), vec![(0, vec!["late".to_string()])]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_flushes_buffered_records() {
        let (tx, rx) = futures::channel::mpsc::unbounded::<StreamRecord>();
        tx.unbounded_send("pending".into()).expect("test: send");

        let relay = relay_with_interval(60_000);
        let mut sink = CollectingSink::new();
        let shutdown = tokio::time::sleep(Duration::from_millis(10));
        let stats = relay
            .run_until(rx, &mut sink, shutdown)
            .await
            .expect("test: run");

        assert_eq!(stats.records, 1);
        assert_eq!(sink.records(), vec!["pending"]);
        drop(tx);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_utf8_is_relayed_with_replacement() {
        let relay = relay_with_interval(1000);
        let mut sink = CollectingSink::new();
        let source = futures::stream::iter(vec![StreamRecord::new(vec![0xC3, 0x28])]);
        relay.run(source, &mut sink).await.expect("test: run");
        assert_eq!(sink.records(), vec!["\u{FFFD}("]);
    }

    struct RejectingSink;

    #[async_trait]
    impl RecordSink for RejectingSink {
        async fn write_batch(&mut self, _: u64, _: &[String]) -> Result<(), RelayError> {
            Err(RelayError::Sink("rejected".into()))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_sink_error_stops_the_relay() {
        let relay = relay_with_interval(1000);
        let result = relay
            .run(futures::stream::iter(records(&["x"])), &mut RejectingSink)
            .await;
        assert!(matches!(result, Err(RelayError::Sink(_))));
    }

    #[test]
    fn test_relay_new_copies_config() {
        let relay = Relay::new(&RelayConfig::default());
        assert_eq!(relay.topic(), "processed-data-topic");
        assert_eq!(relay.trigger_interval(), Duration::from_millis(1000));
        assert_eq!(relay.broker_url(), "nats://nats:4222");
    }
}
