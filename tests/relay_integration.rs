//! Integration tests for the stream relay: ordering, batching, decoding and
//! console output across several trigger windows.

use std::time::Duration;

use dexstream::config::RelayConfig;
use dexstream::{CollectingSink, ConsoleSink, Relay, RelayStats, StreamRecord};

fn relay(ms: u64) -> Relay {
    Relay::new(&RelayConfig {
        trigger_interval_ms: ms,
        ..RelayConfig::default()
    })
}

#[tokio::test(start_paused = true)]
async fn test_records_arrive_in_order_across_batches() {
    let (tx, rx) = futures::channel::mpsc::unbounded::<StreamRecord>();
    let sink = CollectingSink::new();
    let handle = relay(500).spawn(rx, sink.clone());

    for window in 0..4 {
        for i in 0..3 {
            tx.unbounded_send(StreamRecord::from(format!("w{window}-r{i}").as_str()))
                .expect("test: send");
        }
        tokio::time::sleep(Duration::from_millis(700)).await;
    }
    drop(tx);

    let stats = handle.await.expect("test: join").expect("test: run");
    assert_eq!(stats, RelayStats { batches: 4, records: 12 });

    let batches = sink.batches();
    let ids: Vec<u64> = batches.iter().map(|(id, _)| *id).collect();
    assert_eq!(ids, vec![0, 1, 2, 3]);
    assert!(batches.iter().all(|(_, records)| !records.is_empty()));

    let expected: Vec<String> = (0..4)
        .flat_map(|w| (0..3).map(move |i| format!("w{w}-r{i}")))
        .collect();
    assert_eq!(sink.records(), expected);
}

#[tokio::test(start_paused = true)]
async fn test_console_output_has_numbered_headers_and_raw_lines() {
    let source = futures::stream::iter(vec![
        StreamRecord::from("{\"id\": 1, \"name\": \"Bulbasaur\"}"),
        StreamRecord::new(vec![b'b', b'a', b'd', 0xFE]),
    ]);
    let mut sink = ConsoleSink::with_writer(Vec::new());
    relay(1000).run(source, &mut sink).await.expect("test: run");

    let text = String::from_utf8(sink.into_inner()).expect("test: utf8 output");
    assert!(text.contains("Batch: 0\n"));
    assert!(text.contains("{\"id\": 1, \"name\": \"Bulbasaur\"}\n"));
    assert!(text.contains("bad\u{FFFD}\n"));
    assert!(!text.contains("Batch: 1"));
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_mid_stream_still_flushes() {
    let (tx, rx) = futures::channel::mpsc::unbounded::<StreamRecord>();
    for text in ["one", "two"] {
        tx.unbounded_send(text.into()).expect("test: send");
    }

    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let sink = CollectingSink::new();
    let mut writer = sink.clone();
    let task = tokio::spawn(async move {
        relay(10_000)
            .run_until(rx, &mut writer, async {
                let _ = stop_rx.await;
            })
            .await
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    stop_tx.send(()).expect("test: stop");
    let stats = task.await.expect("test: join").expect("test: run");

    assert_eq!(stats.batches, 1);
    assert_eq!(sink.records(), vec!["one", "two"]);
    drop(tx);
}
