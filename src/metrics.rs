//! Metrics recording hooks
//!
//! Implemented via `tracing` events with a `metric` field, so any subscriber
//! (pretty, JSON, or a log shipper) picks them up without a metrics backend.

use std::time::Duration;

/// Record a dataset load.
pub fn record_dataset_loaded(path: &str, rows: usize) {
    tracing::info!(
        metric = "dataset_rows",
        path = path,
        rows = rows,
        "dataset loaded"
    );
}

/// Record one batch delivered to the sink.
pub fn record_batch_flushed(batch_id: u64, records: usize, dur: Duration) {
    tracing::debug!(
        metric = "batch_flushed",
        batch_id = batch_id,
        records = records,
        latency_ms = dur.as_millis() as u64,
        "batch delivered to sink"
    );
}

/// Record the relay's running total of forwarded records.
pub fn record_records_relayed(total: u64) {
    tracing::debug!(
        metric = "records_relayed",
        total = total,
        "records relayed"
    );
}

/// Record a dashboard frame render.
pub fn record_frame_rendered(tab: &str, dur: Duration) {
    tracing::trace!(
        metric = "frame_render_us",
        tab = tab,
        render_us = dur.as_micros() as u64,
        "frame rendered"
    );
}
