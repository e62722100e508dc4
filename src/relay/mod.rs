//! # Stage: Stream Relay
//!
//! ## Responsibility
//! Forward records from one broker topic to an output sink as text:
//! ```text
//! NatsSource(topic) ──StreamRecord──▶ Relay buffer ──every trigger──▶ RecordSink
//! ```
//!
//! ## Guarantees
//! - Delivery order equals arrival order from the transport
//! - Decoding never fails: invalid UTF-8 is replaced, not rejected
//! - Batches are numbered from 0 and never empty
//! - Buffered records are flushed once more when the source ends
//!
//! ## NOT Responsible For
//! - Acknowledgement, retry or replay (delegated to the broker)
//! - Transformation, filtering or deduplication of records

pub mod runner;
pub mod sink;

#[cfg(feature = "nats")]
pub mod nats;

pub use runner::{Relay, RelayStats};
pub use sink::{CollectingSink, ConsoleSink, RecordSink};

#[cfg(feature = "nats")]
pub use nats::NatsSource;

use thiserror::Error;

/// Errors raised by the relay.
#[derive(Error, Debug)]
pub enum RelayError {
    /// Could not connect to the broker.
    #[error("broker connection error: {0}")]
    Connection(String),

    /// Could not subscribe to the topic.
    #[error("broker subscribe error: {0}")]
    Subscribe(String),

    /// The sink rejected a batch.
    #[error("sink error: {0}")]
    Sink(String),
}

/// An opaque payload received from the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamRecord {
    payload: Vec<u8>,
}

impl StreamRecord {
    /// Wraps a raw payload.
    pub fn new(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            payload: payload.into(),
        }
    }

    /// The raw bytes.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Decodes the payload as UTF-8, replacing invalid sequences with U+FFFD.
    pub fn into_text(self) -> String {
        match String::from_utf8(self.payload) {
            Ok(text) => text,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        }
    }
}

impl From<&str> for StreamRecord {
    fn from(value: &str) -> Self {
        Self::new(value.as_bytes())
    }
}
