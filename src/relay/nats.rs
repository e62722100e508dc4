//! NATS subscription feeding the relay.
//!
//! ## Responsibility
//! Connect to the broker and expose one subject as a stream of
//! [`StreamRecord`]s carrying the untouched message payloads.
//!
//! ## Guarantees
//! - Connection and subscription failures surface as [`RelayError`], never panic
//! - Messages are yielded in the order the client receives them
//!
//! ## NOT Responsible For
//! - Decoding payloads (see: [`StreamRecord::into_text`])
//! - Durable offsets (JetStream consumers would be a separate layer)

use async_nats::Client;
use futures::stream::BoxStream;
use futures::StreamExt;
use tracing::info;

use super::{RelayError, StreamRecord};

/// Connected NATS client used as the relay's source.
///
/// # Example
///
/// ```no_run
/// use dexstream::relay::NatsSource;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let source = NatsSource::connect("nats://localhost:4222").await?;
/// let records = source.subscribe("processed-data-topic").await?;
/// # drop(records);
/// # Ok(())
/// # }
/// ```
pub struct NatsSource {
    client: Client,
    broker_url: String,
}

impl NatsSource {
    /// Connect to a NATS server.
    ///
    /// # Errors
    /// [`RelayError::Connection`] when the server is unreachable.
    pub async fn connect(broker_url: &str) -> Result<Self, RelayError> {
        let client = async_nats::connect(broker_url).await.map_err(|e| {
            RelayError::Connection(format!("failed to connect to NATS at {broker_url}: {e}"))
        })?;

        info!(url = broker_url, "connected to NATS");

        Ok(Self {
            client,
            broker_url: broker_url.to_string(),
        })
    }

    /// Subscribe to `topic`, yielding each message payload as a record.
    ///
    /// # Errors
    /// [`RelayError::Subscribe`] when the server rejects the subscription.
    pub async fn subscribe(
        &self,
        topic: &str,
    ) -> Result<BoxStream<'static, StreamRecord>, RelayError> {
        let subscriber = self
            .client
            .subscribe(topic.to_string())
            .await
            .map_err(|e| RelayError::Subscribe(format!("subscribe to {topic} failed: {e}")))?;

        info!(subject = topic, url = %self.broker_url, "subscribed");

        Ok(subscriber
            .map(|message| StreamRecord::new(message.payload.to_vec()))
            .boxed())
    }

    /// The configured broker URL.
    pub fn broker_url(&self) -> &str {
        &self.broker_url
    }
}
