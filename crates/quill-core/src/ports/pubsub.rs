//! Pub/Sub port - change notification for post queries.

use async_trait::async_trait;
use futures::stream::BoxStream;

/// Message received from a channel.
#[derive(Debug, Clone)]
pub struct PubSubMessage {
    pub channel: String,
    pub payload: String,
}

/// Live stream of messages on one channel. Dropping it unsubscribes.
pub type Subscription = BoxStream<'static, PubSubMessage>;

/// Pub/Sub trait - abstraction over pub/sub backends.
#[async_trait]
pub trait PubSub: Send + Sync {
    /// Publish a message to a channel.
    async fn publish(&self, channel: &str, message: &str) -> Result<(), PubSubError>;

    /// Register an observer on a channel.
    async fn subscribe(&self, channel: &str) -> Result<Subscription, PubSubError>;
}

/// Pub/Sub errors.
#[derive(Debug, thiserror::Error)]
pub enum PubSubError {
    #[error("Failed to publish: {0}")]
    PublishError(String),

    #[error("Failed to subscribe: {0}")]
    SubscribeError(String),
}
