//! In-memory pub/sub implementation.
//!
//! Works within a single process only.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use tokio::sync::{RwLock, broadcast};

use quill_core::ports::{PubSub, PubSubError, PubSubMessage, Subscription};

/// In-memory pub/sub system backed by one broadcast channel per topic.
pub struct InMemoryPubSub {
    channels: Arc<RwLock<HashMap<String, broadcast::Sender<String>>>>,
    buffer_size: usize,
}

impl InMemoryPubSub {
    pub fn new(buffer_size: usize) -> Self {
        Self {
            channels: Arc::new(RwLock::new(HashMap::new())),
            buffer_size: buffer_size.max(1),
        }
    }
}

impl Default for InMemoryPubSub {
    fn default() -> Self {
        Self::new(100)
    }
}

#[async_trait]
impl PubSub for InMemoryPubSub {
    async fn publish(&self, channel: &str, message: &str) -> Result<(), PubSubError> {
        let channels = self.channels.read().await;

        match channels.get(channel) {
            // A send error only means nobody is listening right now.
            Some(sender) => match sender.send(message.to_string()) {
                Ok(receivers) => {
                    tracing::debug!(channel = %channel, receivers, "Message published");
                }
                Err(_) => tracing::debug!(channel = %channel, "No subscribers for channel"),
            },
            None => tracing::debug!(channel = %channel, "No subscribers for channel"),
        }

        Ok(())
    }

    async fn subscribe(&self, channel: &str) -> Result<Subscription, PubSubError> {
        let mut channels = self.channels.write().await;

        let sender = channels
            .entry(channel.to_string())
            .or_insert_with(|| broadcast::channel(self.buffer_size).0);

        let receiver = sender.subscribe();
        let channel_name = channel.to_string();
        tracing::info!(channel = %channel_name, "Subscribed to channel");

        let stream = futures::stream::unfold(
            (receiver, channel_name),
            |(mut receiver, channel_name)| async move {
                loop {
                    match receiver.recv().await {
                        Ok(payload) => {
                            let msg = PubSubMessage {
                                channel: channel_name.clone(),
                                payload,
                            };
                            return Some((msg, (receiver, channel_name)));
                        }
                        Err(broadcast::error::RecvError::Lagged(count)) => {
                            tracing::warn!(
                                channel = %channel_name,
                                lagged = count,
                                "Subscriber lagged behind"
                            );
                        }
                        Err(broadcast::error::RecvError::Closed) => {
                            tracing::info!(channel = %channel_name, "Channel closed");
                            return None;
                        }
                    }
                }
            },
        );

        Ok(stream.boxed())
    }
}
