//! In-process change feed over a broadcast channel.

use crate::live::domain::{ChangeEvent, Topic};
use crate::live::ports::{ChangeFeed, ChangeFeedResult, FeedSubscription};
use async_trait::async_trait;
use std::collections::HashSet;
use tokio::sync::broadcast;

const DEFAULT_CAPACITY: usize = 256;

/// Change feed that fans events out to in-process subscribers.
///
/// Serves as both the test double and the reference implementation of the
/// feed port. A slow subscriber that falls more than the channel capacity
/// behind loses the oldest events; because consumers re-fetch rather than
/// patch, a lost event degrades to an extra refresh at worst.
#[derive(Debug, Clone)]
pub struct InMemoryChangeFeed {
    sender: broadcast::Sender<ChangeEvent>,
}

impl InMemoryChangeFeed {
    /// Creates a feed with the default buffer capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a feed with an explicit buffer capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publishes an event to every open subscription.
    ///
    /// Publishing with no subscribers is a no-op rather than an error.
    pub fn publish(&self, event: ChangeEvent) {
        let _subscribers = self.sender.send(event);
    }
}

impl Default for InMemoryChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChangeFeed for InMemoryChangeFeed {
    async fn subscribe(&self, topics: &[Topic]) -> ChangeFeedResult<Box<dyn FeedSubscription>> {
        Ok(Box::new(InMemoryFeedSubscription {
            receiver: self.sender.subscribe(),
            topics: topics.iter().copied().collect(),
        }))
    }
}

struct InMemoryFeedSubscription {
    receiver: broadcast::Receiver<ChangeEvent>,
    topics: HashSet<Topic>,
}

#[async_trait]
impl FeedSubscription for InMemoryFeedSubscription {
    async fn next_event(&mut self) -> Option<ChangeEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if self.topics.contains(&event.topic) => return Some(event),
                Ok(_) => {}
                // Missed events are recovered by the next snapshot fetch.
                Err(broadcast::error::RecvError::Lagged(_)) => {}
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
