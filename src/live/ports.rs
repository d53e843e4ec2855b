//! Port contracts for change feeds and snapshot reads.

use super::domain::{ChangeEvent, TaskSnapshot, Topic};
use crate::roster::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for change feed operations.
pub type ChangeFeedResult<T> = Result<T, ChangeFeedError>;

/// Result type for snapshot reads.
pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Source of row-change notifications.
///
/// Delivery is at-least-once and carries no payload; consumers respond to
/// an event by re-fetching through a [`SnapshotSource`], never by patching
/// local state from the event itself.
#[async_trait]
pub trait ChangeFeed: Send + Sync {
    /// Opens a subscription scoped to the given topics.
    ///
    /// # Errors
    ///
    /// Returns [`ChangeFeedError::FeedClosed`] when the feed has shut
    /// down.
    async fn subscribe(&self, topics: &[Topic]) -> ChangeFeedResult<Box<dyn FeedSubscription>>;
}

/// An open, topic-scoped stream of change events.
#[async_trait]
pub trait FeedSubscription: Send {
    /// Waits for the next event on a subscribed topic.
    ///
    /// Returns `None` once the feed has shut down; dropping the
    /// subscription releases it.
    async fn next_event(&mut self) -> Option<ChangeEvent>;
}

/// Authoritative, principal-scoped read of the dashboard working set.
///
/// Each fetch returns the full visible set as of the read; callers
/// replace their cache wholesale rather than merging.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Fetches the tasks and submissions visible to a principal.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] when the underlying store cannot serve
    /// the read; callers treat this as transient.
    async fn fetch(&self, principal: UserId) -> SnapshotResult<TaskSnapshot>;
}

/// Errors returned by change feed implementations.
#[derive(Debug, Clone, Error)]
pub enum ChangeFeedError {
    /// The feed has shut down and accepts no further subscriptions.
    #[error("change feed is closed")]
    FeedClosed,

    /// Transport-layer failure.
    #[error("change feed transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl ChangeFeedError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}

/// Errors returned by snapshot sources.
#[derive(Debug, Clone, Error)]
pub enum SnapshotError {
    /// The principal behind the session no longer resolves.
    #[error("principal not found: {0}")]
    PrincipalNotFound(UserId),

    /// The underlying store could not serve the read.
    #[error("snapshot fetch failed: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl SnapshotError {
    /// Wraps a store error.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
