//! Dashboard session controller.
//!
//! A session is the stateful heart of a live dashboard: it owns the
//! cached working set for one principal, refreshes it from a
//! [`SnapshotSource`] when the change feed reports writes, and re-derives
//! statuses on a countdown so a task flips to overdue by elapsed time
//! alone. Reads stay served from the previous snapshot while a refresh is
//! in flight.

use super::domain::{SessionState, TaskSnapshot, TaskView, Topic, ViewFilter};
use super::ports::{FeedSubscription, SnapshotSource};
use crate::roster::domain::UserId;
use crate::task::domain::TaskId;
use mockable::Clock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use thiserror::Error;
use tokio::task::{AbortHandle, JoinHandle};
use tokio::time::MissedTickBehavior;

/// Design-value period between status re-derivations.
pub const COUNTDOWN_PERIOD: Duration = Duration::from_secs(60);

/// Error returned when an operation reaches a closed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("dashboard session is closed")]
pub struct SessionClosed;

#[derive(Debug)]
struct SessionInner {
    state: SessionState,
    views: Vec<TaskView>,
}

impl Default for SessionInner {
    fn default() -> Self {
        Self {
            state: SessionState::Loading,
            views: Vec::new(),
        }
    }
}

/// Live dashboard session for one principal.
///
/// Cheap to share: spawn helpers take `Arc<Self>` and the session keeps
/// the abort handles of every task it spawned, tearing them down in
/// [`DashboardSession::close`].
pub struct DashboardSession<S, C>
where
    S: SnapshotSource,
    C: Clock,
{
    source: Arc<S>,
    clock: Arc<C>,
    user: UserId,
    inner: Mutex<SessionInner>,
    dirty: AtomicBool,
    refreshing: AtomicBool,
    workers: Mutex<Vec<AbortHandle>>,
}

impl<S, C> DashboardSession<S, C>
where
    S: SnapshotSource,
    C: Clock + Send + Sync,
{
    /// Creates a session in the loading state; nothing is fetched until
    /// the first [`DashboardSession::refresh`].
    #[must_use]
    pub fn new(source: Arc<S>, clock: Arc<C>, user: UserId) -> Self {
        Self {
            source,
            clock,
            user,
            inner: Mutex::new(SessionInner::default()),
            dirty: AtomicBool::new(false),
            refreshing: AtomicBool::new(false),
            workers: Mutex::new(Vec::new()),
        }
    }

    fn lock_inner(&self) -> MutexGuard<'_, SessionInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_workers(&self) -> MutexGuard<'_, Vec<AbortHandle>> {
        self.workers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the principal the session serves.
    #[must_use]
    pub const fn user(&self) -> UserId {
        self.user
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.lock_inner().state
    }

    /// Re-fetches the working set, coalescing concurrent calls.
    ///
    /// This is the single entry point for both the event trigger and any
    /// manual reload. Calls arriving while a fetch is in flight mark the
    /// session dirty and return; the in-flight caller drains the flag
    /// with at most one follow-up fetch, so a burst of triggers never
    /// queues unboundedly.
    ///
    /// A transient fetch failure keeps the previous working set and is
    /// logged, not propagated; the next trigger retries naturally.
    ///
    /// # Errors
    ///
    /// Returns [`SessionClosed`] once the session has been closed.
    pub async fn refresh(&self) -> Result<(), SessionClosed> {
        if self.state() == SessionState::Closed {
            return Err(SessionClosed);
        }
        self.dirty.store(true, Ordering::SeqCst);
        if self.refreshing.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        loop {
            while self.dirty.swap(false, Ordering::SeqCst) {
                if self.state() == SessionState::Closed {
                    self.refreshing.store(false, Ordering::SeqCst);
                    return Err(SessionClosed);
                }
                self.fetch_and_install().await;
            }
            self.refreshing.store(false, Ordering::SeqCst);
            // A caller may have marked the session dirty after the final
            // drain but before the release; reclaim the fetch role rather
            // than dropping that trigger.
            if self.dirty.load(Ordering::SeqCst)
                && !self.refreshing.swap(true, Ordering::SeqCst)
            {
                continue;
            }
            return Ok(());
        }
    }

    async fn fetch_and_install(&self) {
        {
            let mut inner = self.lock_inner();
            if inner.state == SessionState::Ready {
                inner.state = SessionState::Refreshing;
            }
        }
        match self.source.fetch(self.user).await {
            Ok(snapshot) => {
                let now = self.clock.utc();
                let views = build_views(&snapshot, self.user, now);
                let mut inner = self.lock_inner();
                if inner.state == SessionState::Closed {
                    return;
                }
                inner.views = views;
                inner.state = SessionState::Ready;
            }
            Err(err) => {
                tracing::warn!(
                    principal = %self.user,
                    error = %err,
                    "snapshot fetch failed, keeping cached working set"
                );
                let mut inner = self.lock_inner();
                if inner.state == SessionState::Refreshing {
                    inner.state = SessionState::Ready;
                }
            }
        }
    }

    /// Re-derives every cached status at the current instant.
    ///
    /// No fetch happens; the countdown exists purely so that a task whose
    /// due instant has passed since the last refresh flips to overdue.
    pub fn tick(&self) {
        let now = self.clock.utc();
        let mut inner = self.lock_inner();
        if !matches!(inner.state, SessionState::Ready | SessionState::Refreshing) {
            return;
        }
        let views = std::mem::take(&mut inner.views);
        inner.views = views.into_iter().map(|view| view.rederived(now)).collect();
    }

    /// Returns the cached views passing a filter.
    ///
    /// Pure and synchronous over the working set; an empty result during
    /// [`SessionState::Loading`] means nothing has been fetched yet.
    #[must_use]
    pub fn views(&self, filter: &ViewFilter) -> Vec<TaskView> {
        self.lock_inner()
            .views
            .iter()
            .filter(|view| filter.matches(view))
            .cloned()
            .collect()
    }

    /// Returns the cached views that carry a due instant, soonest first.
    #[must_use]
    pub fn upcoming_deadlines(&self) -> Vec<TaskView> {
        let mut views: Vec<TaskView> = self
            .lock_inner()
            .views
            .iter()
            .filter(|view| view.task.due().is_some())
            .cloned()
            .collect();
        super::domain::sort_for_deadline_panel(&mut views);
        views
    }

    /// Tears the session down.
    ///
    /// Aborts the feed pump and countdown tasks, drops the working set,
    /// and moves to the terminal [`SessionState::Closed`]; further
    /// refreshes are rejected. Closing twice is a no-op.
    pub fn close(&self) {
        {
            let mut inner = self.lock_inner();
            inner.state = SessionState::Closed;
            inner.views.clear();
        }
        for worker in self.lock_workers().drain(..) {
            worker.abort();
        }
    }
}

impl<S, C> DashboardSession<S, C>
where
    S: SnapshotSource + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Spawns the task that drives refreshes from a feed subscription.
    ///
    /// Only events on the dashboard topics trigger a refresh. The pump
    /// ends when the feed shuts down or the session closes; the session
    /// also aborts it on [`DashboardSession::close`].
    pub fn spawn_feed_pump(
        self: &Arc<Self>,
        mut subscription: Box<dyn FeedSubscription>,
    ) -> JoinHandle<()> {
        let session = Arc::clone(self);
        let handle = tokio::spawn(async move {
            while let Some(event) = subscription.next_event().await {
                if !Topic::DASHBOARD.contains(&event.topic) {
                    continue;
                }
                if session.refresh().await.is_err() {
                    break;
                }
            }
        });
        self.lock_workers().push(handle.abort_handle());
        handle
    }

    /// Spawns the countdown task that re-derives statuses every `period`.
    ///
    /// The design value is [`COUNTDOWN_PERIOD`]; tests pass something
    /// shorter. The session aborts the task on
    /// [`DashboardSession::close`].
    pub fn spawn_countdown(self: &Arc<Self>, period: Duration) -> JoinHandle<()> {
        let session = Arc::clone(self);
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick of a tokio interval completes immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                if session.state() == SessionState::Closed {
                    break;
                }
                session.tick();
            }
        });
        self.lock_workers().push(handle.abort_handle());
        handle
    }
}

fn build_views(
    snapshot: &TaskSnapshot,
    user: UserId,
    now: chrono::DateTime<chrono::Utc>,
) -> Vec<TaskView> {
    let own_rows: HashMap<TaskId, _> = snapshot
        .submissions
        .iter()
        .filter(|submission| submission.user() == user)
        .map(|submission| (submission.task(), submission.clone()))
        .collect();
    snapshot
        .tasks
        .iter()
        .map(|task| {
            let submission = own_rows.get(&task.id()).cloned();
            TaskView::derive(task.clone(), submission, now)
        })
        .collect()
}
