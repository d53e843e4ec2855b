//! Domain types for change events and dashboard working sets.

use crate::task::domain::{DerivedStatus, Submission, Task, TaskCategory, derive_status};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Table a change event originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    /// Task rows.
    Tasks,
    /// Submission rows.
    TaskSubmissions,
    /// Principal rows.
    Users,
    /// Routine rows.
    Routines,
}

impl Topic {
    /// Topics whose changes invalidate a dashboard working set.
    pub const DASHBOARD: [Self; 2] = [Self::Tasks, Self::TaskSubmissions];

    /// Returns the wire name of the underlying table.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tasks => "tasks",
            Self::TaskSubmissions => "task_submissions",
            Self::Users => "users",
            Self::Routines => "routines",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of row mutation a change event reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeAction {
    /// A row was inserted.
    Insert,
    /// A row was updated.
    Update,
    /// A row was deleted.
    Delete,
}

/// Notification that a row changed.
///
/// Events carry no row payload; consumers re-fetch an authoritative
/// snapshot instead of patching state from the event, so delivery only
/// needs to be at-least-once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    /// Kind of mutation.
    pub action: ChangeAction,
    /// Table the row belongs to.
    pub topic: Topic,
    /// Identifier of the changed row.
    pub row_id: Uuid,
}

/// Lifecycle state of a dashboard session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No snapshot has been fetched yet.
    Loading,
    /// A snapshot is cached and current as of its fetch.
    Ready,
    /// A fetch is in flight; the previous snapshot remains readable.
    Refreshing,
    /// The session has been torn down; terminal.
    Closed,
}

/// Principal-visible working set fetched in one authoritative read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskSnapshot {
    /// Tasks visible to the principal.
    pub tasks: Vec<Task>,
    /// Submissions visible to the principal.
    pub submissions: Vec<Submission>,
}

/// One task as a dashboard row: the task, the viewer's submission, and
/// the status derived from both at a known instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskView {
    /// The task.
    pub task: Task,
    /// The viewer's submission row, if one exists.
    pub submission: Option<Submission>,
    /// Status derived at the working set's derivation instant.
    pub status: DerivedStatus,
}

impl TaskView {
    /// Builds a view by deriving the status at `now`.
    #[must_use]
    pub fn derive(task: Task, submission: Option<Submission>, now: DateTime<Utc>) -> Self {
        let status = derive_status(&task, submission.as_ref(), now);
        Self {
            task,
            submission,
            status,
        }
    }

    /// Re-derives the status at a later instant without refetching.
    #[must_use]
    pub fn rederived(self, now: DateTime<Utc>) -> Self {
        Self::derive(self.task, self.submission, now)
    }
}

/// Pure filter over a dashboard working set.
///
/// Filtering never fetches; it narrows the cached views by category and
/// then by derived status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewFilter {
    /// Keep only this category, when set.
    pub category: Option<TaskCategory>,
    /// Keep only this derived status, when set.
    pub status: Option<DerivedStatus>,
}

impl ViewFilter {
    /// Filter that keeps every view.
    pub const ALL: Self = Self {
        category: None,
        status: None,
    };

    /// Narrows the filter to one category.
    #[must_use]
    pub const fn with_category(mut self, category: TaskCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Narrows the filter to one derived status.
    #[must_use]
    pub const fn with_status(mut self, status: DerivedStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns whether a view passes the filter.
    #[must_use]
    pub fn matches(&self, view: &TaskView) -> bool {
        if self
            .category
            .is_some_and(|category| view.task.category() != category)
        {
            return false;
        }
        !self.status.is_some_and(|status| view.status != status)
    }
}

/// Orders views for the deadline panel: tasks with due instants first in
/// ascending order, undated tasks last.
pub fn sort_for_deadline_panel(views: &mut [TaskView]) {
    views.sort_by_key(|view| match view.task.due() {
        Some(due) => (0_u8, Some(due)),
        None => (1_u8, None),
    });
}
