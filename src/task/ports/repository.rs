//! Repository ports for task and submission persistence.

use crate::roster::domain::{SectionId, UserId};
use crate::task::domain::{Submission, SubmissionId, Task, TaskCategory, TaskId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Result type for submission repository operations.
pub type SubmissionRepositoryResult<T> = Result<T, SubmissionRepositoryError>;

/// Fetch parameterization for scoped task collections.
///
/// Mirrors the request shape the entity store accepts: organizational
/// scope, publication flag, optional category, optional due range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskQuery {
    /// Owning section to fetch for.
    pub section: SectionId,
    /// When true, only published tasks are returned.
    pub published_only: bool,
    /// Optional category narrowing.
    pub category: Option<TaskCategory>,
    /// Optional inclusive due-instant range.
    pub due_between: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

impl TaskQuery {
    /// Creates a query for a section's published tasks.
    #[must_use]
    pub const fn published(section: SectionId) -> Self {
        Self {
            section,
            published_only: true,
            category: None,
            due_between: None,
        }
    }

    /// Creates a query for every task of a section.
    #[must_use]
    pub const fn all(section: SectionId) -> Self {
        Self {
            section,
            published_only: false,
            category: None,
            due_between: None,
        }
    }

    /// Narrows the query to one category.
    #[must_use]
    pub const fn with_category(mut self, category: TaskCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Narrows the query to tasks due within the inclusive range.
    #[must_use]
    pub const fn with_due_between(mut self, from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        self.due_between = Some((from, to));
        self
    }

    /// Returns whether a task matches this query.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        if task.section() != self.section {
            return false;
        }
        if self.published_only && !task.is_published() {
            return false;
        }
        if self.category.is_some_and(|category| task.category() != category) {
            return false;
        }
        if let Some((from, to)) = self.due_between {
            return task.due().is_some_and(|due| due >= from && due <= to);
        }
        true
    }
}

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID
    /// already exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns the tasks matching a scoped query, newest first.
    async fn query(&self, query: &TaskQuery) -> TaskRepositoryResult<Vec<Task>>;
}

/// Submission persistence contract.
///
/// The store is keyed by `(task, user)`: at most one row exists per pair,
/// and [`SubmissionRepository::upsert`] replaces any earlier row for the
/// same pair.
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// Inserts or replaces the row for the submission's `(task, user)`
    /// pair.
    async fn upsert(&self, submission: &Submission) -> SubmissionRepositoryResult<()>;

    /// Finds a submission by row identifier.
    async fn find_by_id(&self, id: SubmissionId)
    -> SubmissionRepositoryResult<Option<Submission>>;

    /// Finds the row for a `(task, user)` pair.
    async fn find_by_task_and_user(
        &self,
        task: TaskId,
        user: UserId,
    ) -> SubmissionRepositoryResult<Option<Submission>>;

    /// Returns every submission for one task.
    async fn list_for_task(&self, task: TaskId) -> SubmissionRepositoryResult<Vec<Submission>>;

    /// Returns every submission for a set of tasks.
    async fn list_for_tasks(
        &self,
        tasks: &[TaskId],
    ) -> SubmissionRepositoryResult<Vec<Submission>>;

    /// Returns every submission a student owns.
    async fn list_for_user(&self, user: UserId) -> SubmissionRepositoryResult<Vec<Submission>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// Errors returned by submission repository implementations.
#[derive(Debug, Clone, Error)]
pub enum SubmissionRepositoryError {
    /// The submission was not found.
    #[error("submission not found: {0}")]
    NotFound(SubmissionId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SubmissionRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
