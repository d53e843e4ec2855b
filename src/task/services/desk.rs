//! Service layer for task creation, publication, and scoped retrieval.
//!
//! The acting principal is re-fetched from the roster on every call so
//! that section scoping reflects concurrent reassignment by a super
//! admin.

use crate::roster::domain::{Principal, UserId};
use crate::roster::ports::{RosterRepository, RosterRepositoryError};
use crate::scope::{self, AccessError};
use crate::task::{
    domain::{Task, TaskDomainError, TaskDraft, TaskId},
    ports::{TaskQuery, TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for task desk operations.
#[derive(Debug, Error)]
pub enum TaskDeskError {
    /// The operation falls outside the actor's scope.
    #[error(transparent)]
    Access(#[from] AccessError),

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// A referenced principal no longer resolves.
    #[error("principal not found: {0}")]
    PrincipalNotFound(UserId),

    /// A referenced task no longer resolves.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// Roster lookup failed.
    #[error(transparent)]
    Roster(#[from] RosterRepositoryError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task desk operations.
pub type TaskDeskResult<T> = Result<T, TaskDeskError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskDeskService<T, P>
where
    T: TaskRepository,
    P: RosterRepository,
{
    tasks: Arc<T>,
    roster: Arc<P>,
}

impl<T, P> TaskDeskService<T, P>
where
    T: TaskRepository,
    P: RosterRepository,
{
    /// Creates a new task desk service.
    #[must_use]
    pub const fn new(tasks: Arc<T>, roster: Arc<P>) -> Self {
        Self { tasks, roster }
    }

    async fn load_actor(&self, id: UserId) -> TaskDeskResult<Principal> {
        self.roster
            .find_principal(id)
            .await?
            .ok_or(TaskDeskError::PrincipalNotFound(id))
    }

    /// Creates an unpublished task in the draft's section.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDeskError::Access`] when the actor does not
    /// administer the section and [`TaskDeskError::Domain`] on invalid
    /// input.
    pub async fn create_task(
        &self,
        actor_id: UserId,
        draft: TaskDraft,
        clock: &(impl Clock + Sync),
    ) -> TaskDeskResult<Task> {
        let actor = self.load_actor(actor_id).await?;
        let task = Task::new(draft, actor.id(), clock);
        scope::ensure_can_mutate_task(&actor, &task)?;
        self.tasks.store(&task).await?;
        Ok(task)
    }

    /// Publishes a task, making it visible to its section.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDeskError::TaskNotFound`] on a stale reference,
    /// [`TaskDeskError::Access`] outside the actor's scope, and
    /// [`TaskDeskError::Domain`] when the task is already published.
    pub async fn publish_task(
        &self,
        actor_id: UserId,
        task_id: TaskId,
        clock: &(impl Clock + Sync),
    ) -> TaskDeskResult<Task> {
        let actor = self.load_actor(actor_id).await?;
        let mut task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(TaskDeskError::TaskNotFound(task_id))?;
        scope::ensure_can_mutate_task(&actor, &task)?;
        task.publish(clock)?;
        self.tasks.update(&task).await?;
        Ok(task)
    }

    /// Returns the tasks matching a scoped query that the actor may see.
    ///
    /// The repository narrows by section, publication, category, and due
    /// range; the visibility scoper is then applied as the client-side
    /// enforcement layer on top of whatever the entity store already
    /// guarantees.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDeskError::Repository`] when the lookup fails.
    pub async fn scoped_tasks(
        &self,
        actor_id: UserId,
        query: &TaskQuery,
    ) -> TaskDeskResult<Vec<Task>> {
        let actor = self.load_actor(actor_id).await?;
        let tasks = self.tasks.query(query).await?;
        Ok(tasks
            .into_iter()
            .filter(|task| scope::can_view_task(&actor, task))
            .collect())
    }
}
