//! Service layer for handing in and reviewing submissions.

use crate::roster::domain::{Principal, UserId};
use crate::roster::ports::{RosterRepository, RosterRepositoryError};
use crate::scope::{self, AccessError};
use crate::task::{
    domain::{
        Grade, Submission, SubmissionId, SubmissionStatus, Task, TaskDomainError, TaskId,
    },
    ports::{
        SubmissionRepository, SubmissionRepositoryError, TaskRepository, TaskRepositoryError,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for submission desk operations.
#[derive(Debug, Error)]
pub enum SubmissionDeskError {
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

    /// A referenced submission no longer resolves.
    #[error("submission not found: {0}")]
    SubmissionNotFound(SubmissionId),

    /// Roster lookup failed.
    #[error(transparent)]
    Roster(#[from] RosterRepositoryError),

    /// Task lookup failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),

    /// Submission store operation failed.
    #[error(transparent)]
    Submissions(#[from] SubmissionRepositoryError),
}

/// Result type for submission desk operations.
pub type SubmissionDeskResult<T> = Result<T, SubmissionDeskError>;

/// Review verdict parameters.
#[derive(Debug, Clone)]
pub struct ReviewRequest {
    /// Verdict status to record.
    pub status: SubmissionStatus,
    /// Optional grade.
    pub grade: Option<Grade>,
    /// Optional free-text feedback.
    pub feedback: Option<String>,
}

/// Submission hand-in and review orchestration service.
#[derive(Clone)]
pub struct SubmissionDeskService<S, T, P>
where
    S: SubmissionRepository,
    T: TaskRepository,
    P: RosterRepository,
{
    submissions: Arc<S>,
    tasks: Arc<T>,
    roster: Arc<P>,
}

impl<S, T, P> SubmissionDeskService<S, T, P>
where
    S: SubmissionRepository,
    T: TaskRepository,
    P: RosterRepository,
{
    /// Creates a new submission desk service.
    #[must_use]
    pub const fn new(submissions: Arc<S>, tasks: Arc<T>, roster: Arc<P>) -> Self {
        Self {
            submissions,
            tasks,
            roster,
        }
    }

    async fn load_actor(&self, id: UserId) -> SubmissionDeskResult<Principal> {
        self.roster
            .find_principal(id)
            .await?
            .ok_or(SubmissionDeskError::PrincipalNotFound(id))
    }

    async fn load_task(&self, id: TaskId) -> SubmissionDeskResult<Task> {
        self.tasks
            .find_by_id(id)
            .await?
            .ok_or(SubmissionDeskError::TaskNotFound(id))
    }

    /// Hands work in for a task.
    ///
    /// Saving upserts on the `(task, user)` key: a resubmission updates
    /// the student's existing row in place, it never creates a second
    /// one.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionDeskError::Access`] when the actor is not an
    /// active member of the task's section or the task is unpublished,
    /// and [`SubmissionDeskError::Domain`] when the body is empty.
    pub async fn submit(
        &self,
        actor_id: UserId,
        task_id: TaskId,
        body: impl Into<String> + Send,
        clock: &(impl Clock + Sync),
    ) -> SubmissionDeskResult<Submission> {
        let actor = self.load_actor(actor_id).await?;
        let task = self.load_task(task_id).await?;
        scope::ensure_can_submit(&actor, &task)?;
        let mut submission = self
            .submissions
            .find_by_task_and_user(task_id, actor.id())
            .await?
            .unwrap_or_else(|| Submission::new(task_id, actor.id(), clock));
        submission.submit(body, clock)?;
        self.submissions.upsert(&submission).await?;
        Ok(submission)
    }

    /// Records a review verdict on a submission.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionDeskError::Access`] when the owning task's
    /// section lies outside the actor's administered scope.
    pub async fn review_submission(
        &self,
        actor_id: UserId,
        submission_id: SubmissionId,
        request: ReviewRequest,
        clock: &(impl Clock + Sync),
    ) -> SubmissionDeskResult<Submission> {
        let actor = self.load_actor(actor_id).await?;
        let mut submission = self
            .submissions
            .find_by_id(submission_id)
            .await?
            .ok_or(SubmissionDeskError::SubmissionNotFound(submission_id))?;
        let task = self.load_task(submission.task()).await?;
        scope::ensure_can_grade_submission(&actor, &task)?;
        submission.review(
            actor.id(),
            request.status,
            request.grade,
            request.feedback,
            clock,
        );
        self.submissions.upsert(&submission).await?;
        Ok(submission)
    }

    /// Returns a submission the actor may see.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionDeskError::Access`] when the submission belongs
    /// to another student outside the actor's administered section.
    pub async fn submission(
        &self,
        actor_id: UserId,
        submission_id: SubmissionId,
    ) -> SubmissionDeskResult<Submission> {
        let actor = self.load_actor(actor_id).await?;
        let submission = self
            .submissions
            .find_by_id(submission_id)
            .await?
            .ok_or(SubmissionDeskError::SubmissionNotFound(submission_id))?;
        let task = self.load_task(submission.task()).await?;
        scope::ensure_can_view_submission(&actor, &submission, &task)?;
        Ok(submission)
    }

    /// Returns every submission for a task, for reviewers.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionDeskError::Access`] when the task's section
    /// lies outside the actor's administered scope.
    pub async fn task_submissions(
        &self,
        actor_id: UserId,
        task_id: TaskId,
    ) -> SubmissionDeskResult<Vec<Submission>> {
        let actor = self.load_actor(actor_id).await?;
        let task = self.load_task(task_id).await?;
        scope::ensure_can_grade_submission(&actor, &task)?;
        Ok(self.submissions.list_for_task(task_id).await?)
    }

    /// Returns the actor's own submissions.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionDeskError::Submissions`] when the lookup fails.
    pub async fn own_submissions(
        &self,
        actor_id: UserId,
    ) -> SubmissionDeskResult<Vec<Submission>> {
        let actor = self.load_actor(actor_id).await?;
        Ok(self.submissions.list_for_user(actor.id()).await?)
    }
}
