//! Submission aggregate and grading types.

use super::{SubmissionId, TaskDomainError, TaskId};
use crate::roster::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Submission lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    /// Row exists but the student has not submitted.
    Pending,
    /// Student has handed the work in.
    Submitted,
    /// An admin has looked at the work without a verdict.
    Reviewed,
    /// Accepted.
    Approved,
    /// Sent back.
    Rejected,
}

/// Bounded 0–100 grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grade(u8);

impl Grade {
    /// Creates a validated grade.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::GradeOutOfRange`] when the value exceeds
    /// 100.
    pub const fn new(value: u16) -> Result<Self, TaskDomainError> {
        if value > 100 {
            return Err(TaskDomainError::GradeOutOfRange(value));
        }
        #[expect(clippy::cast_possible_truncation, reason = "bounded to 100 above")]
        Ok(Self(value as u8))
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

/// A student's submission record for one task.
///
/// At most one submission exists per `(task, user)` pair; repositories
/// enforce the key on upsert, and repeated saves update this record in
/// place rather than creating duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    id: SubmissionId,
    task: TaskId,
    user: UserId,
    status: SubmissionStatus,
    body: Option<String>,
    submitted_at: Option<DateTime<Utc>>,
    grade: Option<Grade>,
    feedback: Option<String>,
    reviewed_by: Option<UserId>,
    reviewed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedSubmissionData {
    /// Persisted identifier.
    pub id: SubmissionId,
    /// Owning task.
    pub task: TaskId,
    /// Submitting student.
    pub user: UserId,
    /// Lifecycle status.
    pub status: SubmissionStatus,
    /// Free-text body, if any.
    pub body: Option<String>,
    /// Submission instant, if submitted.
    pub submitted_at: Option<DateTime<Utc>>,
    /// Grade, if reviewed.
    pub grade: Option<Grade>,
    /// Reviewer feedback, if any.
    pub feedback: Option<String>,
    /// Reviewing admin, if reviewed.
    pub reviewed_by: Option<UserId>,
    /// Review instant, if reviewed.
    pub reviewed_at: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Submission {
    /// Creates an empty pending record for the given `(task, user)` pair.
    #[must_use]
    pub fn new(task: TaskId, user: UserId, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: SubmissionId::new(),
            task,
            user,
            status: SubmissionStatus::Pending,
            body: None,
            submitted_at: None,
            grade: None,
            feedback: None,
            reviewed_by: None,
            reviewed_at: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a submission from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedSubmissionData) -> Self {
        Self {
            id: data.id,
            task: data.task,
            user: data.user,
            status: data.status,
            body: data.body,
            submitted_at: data.submitted_at,
            grade: data.grade,
            feedback: data.feedback,
            reviewed_by: data.reviewed_by,
            reviewed_at: data.reviewed_at,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the submission identifier.
    #[must_use]
    pub const fn id(&self) -> SubmissionId {
        self.id
    }

    /// Returns the owning task.
    #[must_use]
    pub const fn task(&self) -> TaskId {
        self.task
    }

    /// Returns the submitting student.
    #[must_use]
    pub const fn user(&self) -> UserId {
        self.user
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> SubmissionStatus {
        self.status
    }

    /// Returns the free-text body, if any.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Returns the submission instant, if submitted.
    #[must_use]
    pub const fn submitted_at(&self) -> Option<DateTime<Utc>> {
        self.submitted_at
    }

    /// Returns the grade, if reviewed.
    #[must_use]
    pub const fn grade(&self) -> Option<Grade> {
        self.grade
    }

    /// Returns the reviewer feedback, if any.
    #[must_use]
    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    /// Returns the reviewing admin, if reviewed.
    #[must_use]
    pub const fn reviewed_by(&self) -> Option<UserId> {
        self.reviewed_by
    }

    /// Returns the review instant, if reviewed.
    #[must_use]
    pub const fn reviewed_at(&self) -> Option<DateTime<Utc>> {
        self.reviewed_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Records the student handing the work in.
    ///
    /// Resubmitting replaces the body and refreshes the submission
    /// instant; the record stays `Submitted`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptySubmissionBody`] when the body is
    /// empty after trimming.
    pub fn submit(&mut self, body: impl Into<String>, clock: &impl Clock) -> Result<(), TaskDomainError> {
        let body = body.into();
        if body.trim().is_empty() {
            return Err(TaskDomainError::EmptySubmissionBody);
        }
        let timestamp = clock.utc();
        self.body = Some(body);
        self.status = SubmissionStatus::Submitted;
        self.submitted_at = Some(timestamp);
        self.updated_at = timestamp;
        Ok(())
    }

    /// Records a review verdict with optional grade and feedback.
    pub fn review(
        &mut self,
        reviewer: UserId,
        status: SubmissionStatus,
        grade: Option<Grade>,
        feedback: Option<String>,
        clock: &impl Clock,
    ) {
        let timestamp = clock.utc();
        self.status = status;
        self.grade = grade;
        self.feedback = feedback;
        self.reviewed_by = Some(reviewer);
        self.reviewed_at = Some(timestamp);
        self.updated_at = timestamp;
    }
}
