//! Task aggregate root.

use super::error::MAX_TITLE_LEN;
use super::{TaskCategory, TaskDomainError, TaskId};
use crate::roster::domain::{SectionId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task priority level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Can wait.
    Low,
    /// Normal coursework.
    Medium,
    /// Must be handled first.
    High,
}

/// Validated input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title: String,
    description: Option<String>,
    category: TaskCategory,
    priority: TaskPriority,
    due: Option<DateTime<Utc>>,
    section: SectionId,
}

impl TaskDraft {
    /// Creates a draft with required fields.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is empty
    /// after trimming and [`TaskDomainError::TitleTooLong`] when it exceeds
    /// the accepted length.
    pub fn new(
        title: impl Into<String>,
        category: TaskCategory,
        priority: TaskPriority,
        section: SectionId,
    ) -> Result<Self, TaskDomainError> {
        let title = title.into();
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        if trimmed.chars().count() > MAX_TITLE_LEN {
            return Err(TaskDomainError::TitleTooLong(trimmed.chars().count()));
        }
        Ok(Self {
            title: trimmed.to_owned(),
            description: None,
            category,
            priority,
            due: None,
            section,
        })
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the due instant.
    #[must_use]
    pub const fn with_due(mut self, due: DateTime<Utc>) -> Self {
        self.due = Some(due);
        self
    }
}

/// Task aggregate root.
///
/// A task starts unpublished and becomes visible to its section only once
/// published. Overdue determination always compares the due instant to the
/// wall clock at the moment of derivation; see
/// [`derive_status`](super::derive_status).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: Option<String>,
    category: TaskCategory,
    priority: TaskPriority,
    due: Option<DateTime<Utc>>,
    section: SectionId,
    created_by: UserId,
    published: bool,
    published_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Task title.
    pub title: String,
    /// Optional long description.
    pub description: Option<String>,
    /// Coursework category.
    pub category: TaskCategory,
    /// Priority level.
    pub priority: TaskPriority,
    /// Optional due instant.
    pub due: Option<DateTime<Utc>>,
    /// Owning section.
    pub section: SectionId,
    /// Creating principal.
    pub created_by: UserId,
    /// Publication flag.
    pub published: bool,
    /// Publication instant, if published.
    pub published_at: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new unpublished task from a validated draft.
    #[must_use]
    pub fn new(draft: TaskDraft, created_by: UserId, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            title: draft.title,
            description: draft.description,
            category: draft.category,
            priority: draft.priority,
            due: draft.due,
            section: draft.section,
            created_by,
            published: false,
            published_at: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            category: data.category,
            priority: data.priority,
            due: data.due,
            section: data.section,
            created_by: data.created_by,
            published: data.published,
            published_at: data.published_at,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the coursework category.
    #[must_use]
    pub const fn category(&self) -> TaskCategory {
        self.category
    }

    /// Returns the priority level.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the due instant, if any.
    #[must_use]
    pub const fn due(&self) -> Option<DateTime<Utc>> {
        self.due
    }

    /// Returns the owning section.
    #[must_use]
    pub const fn section(&self) -> SectionId {
        self.section
    }

    /// Returns the creating principal.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Returns whether the task is published.
    #[must_use]
    pub const fn is_published(&self) -> bool {
        self.published
    }

    /// Returns the publication instant, if published.
    #[must_use]
    pub const fn published_at(&self) -> Option<DateTime<Utc>> {
        self.published_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Publishes the task, making it visible to its section.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AlreadyPublished`] when the task is
    /// already published.
    pub fn publish(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        if self.published {
            return Err(TaskDomainError::AlreadyPublished(self.id));
        }
        let timestamp = clock.utc();
        self.published = true;
        self.published_at = Some(timestamp);
        self.updated_at = timestamp;
        Ok(())
    }

    /// Reschedules the due instant.
    pub fn set_due(&mut self, due: Option<DateTime<Utc>>, clock: &impl Clock) {
        self.due = due;
        self.updated_at = clock.utc();
    }
}
