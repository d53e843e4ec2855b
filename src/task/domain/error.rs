//! Error types for task domain validation.

use super::TaskId;
use thiserror::Error;

/// Maximum task title length accepted from input.
pub(crate) const MAX_TITLE_LEN: usize = 100;

/// Errors returned while constructing or mutating task domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task title exceeds the accepted length.
    #[error("task title must be at most {MAX_TITLE_LEN} characters, got {0}")]
    TitleTooLong(usize),

    /// The task is already published.
    #[error("task already published: {0}")]
    AlreadyPublished(TaskId),

    /// The submission body is empty after trimming.
    #[error("submission body must not be empty")]
    EmptySubmissionBody,

    /// The grade falls outside the accepted 0–100 range.
    #[error("grade must be between 0 and 100, got {0}")]
    GradeOutOfRange(u16),
}
