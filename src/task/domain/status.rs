//! Per-student task status derivation.

use super::{Submission, SubmissionStatus, Task};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-student task state, computed on read and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DerivedStatus {
    /// Work outstanding and not yet late.
    Pending,
    /// Student has handed the work in.
    Submitted,
    /// Due instant has passed with no submission record.
    Overdue,
}

/// Derives a task's status for one student.
///
/// Rules, in priority order:
///
/// 1. A submission with status [`SubmissionStatus::Submitted`] wins
///    outright; a late-but-completed submission is never reported as
///    overdue.
/// 2. Otherwise the task is overdue when it has a due instant in the past
///    and no submission record exists at all.
/// 3. Otherwise the task is pending.
///
/// A task without a due instant can never be overdue. The result depends
/// on `now`, so callers must re-derive as the wall clock advances; a task
/// flips `Pending → Overdue` with no entity mutation.
#[must_use]
pub fn derive_status(
    task: &Task,
    submission: Option<&Submission>,
    now: DateTime<Utc>,
) -> DerivedStatus {
    if submission.is_some_and(|s| s.status() == SubmissionStatus::Submitted) {
        return DerivedStatus::Submitted;
    }
    match task.due() {
        Some(due) if due < now && submission.is_none() => DerivedStatus::Overdue,
        _ => DerivedStatus::Pending,
    }
}
