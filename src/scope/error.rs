//! Authorization failure types.

use crate::roster::domain::UserId;
use std::fmt;
use thiserror::Error;

/// Operation a scope check guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeAction {
    /// Creating or mutating a task.
    MutateTask,
    /// Submitting work for a task.
    SubmitTask,
    /// Reading a submission.
    ViewSubmission,
    /// Grading or reviewing a submission.
    GradeSubmission,
    /// Creating or soft-deleting a routine.
    MutateRoutine,
    /// Promoting or detaching a section member.
    ManageMembership,
    /// Activating a pending section admin.
    ActivateAdmin,
    /// Changing a principal's role.
    ChangeRole,
    /// Activating or deactivating a principal.
    SetActive,
}

impl ScopeAction {
    /// Returns a short description of the guarded operation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MutateTask => "mutate task",
            Self::SubmitTask => "submit task",
            Self::ViewSubmission => "view submission",
            Self::GradeSubmission => "grade submission",
            Self::MutateRoutine => "mutate routine",
            Self::ManageMembership => "manage membership",
            Self::ActivateAdmin => "activate section admin",
            Self::ChangeRole => "change role",
            Self::SetActive => "set active status",
        }
    }
}

impl fmt::Display for ScopeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scoped operation addressed a resource outside the actor's computed
/// scope.
///
/// Raised before any mutation is attempted; hiding the resource in a
/// display layer is not a substitute.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("principal {actor} may not {action}")]
pub struct AccessError {
    actor: UserId,
    action: ScopeAction,
}

impl AccessError {
    /// Creates an access error for the given actor and action.
    #[must_use]
    pub const fn new(actor: UserId, action: ScopeAction) -> Self {
        Self { actor, action }
    }

    /// Returns the denied actor.
    #[must_use]
    pub const fn actor(&self) -> UserId {
        self.actor
    }

    /// Returns the guarded action.
    #[must_use]
    pub const fn action(&self) -> ScopeAction {
        self.action
    }
}
