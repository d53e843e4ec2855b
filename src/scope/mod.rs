//! Role-based visibility and mutation scoping.
//!
//! Every predicate here is a total match over the closed [`Role`] set; no
//! arm falls through to a default, so adding a role forces every rule to
//! be revisited. The predicates are pure: they take the acting principal
//! and the resource explicitly, never a hidden session, which keeps scope
//! decisions auditable and testable.
//!
//! The entity store enforces row-level authorization on its own; these
//! rules are the first of two layers, and services reject out-of-scope
//! operations here before any mutation is attempted.

mod error;

pub use error::{AccessError, ScopeAction};

use crate::roster::domain::{Principal, Role};
use crate::routine::Routine;
use crate::task::domain::{Submission, Task};

/// Returns whether a principal may read a task.
///
/// Members see published tasks of their own section; the creator always
/// sees their own unpublished task; effective section admins see their
/// whole section; super admins see everything.
#[must_use]
pub fn can_view_task(principal: &Principal, task: &Task) -> bool {
    if task.created_by() == principal.id() {
        return true;
    }
    match principal.role() {
        Role::Member => {
            task.is_published()
                && principal.is_active()
                && principal.section() == Some(task.section())
        }
        Role::SectionAdmin => principal.administers(task.section()),
        Role::SuperAdmin => true,
    }
}

/// Returns whether a principal may create or mutate a task in a section.
#[must_use]
pub fn can_mutate_task(principal: &Principal, task: &Task) -> bool {
    principal.administers(task.section())
}

/// Returns whether a principal may submit work for a task.
///
/// Only active members of the owning section submit, and only once the
/// task is published.
#[must_use]
pub fn can_submit(principal: &Principal, task: &Task) -> bool {
    match principal.role() {
        Role::Member => {
            task.is_published()
                && principal.is_active()
                && principal.section() == Some(task.section())
        }
        Role::SectionAdmin | Role::SuperAdmin => false,
    }
}

/// Returns whether a principal may read a submission.
///
/// The owning student always may; otherwise the principal must administer
/// the owning task's section.
#[must_use]
pub fn can_view_submission(principal: &Principal, submission: &Submission, task: &Task) -> bool {
    if submission.user() == principal.id() {
        return true;
    }
    principal.administers(task.section())
}

/// Returns whether a principal may grade or review a submission.
#[must_use]
pub fn can_grade_submission(principal: &Principal, task: &Task) -> bool {
    principal.administers(task.section())
}

/// Returns whether a principal may read a routine.
///
/// Members see only active routines of their own section; admins also see
/// soft-deleted ones within their scope.
#[must_use]
pub fn can_view_routine(principal: &Principal, routine: &Routine) -> bool {
    match principal.role() {
        Role::Member => {
            routine.is_active()
                && principal.is_active()
                && principal.section() == Some(routine.section())
        }
        Role::SectionAdmin => principal.administers(routine.section()),
        Role::SuperAdmin => true,
    }
}

/// Returns whether a principal may create or soft-delete a routine in a
/// section.
#[must_use]
pub fn can_mutate_routine(principal: &Principal, routine: &Routine) -> bool {
    principal.administers(routine.section())
}

/// Returns whether an actor may manage another principal's membership
/// (promotion, detachment).
///
/// The target must belong to a section the actor effectively administers.
#[must_use]
pub fn can_manage_membership(actor: &Principal, target: &Principal) -> bool {
    match actor.role() {
        Role::Member => false,
        Role::SectionAdmin => target
            .section()
            .is_some_and(|section| actor.administers(section)),
        Role::SuperAdmin => true,
    }
}

fn ensure(allowed: bool, actor: &Principal, action: ScopeAction) -> Result<(), AccessError> {
    if allowed {
        Ok(())
    } else {
        tracing::debug!(actor = %actor.id(), action = %action, "scope denied");
        Err(AccessError::new(actor.id(), action))
    }
}

/// Rejects the request unless the actor may mutate the task.
///
/// # Errors
///
/// Returns [`AccessError`] when the task lies outside the actor's scope.
pub fn ensure_can_mutate_task(actor: &Principal, task: &Task) -> Result<(), AccessError> {
    ensure(can_mutate_task(actor, task), actor, ScopeAction::MutateTask)
}

/// Rejects the request unless the actor may submit work for the task.
///
/// # Errors
///
/// Returns [`AccessError`] when the actor is not an active member of the
/// task's section or the task is unpublished.
pub fn ensure_can_submit(actor: &Principal, task: &Task) -> Result<(), AccessError> {
    ensure(can_submit(actor, task), actor, ScopeAction::SubmitTask)
}

/// Rejects the request unless the actor may read the submission.
///
/// # Errors
///
/// Returns [`AccessError`] when the submission belongs to another student
/// outside the actor's administered section.
pub fn ensure_can_view_submission(
    actor: &Principal,
    submission: &Submission,
    task: &Task,
) -> Result<(), AccessError> {
    ensure(
        can_view_submission(actor, submission, task),
        actor,
        ScopeAction::ViewSubmission,
    )
}

/// Rejects the request unless the actor may grade submissions on the task.
///
/// # Errors
///
/// Returns [`AccessError`] when the task's section lies outside the
/// actor's administered scope.
pub fn ensure_can_grade_submission(actor: &Principal, task: &Task) -> Result<(), AccessError> {
    ensure(
        can_grade_submission(actor, task),
        actor,
        ScopeAction::GradeSubmission,
    )
}

/// Rejects the request unless the actor may mutate the routine.
///
/// # Errors
///
/// Returns [`AccessError`] when the routine's section lies outside the
/// actor's administered scope.
pub fn ensure_can_mutate_routine(actor: &Principal, routine: &Routine) -> Result<(), AccessError> {
    ensure(
        can_mutate_routine(actor, routine),
        actor,
        ScopeAction::MutateRoutine,
    )
}

/// Rejects the request unless the actor may manage the target's
/// membership.
///
/// # Errors
///
/// Returns [`AccessError`] when the target's section lies outside the
/// actor's administered scope.
pub fn ensure_can_manage_membership(
    actor: &Principal,
    target: &Principal,
) -> Result<(), AccessError> {
    ensure(
        can_manage_membership(actor, target),
        actor,
        ScopeAction::ManageMembership,
    )
}

/// Rejects the request unless the actor is a super admin.
///
/// # Errors
///
/// Returns [`AccessError`] for every other role, including pending
/// section admins.
pub fn ensure_super_admin(actor: &Principal, action: ScopeAction) -> Result<(), AccessError> {
    ensure(actor.role() == Role::SuperAdmin, actor, action)
}
