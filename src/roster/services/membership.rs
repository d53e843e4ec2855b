//! Service layer for role mutations and section membership.
//!
//! Every operation re-fetches the acting principal before evaluating
//! scope: a super admin can reassign section membership at any time, so
//! the actor's section is never assumed static across requests.

use crate::roster::{
    domain::{Principal, Role, UserId},
    ports::{RosterRepository, RosterRepositoryError},
};
use crate::scope::{self, AccessError, ScopeAction};
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for membership operations.
#[derive(Debug, Error)]
pub enum MembershipError {
    /// The operation falls outside the actor's scope.
    #[error(transparent)]
    Access(#[from] AccessError),

    /// The target principal no longer resolves.
    #[error("principal not found: {0}")]
    NotFound(UserId),

    /// The target already holds a role incompatible with the operation.
    #[error("principal {id} holds role {} which the operation does not apply to", .role.as_str())]
    RoleMismatch {
        /// Target principal.
        id: UserId,
        /// Role the target currently holds.
        role: Role,
    },

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RosterRepositoryError),
}

/// Result type for membership service operations.
pub type MembershipResult<T> = Result<T, MembershipError>;

/// Role-mutation orchestration service.
#[derive(Clone)]
pub struct MembershipService<R>
where
    R: RosterRepository,
{
    roster: Arc<R>,
}

impl<R> MembershipService<R>
where
    R: RosterRepository,
{
    /// Creates a new membership service.
    #[must_use]
    pub const fn new(roster: Arc<R>) -> Self {
        Self { roster }
    }

    async fn load(&self, id: UserId) -> MembershipResult<Principal> {
        self.roster
            .find_principal(id)
            .await?
            .ok_or(MembershipError::NotFound(id))
    }

    /// Promotes a student member to section admin within the actor's
    /// section.
    ///
    /// The promotee becomes active immediately; only members can be
    /// promoted through this path.
    ///
    /// # Errors
    ///
    /// Returns [`MembershipError::Access`] when the actor does not
    /// administer the target's section, [`MembershipError::RoleMismatch`]
    /// when the target is not a member, and [`MembershipError::NotFound`]
    /// when either principal no longer resolves.
    pub async fn promote_to_section_admin(
        &self,
        actor_id: UserId,
        target_id: UserId,
    ) -> MembershipResult<Principal> {
        let actor = self.load(actor_id).await?;
        let mut target = self.load(target_id).await?;
        scope::ensure_can_manage_membership(&actor, &target)?;
        if target.role() != Role::Member {
            return Err(MembershipError::RoleMismatch {
                id: target.id(),
                role: target.role(),
            });
        }
        target.set_role(Role::SectionAdmin);
        target.set_active(true);
        self.roster.update_principal(&target).await?;
        Ok(target)
    }

    /// Detaches a principal from the actor's section.
    ///
    /// Clears the section reference and deactivates the target. The
    /// operation is not reversible from the section admin's own scope.
    ///
    /// # Errors
    ///
    /// Returns [`MembershipError::Access`] when the actor does not
    /// administer the target's section.
    pub async fn detach_member(
        &self,
        actor_id: UserId,
        target_id: UserId,
    ) -> MembershipResult<Principal> {
        let actor = self.load(actor_id).await?;
        let mut target = self.load(target_id).await?;
        scope::ensure_can_manage_membership(&actor, &target)?;
        target.detach_from_section();
        self.roster.update_principal(&target).await?;
        Ok(target)
    }

    /// Activates a pending section admin.
    ///
    /// This is the sole mechanism by which a section admin gains effective
    /// permissions, and it is reserved for super admins.
    ///
    /// # Errors
    ///
    /// Returns [`MembershipError::Access`] when the actor is not a super
    /// admin and [`MembershipError::RoleMismatch`] when the target is not
    /// a section admin.
    pub async fn activate_section_admin(
        &self,
        actor_id: UserId,
        target_id: UserId,
    ) -> MembershipResult<Principal> {
        let actor = self.load(actor_id).await?;
        scope::ensure_super_admin(&actor, ScopeAction::ActivateAdmin)?;
        let mut target = self.load(target_id).await?;
        if target.role() != Role::SectionAdmin {
            return Err(MembershipError::RoleMismatch {
                id: target.id(),
                role: target.role(),
            });
        }
        target.set_active(true);
        self.roster.update_principal(&target).await?;
        Ok(target)
    }

    /// Changes any principal's role. Super admin only.
    ///
    /// # Errors
    ///
    /// Returns [`MembershipError::Access`] when the actor is not a super
    /// admin.
    pub async fn change_role(
        &self,
        actor_id: UserId,
        target_id: UserId,
        new_role: Role,
    ) -> MembershipResult<Principal> {
        let actor = self.load(actor_id).await?;
        scope::ensure_super_admin(&actor, ScopeAction::ChangeRole)?;
        let mut target = self.load(target_id).await?;
        target.set_role(new_role);
        self.roster.update_principal(&target).await?;
        Ok(target)
    }

    /// Activates or deactivates any principal. Super admin only.
    ///
    /// # Errors
    ///
    /// Returns [`MembershipError::Access`] when the actor is not a super
    /// admin.
    pub async fn set_active(
        &self,
        actor_id: UserId,
        target_id: UserId,
        active: bool,
    ) -> MembershipResult<Principal> {
        let actor = self.load(actor_id).await?;
        scope::ensure_super_admin(&actor, ScopeAction::SetActive)?;
        let mut target = self.load(target_id).await?;
        target.set_active(active);
        self.roster.update_principal(&target).await?;
        Ok(target)
    }
}
