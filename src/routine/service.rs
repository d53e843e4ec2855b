//! Service layer for routine scheduling.

use super::domain::{Routine, RoutineDomainError, RoutineId, RoutineSlot};
use super::ports::{RoutineRepository, RoutineRepositoryError};
use crate::roster::domain::{Principal, Role, SectionId, UserId};
use crate::roster::ports::{RosterRepository, RosterRepositoryError};
use crate::scope::{self, AccessError};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for routine operations.
#[derive(Debug, Error)]
pub enum RoutineDeskError {
    /// The operation falls outside the actor's scope.
    #[error(transparent)]
    Access(#[from] AccessError),

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] RoutineDomainError),

    /// A referenced principal no longer resolves.
    #[error("principal not found: {0}")]
    PrincipalNotFound(UserId),

    /// A referenced routine no longer resolves.
    #[error("routine not found: {0}")]
    RoutineNotFound(RoutineId),

    /// Roster lookup failed.
    #[error(transparent)]
    Roster(#[from] RosterRepositoryError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RoutineRepositoryError),
}

/// Result type for routine service operations.
pub type RoutineDeskResult<T> = Result<T, RoutineDeskError>;

/// Routine scheduling orchestration service.
#[derive(Clone)]
pub struct RoutineDeskService<R, P>
where
    R: RoutineRepository,
    P: RosterRepository,
{
    routines: Arc<R>,
    roster: Arc<P>,
}

impl<R, P> RoutineDeskService<R, P>
where
    R: RoutineRepository,
    P: RosterRepository,
{
    /// Creates a new routine service.
    #[must_use]
    pub const fn new(routines: Arc<R>, roster: Arc<P>) -> Self {
        Self { routines, roster }
    }

    async fn load_actor(&self, id: UserId) -> RoutineDeskResult<Principal> {
        self.roster
            .find_principal(id)
            .await?
            .ok_or(RoutineDeskError::PrincipalNotFound(id))
    }

    /// Creates a routine slot in the actor's administered section.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineDeskError::Access`] when the actor does not
    /// administer the section and [`RoutineDeskError::Domain`] on invalid
    /// input.
    pub async fn create(
        &self,
        actor_id: UserId,
        section: SectionId,
        title: impl Into<String> + Send,
        slot: RoutineSlot,
        clock: &(impl Clock + Sync),
    ) -> RoutineDeskResult<Routine> {
        let actor = self.load_actor(actor_id).await?;
        let routine = Routine::new(title, section, slot, actor.id(), clock)?;
        scope::ensure_can_mutate_routine(&actor, &routine)?;
        self.routines.store(&routine).await?;
        Ok(routine)
    }

    /// Soft-deletes a routine, keeping the row for history.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineDeskError::RoutineNotFound`] on a stale reference
    /// and [`RoutineDeskError::Access`] outside the actor's scope.
    pub async fn deactivate(
        &self,
        actor_id: UserId,
        routine_id: RoutineId,
        clock: &(impl Clock + Sync),
    ) -> RoutineDeskResult<Routine> {
        let actor = self.load_actor(actor_id).await?;
        let mut routine = self
            .routines
            .find_by_id(routine_id)
            .await?
            .ok_or(RoutineDeskError::RoutineNotFound(routine_id))?;
        scope::ensure_can_mutate_routine(&actor, &routine)?;
        routine.deactivate(clock);
        self.routines.update(&routine).await?;
        Ok(routine)
    }

    /// Returns the section schedule visible to the actor.
    ///
    /// Members receive only active slots; effective admins also receive
    /// soft-deleted history for their own section.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineDeskError::Repository`] when the lookup fails.
    pub async fn section_schedule(
        &self,
        actor_id: UserId,
        section: SectionId,
    ) -> RoutineDeskResult<Vec<Routine>> {
        let actor = self.load_actor(actor_id).await?;
        let include_inactive = match actor.role() {
            Role::Member => false,
            Role::SectionAdmin | Role::SuperAdmin => actor.administers(section),
        };
        let routines = self
            .routines
            .list_for_section(section, include_inactive)
            .await?;
        Ok(routines
            .into_iter()
            .filter(|routine| scope::can_view_routine(&actor, routine))
            .collect())
    }
}
