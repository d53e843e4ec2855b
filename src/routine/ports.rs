//! Repository port for routine persistence.

use super::domain::{Routine, RoutineId};
use crate::roster::domain::SectionId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for routine repository operations.
pub type RoutineRepositoryResult<T> = Result<T, RoutineRepositoryError>;

/// Routine persistence contract.
#[async_trait]
pub trait RoutineRepository: Send + Sync {
    /// Stores a new routine.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineRepositoryError::DuplicateRoutine`] when the
    /// identifier already exists.
    async fn store(&self, routine: &Routine) -> RoutineRepositoryResult<()>;

    /// Persists changes to an existing routine (soft delete included).
    ///
    /// # Errors
    ///
    /// Returns [`RoutineRepositoryError::NotFound`] when the routine does
    /// not exist.
    async fn update(&self, routine: &Routine) -> RoutineRepositoryResult<()>;

    /// Finds a routine by identifier.
    async fn find_by_id(&self, id: RoutineId) -> RoutineRepositoryResult<Option<Routine>>;

    /// Returns a section's routines, optionally including soft-deleted
    /// rows.
    async fn list_for_section(
        &self,
        section: SectionId,
        include_inactive: bool,
    ) -> RoutineRepositoryResult<Vec<Routine>>;
}

/// Errors returned by routine repository implementations.
#[derive(Debug, Clone, Error)]
pub enum RoutineRepositoryError {
    /// A routine with the same identifier already exists.
    #[error("duplicate routine identifier: {0}")]
    DuplicateRoutine(RoutineId),

    /// The routine was not found.
    #[error("routine not found: {0}")]
    NotFound(RoutineId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RoutineRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
