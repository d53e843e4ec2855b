//! Repository port for roster persistence and hierarchy resolution.

use crate::roster::domain::{
    Batch, BatchId, Department, DepartmentId, Principal, Section, SectionId, UserId,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for roster repository operations.
pub type RosterRepositoryResult<T> = Result<T, RosterRepositoryError>;

/// Roster persistence contract.
///
/// Section membership must always be resolved through this port at the
/// point of use; a principal's section can be reassigned concurrently by
/// a super admin, so cached membership is not authoritative.
#[async_trait]
pub trait RosterRepository: Send + Sync {
    /// Stores a new department.
    ///
    /// # Errors
    ///
    /// Returns [`RosterRepositoryError::DuplicateUnit`] when the identifier
    /// already exists.
    async fn store_department(&self, department: &Department) -> RosterRepositoryResult<()>;

    /// Stores a new batch.
    ///
    /// # Errors
    ///
    /// Returns [`RosterRepositoryError::UnknownDepartment`] when the parent
    /// department does not resolve.
    async fn store_batch(&self, batch: &Batch) -> RosterRepositoryResult<()>;

    /// Stores a new section.
    ///
    /// # Errors
    ///
    /// Returns [`RosterRepositoryError::UnknownBatch`] when the parent
    /// batch does not resolve.
    async fn store_section(&self, section: &Section) -> RosterRepositoryResult<()>;

    /// Stores a new principal.
    ///
    /// # Errors
    ///
    /// Returns [`RosterRepositoryError::UnknownSection`] when the
    /// principal references a section that does not resolve.
    async fn store_principal(&self, principal: &Principal) -> RosterRepositoryResult<()>;

    /// Persists changes to an existing principal (role, section, activity).
    ///
    /// # Errors
    ///
    /// Returns [`RosterRepositoryError::PrincipalNotFound`] when the
    /// principal does not exist.
    async fn update_principal(&self, principal: &Principal) -> RosterRepositoryResult<()>;

    /// Finds a principal by identifier.
    ///
    /// Returns `None` when the principal does not exist.
    async fn find_principal(&self, id: UserId) -> RosterRepositoryResult<Option<Principal>>;

    /// Returns the active student members of a section.
    async fn list_section_students(
        &self,
        section: SectionId,
    ) -> RosterRepositoryResult<Vec<Principal>>;

    /// Returns every principal attached to a section, regardless of role
    /// or activity.
    async fn list_section_principals(
        &self,
        section: SectionId,
    ) -> RosterRepositoryResult<Vec<Principal>>;

    /// Finds a section by identifier.
    async fn find_section(&self, id: SectionId) -> RosterRepositoryResult<Option<Section>>;

    /// Finds a batch by identifier.
    async fn find_batch(&self, id: BatchId) -> RosterRepositoryResult<Option<Batch>>;

    /// Finds a department by identifier.
    async fn find_department(&self, id: DepartmentId)
    -> RosterRepositoryResult<Option<Department>>;

    /// Resolves a section's effective department through its batch.
    ///
    /// # Errors
    ///
    /// Returns [`RosterRepositoryError::UnknownSection`],
    /// [`RosterRepositoryError::UnknownBatch`], or
    /// [`RosterRepositoryError::UnknownDepartment`] when a link in the
    /// hierarchy does not resolve.
    async fn effective_department(&self, section: SectionId)
    -> RosterRepositoryResult<Department>;
}

/// Errors returned by roster repository implementations.
#[derive(Debug, Clone, Error)]
pub enum RosterRepositoryError {
    /// An organizational unit with the same identifier already exists.
    #[error("duplicate organizational unit identifier")]
    DuplicateUnit,

    /// A principal with the same identifier already exists.
    #[error("duplicate principal identifier: {0}")]
    DuplicatePrincipal(UserId),

    /// The principal was not found.
    #[error("principal not found: {0}")]
    PrincipalNotFound(UserId),

    /// The referenced department does not resolve.
    #[error("unknown department: {0}")]
    UnknownDepartment(DepartmentId),

    /// The referenced batch does not resolve.
    #[error("unknown batch: {0}")]
    UnknownBatch(BatchId),

    /// The referenced section does not resolve.
    #[error("unknown section: {0}")]
    UnknownSection(SectionId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RosterRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
