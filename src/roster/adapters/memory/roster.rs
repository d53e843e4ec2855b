//! In-memory roster repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::roster::{
    domain::{Batch, BatchId, Department, DepartmentId, Principal, Role, Section, SectionId, UserId},
    ports::{RosterRepository, RosterRepositoryError, RosterRepositoryResult},
};

/// Thread-safe in-memory roster repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRosterRepository {
    state: Arc<RwLock<InMemoryRosterState>>,
}

#[derive(Debug, Default)]
struct InMemoryRosterState {
    departments: HashMap<DepartmentId, Department>,
    batches: HashMap<BatchId, Batch>,
    sections: HashMap<SectionId, Section>,
    principals: HashMap<UserId, Principal>,
}

impl InMemoryRosterRepository {
    /// Creates an empty in-memory roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RosterRepositoryResult<RwLockReadGuard<'_, InMemoryRosterState>> {
        self.state.read().map_err(|err| {
            RosterRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> RosterRepositoryResult<RwLockWriteGuard<'_, InMemoryRosterState>> {
        self.state.write().map_err(|err| {
            RosterRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl RosterRepository for InMemoryRosterRepository {
    async fn store_department(&self, department: &Department) -> RosterRepositoryResult<()> {
        let mut state = self.write()?;
        if state.departments.contains_key(&department.id()) {
            return Err(RosterRepositoryError::DuplicateUnit);
        }
        state.departments.insert(department.id(), department.clone());
        Ok(())
    }

    async fn store_batch(&self, batch: &Batch) -> RosterRepositoryResult<()> {
        let mut state = self.write()?;
        if state.batches.contains_key(&batch.id()) {
            return Err(RosterRepositoryError::DuplicateUnit);
        }
        if !state.departments.contains_key(&batch.department()) {
            return Err(RosterRepositoryError::UnknownDepartment(batch.department()));
        }
        state.batches.insert(batch.id(), batch.clone());
        Ok(())
    }

    async fn store_section(&self, section: &Section) -> RosterRepositoryResult<()> {
        let mut state = self.write()?;
        if state.sections.contains_key(&section.id()) {
            return Err(RosterRepositoryError::DuplicateUnit);
        }
        if !state.batches.contains_key(&section.batch()) {
            return Err(RosterRepositoryError::UnknownBatch(section.batch()));
        }
        state.sections.insert(section.id(), section.clone());
        Ok(())
    }

    async fn store_principal(&self, principal: &Principal) -> RosterRepositoryResult<()> {
        let mut state = self.write()?;
        if state.principals.contains_key(&principal.id()) {
            return Err(RosterRepositoryError::DuplicatePrincipal(principal.id()));
        }
        if let Some(section) = principal.section()
            && !state.sections.contains_key(&section)
        {
            return Err(RosterRepositoryError::UnknownSection(section));
        }
        state.principals.insert(principal.id(), principal.clone());
        Ok(())
    }

    async fn update_principal(&self, principal: &Principal) -> RosterRepositoryResult<()> {
        let mut state = self.write()?;
        if !state.principals.contains_key(&principal.id()) {
            return Err(RosterRepositoryError::PrincipalNotFound(principal.id()));
        }
        if let Some(section) = principal.section()
            && !state.sections.contains_key(&section)
        {
            return Err(RosterRepositoryError::UnknownSection(section));
        }
        state.principals.insert(principal.id(), principal.clone());
        Ok(())
    }

    async fn find_principal(&self, id: UserId) -> RosterRepositoryResult<Option<Principal>> {
        let state = self.read()?;
        Ok(state.principals.get(&id).cloned())
    }

    async fn list_section_students(
        &self,
        section: SectionId,
    ) -> RosterRepositoryResult<Vec<Principal>> {
        let state = self.read()?;
        Ok(state
            .principals
            .values()
            .filter(|p| {
                p.section() == Some(section) && p.role() == Role::Member && p.is_active()
            })
            .cloned()
            .collect())
    }

    async fn list_section_principals(
        &self,
        section: SectionId,
    ) -> RosterRepositoryResult<Vec<Principal>> {
        let state = self.read()?;
        Ok(state
            .principals
            .values()
            .filter(|p| p.section() == Some(section))
            .cloned()
            .collect())
    }

    async fn find_section(&self, id: SectionId) -> RosterRepositoryResult<Option<Section>> {
        let state = self.read()?;
        Ok(state.sections.get(&id).cloned())
    }

    async fn find_batch(&self, id: BatchId) -> RosterRepositoryResult<Option<Batch>> {
        let state = self.read()?;
        Ok(state.batches.get(&id).cloned())
    }

    async fn find_department(
        &self,
        id: DepartmentId,
    ) -> RosterRepositoryResult<Option<Department>> {
        let state = self.read()?;
        Ok(state.departments.get(&id).cloned())
    }

    async fn effective_department(
        &self,
        section: SectionId,
    ) -> RosterRepositoryResult<Department> {
        let state = self.read()?;
        let section_row = state
            .sections
            .get(&section)
            .ok_or(RosterRepositoryError::UnknownSection(section))?;
        let batch = state
            .batches
            .get(&section_row.batch())
            .ok_or(RosterRepositoryError::UnknownBatch(section_row.batch()))?;
        state
            .departments
            .get(&batch.department())
            .cloned()
            .ok_or(RosterRepositoryError::UnknownDepartment(batch.department()))
    }
}
