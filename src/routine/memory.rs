//! In-memory routine repository.

use super::domain::{Routine, RoutineId};
use super::ports::{RoutineRepository, RoutineRepositoryError, RoutineRepositoryResult};
use crate::roster::domain::SectionId;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Thread-safe in-memory routine repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRoutineRepository {
    state: Arc<RwLock<HashMap<RoutineId, Routine>>>,
}

impl InMemoryRoutineRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RoutineRepositoryResult<RwLockReadGuard<'_, HashMap<RoutineId, Routine>>> {
        self.state.read().map_err(|err| {
            RoutineRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> RoutineRepositoryResult<RwLockWriteGuard<'_, HashMap<RoutineId, Routine>>> {
        self.state.write().map_err(|err| {
            RoutineRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl RoutineRepository for InMemoryRoutineRepository {
    async fn store(&self, routine: &Routine) -> RoutineRepositoryResult<()> {
        let mut state = self.write()?;
        if state.contains_key(&routine.id()) {
            return Err(RoutineRepositoryError::DuplicateRoutine(routine.id()));
        }
        state.insert(routine.id(), routine.clone());
        Ok(())
    }

    async fn update(&self, routine: &Routine) -> RoutineRepositoryResult<()> {
        let mut state = self.write()?;
        if !state.contains_key(&routine.id()) {
            return Err(RoutineRepositoryError::NotFound(routine.id()));
        }
        state.insert(routine.id(), routine.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: RoutineId) -> RoutineRepositoryResult<Option<Routine>> {
        let state = self.read()?;
        Ok(state.get(&id).cloned())
    }

    async fn list_for_section(
        &self,
        section: SectionId,
        include_inactive: bool,
    ) -> RoutineRepositoryResult<Vec<Routine>> {
        let state = self.read()?;
        let mut routines: Vec<Routine> = state
            .values()
            .filter(|routine| {
                routine.section() == section && (include_inactive || routine.is_active())
            })
            .cloned()
            .collect();
        routines.sort_by_key(|routine| (routine.slot().day(), routine.slot().start()));
        Ok(routines)
    }
}
