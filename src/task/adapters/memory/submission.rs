//! In-memory submission repository keyed by `(task, user)`.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::roster::domain::UserId;
use crate::task::{
    domain::{Submission, SubmissionId, TaskId},
    ports::{SubmissionRepository, SubmissionRepositoryError, SubmissionRepositoryResult},
};

type PairKey = (TaskId, UserId);

/// Thread-safe in-memory submission repository.
///
/// The primary map is keyed by `(task, user)`, which enforces the
/// at-most-one-submission invariant structurally: a second writer for the
/// same pair replaces the first row (last write wins, matching the entity
/// store's semantics under concurrent writers).
#[derive(Debug, Clone, Default)]
pub struct InMemorySubmissionRepository {
    state: Arc<RwLock<InMemorySubmissionState>>,
}

#[derive(Debug, Default)]
struct InMemorySubmissionState {
    rows: HashMap<PairKey, Submission>,
    id_index: HashMap<SubmissionId, PairKey>,
}

impl InMemorySubmissionRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> SubmissionRepositoryResult<RwLockReadGuard<'_, InMemorySubmissionState>> {
        self.state.read().map_err(|err| {
            SubmissionRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> SubmissionRepositoryResult<RwLockWriteGuard<'_, InMemorySubmissionState>> {
        self.state.write().map_err(|err| {
            SubmissionRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl SubmissionRepository for InMemorySubmissionRepository {
    async fn upsert(&self, submission: &Submission) -> SubmissionRepositoryResult<()> {
        let mut state = self.write()?;
        let key = (submission.task(), submission.user());
        if let Some(previous) = state.rows.insert(key, submission.clone()) {
            state.id_index.remove(&previous.id());
        }
        state.id_index.insert(submission.id(), key);
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: SubmissionId,
    ) -> SubmissionRepositoryResult<Option<Submission>> {
        let state = self.read()?;
        Ok(state
            .id_index
            .get(&id)
            .and_then(|key| state.rows.get(key))
            .cloned())
    }

    async fn find_by_task_and_user(
        &self,
        task: TaskId,
        user: UserId,
    ) -> SubmissionRepositoryResult<Option<Submission>> {
        let state = self.read()?;
        Ok(state.rows.get(&(task, user)).cloned())
    }

    async fn list_for_task(&self, task: TaskId) -> SubmissionRepositoryResult<Vec<Submission>> {
        let state = self.read()?;
        Ok(state
            .rows
            .values()
            .filter(|row| row.task() == task)
            .cloned()
            .collect())
    }

    async fn list_for_tasks(
        &self,
        tasks: &[TaskId],
    ) -> SubmissionRepositoryResult<Vec<Submission>> {
        let state = self.read()?;
        Ok(state
            .rows
            .values()
            .filter(|row| tasks.contains(&row.task()))
            .cloned()
            .collect())
    }

    async fn list_for_user(&self, user: UserId) -> SubmissionRepositoryResult<Vec<Submission>> {
        let state = self.read()?;
        Ok(state
            .rows
            .values()
            .filter(|row| row.user() == user)
            .cloned()
            .collect())
    }
}
