use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::domain::{CaseId, CaseRecord};

/// Storage abstraction so the lifecycle service can be exercised in isolation.
///
/// Implementations must make `insert` an atomic check-and-insert and apply each
/// `modify` closure as one indivisible step.
pub trait CaseRepository: Send + Sync {
    fn insert(&self, record: CaseRecord) -> Result<CaseRecord, RepositoryError>;
    fn fetch(&self, id: &CaseId) -> Result<Option<CaseRecord>, RepositoryError>;
    fn list(&self) -> Result<Vec<CaseRecord>, RepositoryError>;
    fn modify(
        &self,
        id: &CaseId,
        change: &mut dyn FnMut(&mut CaseRecord),
    ) -> Result<CaseRecord, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Default)]
struct CaseTable {
    records: Vec<CaseRecord>,
    index: HashMap<CaseId, usize>,
}

/// Process-local registry guarded by a single mutex. Listing preserves
/// insertion order.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCaseRepository {
    table: Arc<Mutex<CaseTable>>,
}

impl InMemoryCaseRepository {
    fn lock(&self) -> Result<MutexGuard<'_, CaseTable>, RepositoryError> {
        self.table
            .lock()
            .map_err(|_| RepositoryError::Unavailable("case registry lock poisoned".to_string()))
    }
}

impl CaseRepository for InMemoryCaseRepository {
    fn insert(&self, record: CaseRecord) -> Result<CaseRecord, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.index.contains_key(&record.case_id) {
            return Err(RepositoryError::Conflict);
        }
        let position = guard.records.len();
        guard.index.insert(record.case_id.clone(), position);
        guard.records.push(record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &CaseId) -> Result<Option<CaseRecord>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard
            .index
            .get(id)
            .and_then(|position| guard.records.get(*position))
            .cloned())
    }

    fn list(&self) -> Result<Vec<CaseRecord>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.records.clone())
    }

    fn modify(
        &self,
        id: &CaseId,
        change: &mut dyn FnMut(&mut CaseRecord),
    ) -> Result<CaseRecord, RepositoryError> {
        let mut guard = self.lock()?;
        let position = *guard.index.get(id).ok_or(RepositoryError::NotFound)?;
        let record = guard
            .records
            .get_mut(position)
            .ok_or(RepositoryError::NotFound)?;
        change(record);
        Ok(record.clone())
    }
}
