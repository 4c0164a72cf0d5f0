use std::sync::Arc;

use tracing::{debug, info};

use super::domain::{CaseId, CaseRecord, Clock, EvidenceEntry, SystemClock};
use super::repository::{CaseRepository, RepositoryError};

/// Service owning the case registry and its append-only evidence trail.
pub struct CaseLifecycleService<R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> CaseLifecycleService<R>
where
    R: CaseRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_clock(repository, Arc::new(SystemClock))
    }

    pub fn with_clock(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Open a new case in the `Investigation` status. Existing ids are rejected.
    pub fn create_case(
        &self,
        case_id: CaseId,
        defendant_name: impl Into<String>,
    ) -> Result<CaseRecord, CaseServiceError> {
        let record = CaseRecord::open(case_id.clone(), defendant_name);
        let stored = self
            .repository
            .insert(record)
            .map_err(|err| CaseServiceError::classify(&case_id, err))?;
        info!(case_id = %stored.case_id, "case opened");
        Ok(stored)
    }

    /// Snapshot of every case, in the order they were opened.
    pub fn all_cases(&self) -> Result<Vec<CaseRecord>, CaseServiceError> {
        Ok(self.repository.list()?)
    }

    pub fn get_case(&self, case_id: &CaseId) -> Result<CaseRecord, CaseServiceError> {
        self.repository
            .fetch(case_id)?
            .ok_or_else(|| CaseServiceError::CaseNotFound(case_id.clone()))
    }

    /// Append an evidence item stamped with the current time.
    pub fn add_evidence(
        &self,
        case_id: &CaseId,
        item: impl Into<String>,
    ) -> Result<CaseRecord, CaseServiceError> {
        let mut pending: Option<String> = Some(item.into());
        let clock = self.clock.as_ref();
        // Stamped under the registry lock so log order matches clock order.
        let updated = self
            .repository
            .modify(case_id, &mut |record: &mut CaseRecord| {
                if let Some(item) = pending.take() {
                    record.append_evidence(EvidenceEntry::captured_at(item, clock.now()));
                }
            })
            .map_err(|err| CaseServiceError::classify(case_id, err))?;
        debug!(
            case_id = %case_id,
            entries = updated.evidence_log.len(),
            "evidence logged"
        );
        Ok(updated)
    }

    /// Overwrite the case status. Any label is accepted.
    pub fn update_status(
        &self,
        case_id: &CaseId,
        new_status: impl Into<String>,
    ) -> Result<CaseRecord, CaseServiceError> {
        let new_status = new_status.into();
        let updated = self
            .repository
            .modify(case_id, &mut |record: &mut CaseRecord| {
                record.set_status(new_status.as_str())
            })
            .map_err(|err| CaseServiceError::classify(case_id, err))?;
        info!(case_id = %case_id, status = %updated.status, "case status updated");
        Ok(updated)
    }
}

/// Error raised by the lifecycle service.
#[derive(Debug, thiserror::Error)]
pub enum CaseServiceError {
    #[error("case {0} already exists")]
    DuplicateCase(CaseId),
    #[error("case {0} not found")]
    CaseNotFound(CaseId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl CaseServiceError {
    fn classify(case_id: &CaseId, err: RepositoryError) -> Self {
        match err {
            RepositoryError::Conflict => Self::DuplicateCase(case_id.clone()),
            RepositoryError::NotFound => Self::CaseNotFound(case_id.clone()),
            other => Self::Repository(other),
        }
    }
}
