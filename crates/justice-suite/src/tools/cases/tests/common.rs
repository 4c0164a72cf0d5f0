use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::response::Response;
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde_json::Value;

use crate::tools::cases::domain::{CaseId, CaseRecord, Clock, FixedClock};
use crate::tools::cases::repository::{CaseRepository, InMemoryCaseRepository, RepositoryError};
use crate::tools::cases::{case_router, CaseLifecycleService};

pub(super) fn evidence_instant() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 11, 3)
        .and_then(|date| date.and_hms_opt(14, 30, 5))
        .expect("valid timestamp")
}

pub(super) fn build_service() -> (
    CaseLifecycleService<InMemoryCaseRepository>,
    Arc<InMemoryCaseRepository>,
) {
    let repository = Arc::new(InMemoryCaseRepository::default());
    let service = CaseLifecycleService::with_clock(
        repository.clone(),
        Arc::new(FixedClock(evidence_instant())),
    );
    (service, repository)
}

/// Clock that advances one second per reading and stalls on its first reading.
pub(super) struct SteppingClock {
    start: NaiveDateTime,
    first_read_stall: Duration,
    reads: AtomicU32,
}

impl SteppingClock {
    pub(super) fn new(start: NaiveDateTime, first_read_stall: Duration) -> Self {
        Self {
            start,
            first_read_stall,
            reads: AtomicU32::new(0),
        }
    }

    pub(super) fn reads(&self) -> u32 {
        self.reads.load(Ordering::SeqCst)
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> NaiveDateTime {
        let read = self.reads.fetch_add(1, Ordering::SeqCst);
        let instant = self.start + TimeDelta::seconds(i64::from(read));
        if read == 0 {
            std::thread::sleep(self.first_read_stall);
        }
        instant
    }
}

pub(super) fn case_id(value: &str) -> CaseId {
    CaseId::new(value)
}

/// Repository whose backing store is offline.
pub(super) struct UnavailableRepository;

impl CaseRepository for UnavailableRepository {
    fn insert(&self, _record: CaseRecord) -> Result<CaseRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("registry offline".to_string()))
    }

    fn fetch(&self, _id: &CaseId) -> Result<Option<CaseRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("registry offline".to_string()))
    }

    fn list(&self) -> Result<Vec<CaseRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("registry offline".to_string()))
    }

    fn modify(
        &self,
        _id: &CaseId,
        _change: &mut dyn FnMut(&mut CaseRecord),
    ) -> Result<CaseRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("registry offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn case_router_with_service(
    service: CaseLifecycleService<InMemoryCaseRepository>,
) -> axum::Router {
    case_router(Arc::new(service))
}
