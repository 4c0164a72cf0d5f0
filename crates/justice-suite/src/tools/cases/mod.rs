//! Case-file tracking: an in-memory registry of cases, each with an append-only
//! evidence log and an open-ended status label.
//!
//! The service is the only writer. Storage sits behind [`CaseRepository`] so the
//! registry can be swapped per test, and the evidence clock is injectable.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    CaseId, CaseRecord, Clock, EvidenceEntry, FixedClock, SystemClock,
    EVIDENCE_TIMESTAMP_FORMAT, INITIAL_STATUS,
};
pub use repository::{CaseRepository, InMemoryCaseRepository, RepositoryError};
pub use router::{case_router, CreateCaseRequest, EvidenceRequest, StatusRequest};
pub use service::{CaseLifecycleService, CaseServiceError};
