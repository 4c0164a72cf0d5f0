use std::fmt;

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Status assigned to every newly opened case.
pub const INITIAL_STATUS: &str = "Investigation";

/// Second-resolution local timestamp stamped on evidence entries.
pub const EVIDENCE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Identifier wrapper for tracked cases.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseId(pub String);

impl CaseId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One entry in a case's evidence trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceEntry {
    #[serde(rename = "evidence_item")]
    pub item: String,
    pub timestamp: String,
}

impl EvidenceEntry {
    pub fn captured_at(item: impl Into<String>, at: NaiveDateTime) -> Self {
        Self {
            item: item.into(),
            timestamp: at.format(EVIDENCE_TIMESTAMP_FORMAT).to_string(),
        }
    }
}

/// Mutable case file. Identity fields never change after creation; the evidence
/// log only grows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub case_id: CaseId,
    pub defendant_name: String,
    pub evidence_log: Vec<EvidenceEntry>,
    #[serde(rename = "case_status")]
    pub status: String,
}

impl CaseRecord {
    pub fn open(case_id: CaseId, defendant_name: impl Into<String>) -> Self {
        Self {
            case_id,
            defendant_name: defendant_name.into(),
            evidence_log: Vec::new(),
            status: INITIAL_STATUS.to_string(),
        }
    }

    pub(crate) fn append_evidence(&mut self, entry: EvidenceEntry) {
        self.evidence_log.push(entry);
    }

    pub(crate) fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }
}

/// Wall-clock source for evidence timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock pinned to a single instant, for demos and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn evidence_timestamp_has_second_resolution() {
        let at = NaiveDate::from_ymd_opt(2025, 3, 9)
            .and_then(|date| date.and_hms_milli_opt(7, 5, 3, 999))
            .expect("valid timestamp");

        let entry = EvidenceEntry::captured_at("Fingerprint card", at);

        assert_eq!(entry.timestamp, "2025-03-09 07:05:03");
    }

    #[test]
    fn record_serializes_with_case_file_field_names() {
        let mut record = CaseRecord::open(CaseId::new("C1"), "Alice");
        record.append_evidence(EvidenceEntry {
            item: "Knife".to_string(),
            timestamp: "2025-01-01 00:00:00".to_string(),
        });

        let payload = serde_json::to_value(&record).expect("record serializes");

        assert_eq!(payload["case_id"], "C1");
        assert_eq!(payload["defendant_name"], "Alice");
        assert_eq!(payload["case_status"], INITIAL_STATUS);
        assert_eq!(payload["evidence_log"][0]["evidence_item"], "Knife");
    }
}
