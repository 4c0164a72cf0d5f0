use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const MIN_SEVERITY: u8 = 1;
pub const MAX_SEVERITY: u8 = 5;

/// Decided case used as ground truth for recommendations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalCase {
    pub case_id: String,
    pub crime_type: String,
    pub severity_score: u8,
    pub sentence_months: u32,
}

impl HistoricalCase {
    fn new(case_id: &str, crime_type: &str, severity_score: u8, sentence_months: u32) -> Self {
        Self {
            case_id: case_id.to_string(),
            crime_type: crime_type.to_string(),
            severity_score,
            sentence_months,
        }
    }
}

/// Sentencing history bundled with the service.
pub fn standard_history() -> Vec<HistoricalCase> {
    vec![
        HistoricalCase::new("HN001", "Theft", 2, 3),
        HistoricalCase::new("HN002", "Assault", 3, 12),
        HistoricalCase::new("HN003", "Burglary", 4, 24),
        HistoricalCase::new("HN004", "Fraud", 5, 60),
        HistoricalCase::new("HN005", "Theft", 2, 4),
        HistoricalCase::new("HN006", "Vandalism", 1, 1),
        HistoricalCase::new("HN007", "Burglary", 4, 30),
        HistoricalCase::new("HN008", "Assault", 4, 18),
        HistoricalCase::new("HN009", "Theft", 3, 6),
        HistoricalCase::new("HN010", "Burglary", 4, 28),
    ]
}

#[derive(Debug, thiserror::Error)]
pub enum HistoryLoadError {
    #[error("failed to read sentencing history: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid sentencing history CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("history row {row} ({case_id}): {reason}")]
    InvalidRow {
        row: usize,
        case_id: String,
        reason: String,
    },
}

#[derive(Debug, Deserialize)]
struct HistoryRow {
    case_id: String,
    crime_type: String,
    severity_score: i64,
    sentence_months: i64,
}

pub fn load_history_from_path(
    path: impl AsRef<Path>,
) -> Result<Vec<HistoricalCase>, HistoryLoadError> {
    let file = File::open(path)?;
    load_history_from_reader(file)
}

/// Parses `case_id,crime_type,severity_score,sentence_months` rows.
pub fn load_history_from_reader<R: Read>(
    reader: R,
) -> Result<Vec<HistoricalCase>, HistoryLoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut seen = HashSet::new();
    let mut cases = Vec::new();

    for (index, row) in csv_reader.deserialize::<HistoryRow>().enumerate() {
        let row = row?;
        // header is line 1
        let line = index + 2;
        let invalid = |reason: String| HistoryLoadError::InvalidRow {
            row: line,
            case_id: row.case_id.clone(),
            reason,
        };

        if row.case_id.is_empty() {
            return Err(invalid("case_id must not be empty".to_string()));
        }
        if row.crime_type.is_empty() {
            return Err(invalid("crime_type must not be empty".to_string()));
        }

        let severity_score = u8::try_from(row.severity_score)
            .ok()
            .filter(|score| (MIN_SEVERITY..=MAX_SEVERITY).contains(score))
            .ok_or_else(|| {
                invalid(format!(
                    "severity_score {} outside {MIN_SEVERITY}..={MAX_SEVERITY}",
                    row.severity_score
                ))
            })?;

        let sentence_months = u32::try_from(row.sentence_months)
            .ok()
            .filter(|months| *months > 0)
            .ok_or_else(|| {
                invalid(format!(
                    "sentence_months must be positive, got {}",
                    row.sentence_months
                ))
            })?;

        if !seen.insert(row.case_id.clone()) {
            return Err(invalid("duplicate case_id".to_string()));
        }

        cases.push(HistoricalCase {
            case_id: row.case_id,
            crime_type: row.crime_type,
            severity_score,
            sentence_months,
        });
    }

    Ok(cases)
}
