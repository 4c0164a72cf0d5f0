//! Historical-case sentencing recommendations.
//!
//! Queries are answered from an immutable case table in three tiers: cases with the
//! exact crime type and severity, then cases one severity step away on either side,
//! and finally an explicit "no data" result. The engine never fails; every query
//! produces a well-formed [`SentencingResult`].

mod history;

pub use history::{
    load_history_from_path, load_history_from_reader, standard_history, HistoricalCase,
    HistoryLoadError, MAX_SEVERITY, MIN_SEVERITY,
};

use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::round_to;

/// Tier of the fallback search that produced a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendationStatus {
    DirectMatch,
    EstimatedMatch,
    NoData,
}

impl RecommendationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::DirectMatch => "Direct match",
            Self::EstimatedMatch => "Estimated match",
            Self::NoData => "No data",
        }
    }
}

/// Inputs accepted by [`SentencingEngine::recommend`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentencingQuery {
    pub crime_type: String,
    pub severity_score: i64,
}

/// Recommendation with its provenance. Numeric fields are absent for `NoData`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentencingResult {
    pub status: RecommendationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation_months: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_sentence: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_sentence: Option<u32>,
    pub case_count: usize,
    pub basis: String,
}

impl SentencingResult {
    fn matched(status: RecommendationStatus, stats: SentenceStatistics, basis: String) -> Self {
        Self {
            status,
            recommendation_months: Some(stats.mean_months),
            min_sentence: Some(stats.min_months),
            max_sentence: Some(stats.max_months),
            case_count: stats.case_count,
            basis,
        }
    }

    fn no_data() -> Self {
        Self {
            status: RecommendationStatus::NoData,
            recommendation_months: None,
            min_sentence: None,
            max_sentence: None,
            case_count: 0,
            basis: "No historical data found for this crime type.".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct SentenceStatistics {
    mean_months: f64,
    min_months: u32,
    max_months: u32,
    case_count: usize,
}

fn summarize(cases: &[&HistoricalCase]) -> Option<SentenceStatistics> {
    let min_months = cases.iter().map(|case| case.sentence_months).min()?;
    let max_months = cases.iter().map(|case| case.sentence_months).max()?;
    let total: u64 = cases.iter().map(|case| u64::from(case.sentence_months)).sum();
    let mean = total as f64 / cases.len() as f64;

    Some(SentenceStatistics {
        mean_months: round_to(mean, 1),
        min_months,
        max_months,
        case_count: cases.len(),
    })
}

/// Severities one step either side of `severity`, limited to the valid scale.
fn adjacent_severities(severity: i64) -> Vec<i64> {
    [severity.checked_sub(1), severity.checked_add(1)]
        .into_iter()
        .flatten()
        .filter(|candidate| {
            (i64::from(MIN_SEVERITY)..=i64::from(MAX_SEVERITY)).contains(candidate)
        })
        .collect()
}

/// Stateless recommender over a shared, read-only history.
#[derive(Debug, Clone)]
pub struct SentencingEngine {
    history: Arc<[HistoricalCase]>,
}

impl SentencingEngine {
    pub fn new(history: Vec<HistoricalCase>) -> Self {
        Self {
            history: history.into(),
        }
    }

    pub fn standard() -> Self {
        Self::new(standard_history())
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, HistoryLoadError> {
        load_history_from_reader(reader).map(Self::new)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, HistoryLoadError> {
        load_history_from_path(path).map(Self::new)
    }

    pub fn history(&self) -> &[HistoricalCase] {
        &self.history
    }

    /// Distinct crime types in the history, sorted.
    pub fn crime_types(&self) -> Vec<String> {
        self.history
            .iter()
            .map(|case| case.crime_type.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn recommend(&self, crime_type: &str, severity_score: i64) -> SentencingResult {
        let direct = self.matching(crime_type, |severity| severity == severity_score);
        if let Some(stats) = summarize(&direct) {
            debug!(crime_type, severity_score, cases = stats.case_count, "direct match");
            let basis = format!(
                "Direct match from {} historical case(s).",
                stats.case_count
            );
            return SentencingResult::matched(RecommendationStatus::DirectMatch, stats, basis);
        }

        let neighbours = adjacent_severities(severity_score);
        let similar = self.matching(crime_type, |severity| neighbours.contains(&severity));
        if let Some(stats) = summarize(&similar) {
            debug!(
                crime_type,
                severity_score,
                cases = stats.case_count,
                "estimated from adjacent severities"
            );
            let basis = format!(
                "Estimate based on {} case(s) with similar severity.",
                stats.case_count
            );
            return SentencingResult::matched(RecommendationStatus::EstimatedMatch, stats, basis);
        }

        debug!(crime_type, severity_score, "no historical data");
        SentencingResult::no_data()
    }

    pub fn recommend_query(&self, query: &SentencingQuery) -> SentencingResult {
        self.recommend(&query.crime_type, query.severity_score)
    }

    fn matching<F>(&self, crime_type: &str, severity_matches: F) -> Vec<&HistoricalCase>
    where
        F: Fn(i64) -> bool,
    {
        self.history
            .iter()
            .filter(|case| {
                case.crime_type == crime_type
                    && severity_matches(i64::from(case.severity_score))
            })
            .collect()
    }
}

impl Default for SentencingEngine {
    fn default() -> Self {
        Self::standard()
    }
}
