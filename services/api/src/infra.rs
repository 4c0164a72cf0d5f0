use justice_suite::config::SentencingConfig;
use justice_suite::tools::corrections::SupervisionTerms;
use justice_suite::tools::investigator::SuspectDatabase;
use justice_suite::tools::sentencing::{HistoryLoadError, SentencingEngine};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Read-only tables shared by the stateless tool endpoints.
#[derive(Clone)]
pub(crate) struct ToolState {
    pub(crate) sentencing: SentencingEngine,
    pub(crate) suspects: Arc<SuspectDatabase>,
    pub(crate) supervision: SupervisionTerms,
}

impl ToolState {
    pub(crate) fn new(sentencing: SentencingEngine) -> Self {
        Self {
            sentencing,
            suspects: Arc::new(SuspectDatabase::standard()),
            supervision: SupervisionTerms::default(),
        }
    }
}

pub(crate) fn load_sentencing_engine(
    config: &SentencingConfig,
) -> Result<SentencingEngine, HistoryLoadError> {
    let engine = match &config.history_csv {
        Some(path) => {
            let engine = SentencingEngine::from_path(path)?;
            info!(
                path = %path.display(),
                cases = engine.history().len(),
                "loaded sentencing history"
            );
            engine
        }
        None => SentencingEngine::standard(),
    };
    Ok(engine)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn defaults_to_bundled_history() {
        let engine =
            load_sentencing_engine(&SentencingConfig::default()).expect("bundled history loads");
        assert_eq!(engine.history().len(), 10);
    }

    #[test]
    fn missing_history_file_is_an_io_error() {
        let config = SentencingConfig {
            history_csv: Some(PathBuf::from("/nonexistent/history.csv")),
        };
        assert!(matches!(
            load_sentencing_engine(&config),
            Err(HistoryLoadError::Io(_))
        ));
    }
}
