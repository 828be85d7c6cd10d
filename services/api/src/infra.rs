use fit_screener::config::ScreenerConfig;
use fit_screener::error::AppError;
use fit_screener::screening::{AnswerSet, QuestionBank};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Naming used when a candidate record is offered as a download.
#[derive(Clone, Debug)]
pub(crate) struct ExportSettings {
    pub(crate) prefix: String,
}

/// Load the bank named on the command line, falling back to the configured path.
pub(crate) fn load_question_bank(
    override_path: Option<PathBuf>,
    config: &ScreenerConfig,
) -> Result<Arc<QuestionBank>, AppError> {
    let path = override_path.unwrap_or_else(|| config.question_bank.clone());
    let bank = QuestionBank::from_path(&path)?;
    info!(
        path = %path.display(),
        questions = bank.questions.len(),
        "loaded question bank"
    );
    Ok(Arc::new(bank))
}

/// Accepts either a bare `{question_id: answer}` map or an object wrapping it under `answers`,
/// which covers both request payloads and previously exported records.
pub(crate) fn read_answers_file(path: &Path) -> Result<AnswerSet, AppError> {
    let raw = std::fs::read_to_string(path)?;
    parse_answers(&raw)
}

pub(crate) fn parse_answers(raw: &str) -> Result<AnswerSet, AppError> {
    let mut document: Value = serde_json::from_str(raw)?;
    let answers = match document.get_mut("answers") {
        Some(inner) if inner.is_object() => inner.take(),
        _ => document,
    };
    Ok(serde_json::from_value(answers)?)
}
