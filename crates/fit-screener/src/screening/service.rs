use std::sync::Arc;

use chrono::{NaiveDateTime, Utc};
use serde::Serialize;
use tracing::info;

use super::answers::AnswerSet;
use super::bank::QuestionBank;
use super::engine::{ScreeningEngine, ScreeningOutcome};
use super::record::CandidateRecord;
use super::scorecard::Scorecard;
use super::sink::{RecordSink, SinkError};

/// Service composing the scoring engine with the record sink.
pub struct ScreeningService<S> {
    engine: Arc<ScreeningEngine>,
    sink: Arc<S>,
    location: String,
}

impl<S> ScreeningService<S>
where
    S: RecordSink + 'static,
{
    pub fn new(bank: Arc<QuestionBank>, sink: Arc<S>, location: impl Into<String>) -> Self {
        Self {
            engine: Arc::new(ScreeningEngine::new(bank)),
            sink,
            location: location.into(),
        }
    }

    pub fn questions(&self) -> &QuestionBank {
        self.engine.bank()
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Score answers and build the scorecard and record without persisting anything.
    pub fn evaluate(&self, answers: AnswerSet) -> ScreeningReport {
        self.evaluate_at(answers, Utc::now().naive_utc())
    }

    pub fn evaluate_at(&self, answers: AnswerSet, timestamp: NaiveDateTime) -> ScreeningReport {
        let outcome = self.engine.score(&answers);
        let scorecard = Scorecard::build(&outcome, &answers, self.engine.bank());
        let record = CandidateRecord::new(answers, &outcome, self.location.clone(), timestamp);

        ScreeningReport {
            outcome,
            scorecard,
            record,
        }
    }

    /// Score answers and hand the resulting record to the sink.
    pub fn submit(&self, answers: AnswerSet) -> Result<ScreeningReceipt, ScreeningServiceError> {
        let report = self.evaluate(answers);
        let stored_at = self.sink.store(&report.record)?;

        info!(
            overall_score = report.outcome.overall_score,
            tier = report.outcome.tier.label(),
            knockouts_failed = report.outcome.knockout_failed.len(),
            stored_at = %stored_at,
            "candidate screening submitted"
        );

        Ok(ScreeningReceipt { stored_at, report })
    }
}

/// Scored session: engine outcome plus the scorecard view and exportable record.
#[derive(Debug, Clone, Serialize)]
pub struct ScreeningReport {
    pub outcome: ScreeningOutcome,
    pub scorecard: Scorecard,
    pub record: CandidateRecord,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScreeningReceipt {
    pub stored_at: String,
    #[serde(flatten)]
    pub report: ScreeningReport,
}

/// Error raised by the screening service.
#[derive(Debug, thiserror::Error)]
pub enum ScreeningServiceError {
    #[error(transparent)]
    Sink(#[from] SinkError),
}
