//! Candidate screening: question bank, answer coercion, weighted scoring, knockout checks,
//! tiering, and the service/router that expose them.
//!
//! Everything up to [`ScreeningEngine`] is pure and synchronous. The bank is loaded once and
//! shared read-only; each answer set is scored independently.

pub mod aggregate;
pub mod answers;
pub mod bank;
mod engine;
pub mod knockout;
pub mod record;
pub mod router;
pub mod scorecard;
pub mod scoring;
pub mod service;
pub mod sink;
pub mod tier;

#[cfg(test)]
mod tests;

pub use aggregate::{DimensionScores, QuestionScore};
pub use answers::{AnswerSet, AnswerValue};
pub use bank::{
    AnswerOption, DimensionWeights, Question, QuestionBank, QuestionBankError, QuestionKind,
    ScenarioChoice,
};
pub use engine::{ScreeningEngine, ScreeningOutcome};
pub use knockout::KnockoutCheck;
pub use record::CandidateRecord;
pub use router::{screening_router, AnswersPayload};
pub use scorecard::Scorecard;
pub use service::{ScreeningReceipt, ScreeningReport, ScreeningService, ScreeningServiceError};
pub use sink::{JsonFileSink, RecordSink, SinkError};
pub use tier::Tier;
