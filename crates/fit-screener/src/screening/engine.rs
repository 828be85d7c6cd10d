use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::aggregate::{aggregate_dimensions, overall_score, DimensionScores, QuestionScore};
use super::answers::AnswerSet;
use super::bank::QuestionBank;
use super::knockout::{failed_knockouts, KnockoutCheck};
use super::tier::Tier;

/// Stateless scorer over a shared, read-only question bank.
#[derive(Debug, Clone)]
pub struct ScreeningEngine {
    bank: Arc<QuestionBank>,
}

impl ScreeningEngine {
    pub fn new(bank: Arc<QuestionBank>) -> Self {
        Self { bank }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// Score a completed answer set. Malformed or missing answers fall back to neutral
    /// defaults, so scoring never fails.
    pub fn score(&self, answers: &AnswerSet) -> ScreeningOutcome {
        let rollup = aggregate_dimensions(&self.bank, answers);
        let overall_score = overall_score(&rollup.scores, &self.bank.dimensions);
        let knockout_failed = failed_knockouts(answers);
        let tier = Tier::classify(overall_score, &knockout_failed);

        debug!(
            questions = rollup.questions.len(),
            dimensions = rollup.scores.len(),
            overall_score,
            knockouts_failed = knockout_failed.len(),
            tier = tier.label(),
            "scored screener answers"
        );

        ScreeningOutcome {
            question_scores: rollup.questions,
            dimension_scores: rollup.scores,
            overall_score,
            knockout_failed,
            tier,
        }
    }
}

/// Everything the engine derives from one answer set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningOutcome {
    pub question_scores: Vec<QuestionScore>,
    pub dimension_scores: DimensionScores,
    pub overall_score: u8,
    pub knockout_failed: Vec<KnockoutCheck>,
    pub tier: Tier,
}

impl ScreeningOutcome {
    pub fn knockouts_met(&self) -> bool {
        self.knockout_failed.is_empty()
    }
}
