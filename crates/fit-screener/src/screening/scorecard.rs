use serde::Serialize;

use super::answers::AnswerSet;
use super::bank::QuestionBank;
use super::engine::ScreeningOutcome;
use super::tier::Tier;

const MISSING_DETAIL: &str = "—";

/// Reviewer-facing summary of a scored session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scorecard {
    pub overall_score: u8,
    pub tier: Tier,
    pub tier_accent: &'static str,
    /// Dimensions ordered from strongest to weakest.
    pub strengths: Vec<DimensionStrength>,
    pub knockouts: Vec<KnockoutEntry>,
    pub all_knockouts_met: bool,
    pub candidate: CandidateDetails,
    pub interview_probes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DimensionStrength {
    pub dimension: String,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KnockoutEntry {
    pub id: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateDetails {
    pub name: String,
    pub email: String,
}

impl Scorecard {
    pub fn build(outcome: &ScreeningOutcome, answers: &AnswerSet, bank: &QuestionBank) -> Self {
        let mut strengths: Vec<DimensionStrength> = outcome
            .dimension_scores
            .iter()
            .map(|(dimension, score)| DimensionStrength {
                dimension: dimension.to_string(),
                score,
            })
            .collect();
        strengths.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.dimension.cmp(&b.dimension))
        });

        let knockouts = outcome
            .knockout_failed
            .iter()
            .map(|check| KnockoutEntry {
                id: check.id(),
                label: check.label(),
            })
            .collect();

        Self {
            overall_score: outcome.overall_score,
            tier: outcome.tier,
            tier_accent: outcome.tier.accent(),
            strengths,
            knockouts,
            all_knockouts_met: outcome.knockouts_met(),
            candidate: CandidateDetails {
                name: answers.name().unwrap_or(MISSING_DETAIL).to_string(),
                email: answers.email().unwrap_or(MISSING_DETAIL).to_string(),
            },
            interview_probes: bank.interview_probes.clone(),
        }
    }

    pub fn headline(&self) -> String {
        format!(
            "Overall score: {} / 100 • Tier: {}",
            self.overall_score, self.tier
        )
    }
}
