use chrono::{NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};

use super::aggregate::DimensionScores;
use super::answers::AnswerSet;
use super::engine::ScreeningOutcome;
use super::knockout::KnockoutCheck;

/// Exported artifact for one screening session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRecord {
    pub answers: AnswerSet,
    pub score_by_dimension: DimensionScores,
    pub overall_score: u8,
    pub knockout_failed: Vec<KnockoutCheck>,
    /// UTC with microsecond precision, serialized without an offset.
    pub timestamp: NaiveDateTime,
    pub location: String,
}

impl CandidateRecord {
    pub fn new(
        answers: AnswerSet,
        outcome: &ScreeningOutcome,
        location: impl Into<String>,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self {
            answers,
            score_by_dimension: outcome.dimension_scores.clone(),
            overall_score: outcome.overall_score,
            knockout_failed: outcome.knockout_failed.clone(),
            timestamp: timestamp.trunc_subsecs(6),
            location: location.into(),
        }
    }

    /// `{prefix}-candidate-{email}.json`, or `anonymous` when no email was given.
    pub fn export_file_name(&self, prefix: &str) -> String {
        let candidate = self
            .answers
            .email()
            .map(sanitize_file_component)
            .unwrap_or_else(|| "anonymous".to_string());
        format!("{prefix}-candidate-{candidate}.json")
    }

    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn sanitize_file_component(raw: &str) -> String {
    raw.chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || matches!(ch, '@' | '.' | '-' | '_' | '+') {
                ch
            } else {
                '_'
            }
        })
        .collect()
}
