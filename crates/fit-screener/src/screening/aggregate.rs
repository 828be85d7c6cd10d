use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::answers::AnswerSet;
use super::bank::{DimensionWeights, QuestionBank};
use super::scoring::{apply_weight, normalized_score};

/// Per-question audit entry: the unweighted score and the weights it entered the roll-up with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionScore {
    pub question_id: String,
    pub dimension: String,
    pub normalized: f64,
    pub weight: f64,
    pub effective_weight: f64,
}

/// Rounded 0–100 score for every dimension that has at least one question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DimensionScores(BTreeMap<String, u8>);

impl DimensionScores {
    pub fn get(&self, dimension: &str) -> Option<u8> {
        self.0.get(dimension).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u8)> {
        self.0.iter().map(|(name, score)| (name.as_str(), *score))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, u8)> for DimensionScores {
    fn from_iter<T: IntoIterator<Item = (K, u8)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, score)| (name.into(), score))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DimensionRollup {
    pub scores: DimensionScores,
    pub questions: Vec<QuestionScore>,
}

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    weighted_sum: f64,
    weight_sum: f64,
}

impl Tally {
    fn mean(self) -> f64 {
        if self.weight_sum > 0.0 {
            self.weighted_sum / self.weight_sum
        } else {
            0.0
        }
    }
}

/// Roll every question in the bank up into its dimension as a weighted mean.
///
/// Effective weight is question weight times dimension weight. Dimensions whose effective
/// weights sum to zero score 0.
pub fn aggregate_dimensions(bank: &QuestionBank, answers: &AnswerSet) -> DimensionRollup {
    let mut tallies: BTreeMap<&str, Tally> = BTreeMap::new();
    let mut questions = Vec::with_capacity(bank.questions.len());

    for question in &bank.questions {
        let dimension_weight = bank.dimension_weight(&question.dimension);
        let answer = answers.get(&question.id);
        let effective_weight = question.weight * dimension_weight;

        let normalized = normalized_score(question, answer);

        let tally = tallies.entry(question.dimension.as_str()).or_default();
        tally.weighted_sum += apply_weight(question, normalized) * dimension_weight;
        tally.weight_sum += effective_weight;

        questions.push(QuestionScore {
            question_id: question.id.clone(),
            dimension: question.dimension.clone(),
            normalized,
            weight: question.weight,
            effective_weight,
        });
    }

    let scores = tallies
        .into_iter()
        .map(|(dimension, tally)| (dimension, round_score(tally.mean())))
        .collect();

    DimensionRollup { scores, questions }
}

/// Weighted mean of the dimension scores; 0 when no dimension was scored.
pub fn overall_score(scores: &DimensionScores, weights: &DimensionWeights) -> u8 {
    let mut tally = Tally::default();
    for (dimension, score) in scores.iter() {
        let weight = weights.weight(dimension);
        tally.weighted_sum += f64::from(score) * weight;
        tally.weight_sum += weight;
    }
    round_score(tally.mean())
}

fn round_score(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}
