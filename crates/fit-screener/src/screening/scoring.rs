use super::answers::AnswerValue;
use super::bank::{Question, QuestionKind};

pub const RATING_MIN: f64 = 1.0;
pub const RATING_MAX: f64 = 5.0;
/// Midpoint substituted for missing or unreadable ratings.
pub const NEUTRAL_RATING: f64 = 3.0;
/// Score for an empty free-text answer.
pub const EMPTY_TEXT_SCORE: f64 = 50.0;
/// Answers shorter than this never reach the full text score, whatever `minChars` says.
pub const TEXT_LENGTH_FLOOR: usize = 40;
const TEXT_BASE_SCORE: f64 = 60.0;
const TEXT_LENGTH_BONUS: f64 = 40.0;

/// Clamp a 1–5 rating and map it linearly onto 0–100.
pub fn rescale(rating: f64) -> f64 {
    let clamped = rating.clamp(RATING_MIN, RATING_MAX);
    (clamped - RATING_MIN) / (RATING_MAX - RATING_MIN) * 100.0
}

/// Score in `[0, 100]` for a single answer, before the question weight is applied.
pub fn normalized_score(question: &Question, answer: Option<&AnswerValue>) -> f64 {
    match &question.kind {
        QuestionKind::Likert { .. } => {
            let rating = answer
                .filter(|answer| !answer.is_blank())
                .and_then(AnswerValue::as_rating)
                .unwrap_or(NEUTRAL_RATING);
            rescale(rating)
        }
        QuestionKind::Boolean => {
            let rating = match answer {
                Some(AnswerValue::Flag(true)) => RATING_MAX,
                Some(AnswerValue::Flag(false)) => RATING_MIN,
                _ => NEUTRAL_RATING,
            };
            rescale(rating)
        }
        QuestionKind::Select { options } => {
            let picked = answer.and_then(AnswerValue::as_choice);
            let rating = picked
                .and_then(|value| options.iter().find(|option| option.value == value))
                .map(|option| option.score.unwrap_or(NEUTRAL_RATING))
                .unwrap_or(NEUTRAL_RATING);
            rescale(rating)
        }
        QuestionKind::Sjt { choices, .. } => {
            let picked = answer.and_then(AnswerValue::as_choice);
            let rating = picked
                .and_then(|key| choices.iter().find(|choice| choice.key == key))
                .map(|choice| choice.score.unwrap_or(NEUTRAL_RATING))
                .unwrap_or(NEUTRAL_RATING);
            rescale(rating)
        }
        QuestionKind::Text { min_chars } => {
            let text = answer.map(AnswerValue::as_text).unwrap_or("").trim();
            if text.is_empty() {
                return EMPTY_TEXT_SCORE;
            }
            let target = TEXT_LENGTH_FLOOR.max(*min_chars) as f64;
            let ratio = (text.chars().count() as f64 / target).min(1.0);
            TEXT_BASE_SCORE + ratio * TEXT_LENGTH_BONUS
        }
        QuestionKind::Unrecognized => 0.0,
    }
}

/// Weighted contribution of one answer: the normalized score multiplied by the question weight.
///
/// The dimension aggregator divides by the summed effective weights, so this product is what
/// keeps the per-dimension result a weighted mean.
pub fn score_question(question: &Question, answer: Option<&AnswerValue>) -> f64 {
    if question.weight == 0.0 {
        return 0.0;
    }
    apply_weight(question, normalized_score(question, answer))
}

/// Weighted contribution of an already normalized score; weight 0 always contributes 0.
pub fn apply_weight(question: &Question, normalized: f64) -> f64 {
    if question.weight == 0.0 {
        0.0
    } else {
        normalized * question.weight
    }
}
