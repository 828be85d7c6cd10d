use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Raw value collected for one question. The expected shape depends on the question kind,
/// but every shape is accepted for every kind and coerced leniently when scored.
///
/// Numbers keep their JSON representation so exported answers match what was submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Flag(bool),
    Number(Number),
    Text(String),
    Empty,
}

impl AnswerValue {
    /// `null`, `false`, zero and the empty string: answers that count as "not given" for
    /// rating-style questions.
    pub fn is_blank(&self) -> bool {
        match self {
            AnswerValue::Empty | AnswerValue::Flag(false) => true,
            AnswerValue::Number(number) => number.as_f64() == Some(0.0),
            AnswerValue::Text(raw) => raw.is_empty(),
            AnswerValue::Flag(true) => false,
        }
    }

    /// Numeric reading for rating-style answers; `true` reads as 1. `None` when the value is
    /// not a number.
    pub fn as_rating(&self) -> Option<f64> {
        match self {
            AnswerValue::Number(number) => number.as_f64().filter(|v| v.is_finite()),
            AnswerValue::Text(raw) => raw.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            AnswerValue::Flag(true) => Some(1.0),
            AnswerValue::Flag(false) | AnswerValue::Empty => None,
        }
    }

    /// Integer reading truncated toward zero; `true` reads as 1 and fractional text is
    /// treated as unparsable.
    pub fn as_whole_number(&self) -> Option<i64> {
        match self {
            AnswerValue::Number(number) => number.as_i64().or_else(|| {
                number
                    .as_f64()
                    .filter(|v| v.is_finite())
                    .map(|v| v.trunc() as i64)
            }),
            AnswerValue::Text(raw) => raw.trim().parse::<i64>().ok(),
            AnswerValue::Flag(true) => Some(1),
            AnswerValue::Flag(false) | AnswerValue::Empty => None,
        }
    }

    pub fn is_affirmative(&self) -> bool {
        matches!(self, AnswerValue::Flag(true))
    }

    pub fn as_text(&self) -> &str {
        match self {
            AnswerValue::Text(raw) => raw,
            _ => "",
        }
    }

    /// Key used to match an option value or scenario choice.
    pub fn as_choice(&self) -> Option<String> {
        match self {
            AnswerValue::Text(raw) => Some(raw.clone()),
            AnswerValue::Number(number) => match number.as_f64() {
                Some(value) if value.is_finite() && value.fract() == 0.0 => {
                    Some(format!("{}", value as i64))
                }
                _ => Some(number.to_string()),
            },
            AnswerValue::Flag(flag) => Some(flag.to_string()),
            AnswerValue::Empty => None,
        }
    }
}

impl From<bool> for AnswerValue {
    fn from(value: bool) -> Self {
        AnswerValue::Flag(value)
    }
}

impl From<f64> for AnswerValue {
    fn from(value: f64) -> Self {
        Number::from_f64(value)
            .map(AnswerValue::Number)
            .unwrap_or(AnswerValue::Empty)
    }
}

impl From<i32> for AnswerValue {
    fn from(value: i32) -> Self {
        AnswerValue::Number(Number::from(i64::from(value)))
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        AnswerValue::Text(value.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(value: String) -> Self {
        AnswerValue::Text(value)
    }
}

/// Candidate answers keyed by question id. Built once per session and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<String, AnswerValue>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, question_id: impl Into<String>, value: impl Into<AnswerValue>) -> Self {
        self.0.insert(question_id.into(), value.into());
        self
    }

    /// Present answer for a question; `null` answers read as absent.
    pub fn get(&self, question_id: &str) -> Option<&AnswerValue> {
        self.0
            .get(question_id)
            .filter(|value| !matches!(value, AnswerValue::Empty))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnswerValue)> {
        self.0.iter().map(|(id, value)| (id.as_str(), value))
    }

    pub fn name(&self) -> Option<&str> {
        self.non_blank_text("name")
    }

    pub fn email(&self) -> Option<&str> {
        self.non_blank_text("email")
    }

    fn non_blank_text(&self, question_id: &str) -> Option<&str> {
        self.get(question_id)
            .map(|value| value.as_text().trim())
            .filter(|text| !text.is_empty())
    }
}

impl<K: Into<String>, V: Into<AnswerValue>> FromIterator<(K, V)> for AnswerSet {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(id, value)| (id.into(), value.into()))
                .collect(),
        )
    }
}
